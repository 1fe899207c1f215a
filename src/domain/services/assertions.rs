//! Import assertion table and asserted module bodies
//!
//! The table is filled by a scan pass over every module reachable from the
//! entry points before any module body is transformed, so a target's kind is
//! always known by the time its body is requested. Two sites asserting
//! different kinds for one path are rejected.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::services::imports::ByteRange;
use crate::domain::value_objects::AssertionKind;
use crate::error::{BuildError, BuildResult};

/// Kind asserted for a path, with the first site that asserted it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionRecord {
    pub kind: AssertionKind,
    pub importer: PathBuf,
}

/// Resolved path -> asserted kind, for one pipeline pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssertionTable {
    records: BTreeMap<PathBuf, AssertionRecord>,
}

impl AssertionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `importer` asserts `kind` for `path`.
    ///
    /// Repeating the same kind is a no-op; a different kind is an error
    /// naming both import sites.
    pub fn record(&mut self, path: PathBuf, kind: AssertionKind, importer: &Path) -> BuildResult<()> {
        match self.records.get(&path) {
            Some(existing) if existing.kind == kind => Ok(()),
            Some(existing) => Err(BuildError::AssertionConflict {
                first: existing.kind,
                first_importer: existing.importer.clone(),
                second: kind,
                second_importer: importer.to_path_buf(),
                path,
            }),
            None => {
                self.records.insert(
                    path,
                    AssertionRecord {
                        kind,
                        importer: importer.to_path_buf(),
                    },
                );
                Ok(())
            }
        }
    }

    pub fn get(&self, path: &Path) -> Option<AssertionKind> {
        self.records.get(path).map(|r| r.kind)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.records.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &AssertionRecord)> {
        self.records.iter()
    }
}

/// Replacement body for a module carrying an assertion
pub fn asserted_module_body(kind: AssertionKind, contents: &str, file: &Path) -> BuildResult<String> {
    match kind {
        AssertionKind::Css => Ok(css_module_body(contents)),
        AssertionKind::Json => json_module_body(contents, file),
    }
}

/// Constructible stylesheet built from the raw CSS text
pub fn css_module_body(css: &str) -> String {
    format!(
        "const sheet = new CSSStyleSheet();sheet.replaceSync({});export default sheet;",
        to_template_literal(css)
    )
}

/// Module exporting the parsed JSON document.
///
/// The text is validated but emitted as written so key order is preserved.
pub fn json_module_body(json: &str, file: &Path) -> BuildResult<String> {
    serde_json::from_str::<serde_json::Value>(json).map_err(|e| BuildError::Compile {
        file: file.to_path_buf(),
        message: format!("invalid JSON module: {}", e),
    })?;
    Ok(format!("export default {};", json.trim()))
}

/// Wrap text in a template literal, escaping `\`, backtick and `$`
pub fn to_template_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('`');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out.push('`');
    out
}

/// Replacement of a byte range of a source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: ByteRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn new(range: ByteRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn delete(range: ByteRange) -> Self {
        Self::new(range, "")
    }
}

/// Apply non-overlapping edits; order of `edits` does not matter
pub fn apply_edits(source: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by_key(|e| std::cmp::Reverse(e.range.start));
    let mut out = source.to_string();
    for edit in edits {
        out.replace_range(edit.range, &edit.replacement);
    }
    out
}

/// Re-quote `value` with the quote character of `original_literal`
pub fn requote(original_literal: &str, value: &str) -> String {
    let quote = original_literal.chars().next().unwrap_or('\'');
    let escaped = value.replace('\\', "\\\\").replace(quote, &format!("\\{}", quote));
    format!("{quote}{escaped}{quote}")
}
