//! Import scanner
//!
//! Finds every module reference in a script: static imports, re-exports and
//! `import()` expressions, together with an attached `with`/`assert` type
//! clause. Sites keep the byte ranges needed to rewrite the specifier and to
//! strip the clause, so the compiler never sees assertion syntax.

use std::path::Path;

use crate::domain::services::lexer::{SourceTokens, TokenKind};
use crate::domain::value_objects::AssertionKind;
use crate::error::{BuildError, BuildResult};

/// Byte range in the scanned source
pub type ByteRange = std::ops::Range<usize>;

/// One module reference found in a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSite {
    /// Cooked specifier text
    pub specifier: String,
    /// Range of the specifier literal, quotes included
    pub specifier_range: ByteRange,
    /// Type named by the assertion clause
    pub assertion: Option<AssertionKind>,
    /// Range to delete to remove the assertion clause
    pub clause_range: Option<ByteRange>,
    /// `import()` expression
    pub dynamic: bool,
    /// `import type` / `export type`; erased by the compiler
    pub type_only: bool,
}

/// Scan a script for module references.
///
/// Dynamic imports whose argument is not a plain literal (an identifier, a
/// call, or a template with substitutions) are skipped.
pub fn scan_imports(source: &str, file: &Path) -> BuildResult<Vec<ImportSite>> {
    let tokens = SourceTokens::new(source, file)?;
    let mut sites = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let after_dot = i > 0 && tokens.is_punct(i - 1, b'.');
        if after_dot {
            i += 1;
            continue;
        }

        if tokens.is_ident(i, "import") {
            if tokens.is_punct(i + 1, b'(') {
                if let Some(site) = scan_dynamic(&tokens, i + 1, file)? {
                    sites.push(site);
                }
                i += 2;
                continue;
            }
            if tokens.is_punct(i + 1, b'.') {
                // import.meta
                i += 2;
                continue;
            }
            if let Some((site, next)) = scan_static(&tokens, i, file)? {
                sites.push(site);
                i = next;
                continue;
            }
        } else if tokens.is_ident(i, "export") {
            if let Some((site, next)) = scan_reexport(&tokens, i, file)? {
                sites.push(site);
                i = next;
                continue;
            }
        }
        i += 1;
    }

    Ok(sites)
}

/// `import ... from 'x'` or `import 'x'`, starting at the `import` keyword
fn scan_static(
    tokens: &SourceTokens<'_>,
    start: usize,
    file: &Path,
) -> BuildResult<Option<(ImportSite, usize)>> {
    let type_only = tokens.is_ident(start + 1, "type") && !tokens.is_ident(start + 2, "from");

    if tokens.get(start + 1).map(|t| t.kind) == Some(TokenKind::Str) {
        return finish_statement(tokens, start + 1, false, file).map(Some);
    }

    match find_from_specifier(tokens, start + 1) {
        Some(spec) => {
            let (mut site, next) = finish_statement(tokens, spec, false, file)?;
            site.type_only = type_only;
            Ok(Some((site, next)))
        }
        None => Ok(None),
    }
}

/// `export * from 'x'`, `export { a } from 'x'`, `export * as ns from 'x'`
fn scan_reexport(
    tokens: &SourceTokens<'_>,
    start: usize,
    file: &Path,
) -> BuildResult<Option<(ImportSite, usize)>> {
    let mut i = start + 1;
    let type_only = tokens.is_ident(i, "type");
    if type_only {
        i += 1;
    }
    if !(tokens.is_punct(i, b'*') || tokens.is_punct(i, b'{')) {
        return Ok(None);
    }
    match find_from_specifier(tokens, i) {
        Some(spec) => {
            let (mut site, next) = finish_statement(tokens, spec, false, file)?;
            site.type_only = type_only;
            Ok(Some((site, next)))
        }
        None => Ok(None),
    }
}

/// Walk an import/export clause up to `from '<specifier>'`.
///
/// Gives up at `;`, `(` or `=`, none of which can appear in the clause.
fn find_from_specifier(tokens: &SourceTokens<'_>, mut i: usize) -> Option<usize> {
    while i < tokens.len() {
        if tokens.is_punct(i, b'{') {
            i = tokens.skip_group(i);
            continue;
        }
        if tokens.is_punct(i, b';') || tokens.is_punct(i, b'(') || tokens.is_punct(i, b'=') {
            return None;
        }
        if tokens.is_ident(i, "from")
            && tokens.get(i + 1).map(|t| t.kind) == Some(TokenKind::Str)
        {
            return Some(i + 1);
        }
        i += 1;
    }
    None
}

/// Build a site from the specifier token at `spec`, reading an optional
/// `with { type: '...' }` / `assert { ... }` clause after it.
fn finish_statement(
    tokens: &SourceTokens<'_>,
    spec: usize,
    dynamic: bool,
    file: &Path,
) -> BuildResult<(ImportSite, usize)> {
    let spec_token = tokens.code[spec];
    let mut site = ImportSite {
        specifier: spec_token.string_value(tokens.source).unwrap_or_default(),
        specifier_range: spec_token.start..spec_token.end,
        assertion: None,
        clause_range: None,
        dynamic,
        type_only: false,
    };

    let keyword = spec + 1;
    let mut next = spec + 1;
    if (tokens.is_ident(keyword, "with") || tokens.is_ident(keyword, "assert"))
        && tokens.is_punct(keyword + 1, b'{')
    {
        let end = tokens.skip_group(keyword + 1);
        site.assertion = read_type_entry(tokens, keyword + 2, end, file)?;
        site.clause_range = Some(spec_token.end..tokens.code[end - 1].end);
        next = end;
    }
    Ok((site, next))
}

/// `import(<arg> [, { with: { type: '...' } }])`, `open` is the `(`
fn scan_dynamic(
    tokens: &SourceTokens<'_>,
    open: usize,
    file: &Path,
) -> BuildResult<Option<ImportSite>> {
    let arg = open + 1;
    let Some(arg_token) = tokens.get(arg).copied() else {
        return Ok(None);
    };
    let literal = matches!(
        arg_token.kind,
        TokenKind::Str | TokenKind::Template { interpolated: false }
    );
    let ends_argument = tokens.is_punct(arg + 1, b')') || tokens.is_punct(arg + 1, b',');
    if !literal || !ends_argument {
        return Ok(None);
    }

    let mut site = ImportSite {
        specifier: arg_token.string_value(tokens.source).unwrap_or_default(),
        specifier_range: arg_token.start..arg_token.end,
        assertion: None,
        clause_range: None,
        dynamic: true,
        type_only: false,
    };

    if tokens.is_punct(arg + 1, b',') && tokens.is_punct(arg + 2, b'{') {
        let options_end = tokens.skip_group(arg + 2);
        let mut i = arg + 3;
        while i < options_end {
            let is_key = tokens.is_ident(i, "with") || tokens.is_ident(i, "assert");
            if is_key && tokens.is_punct(i + 1, b':') && tokens.is_punct(i + 2, b'{') {
                let inner_end = tokens.skip_group(i + 2);
                site.assertion = read_type_entry(tokens, i + 3, inner_end, file)?;
                break;
            }
            i += 1;
        }
        let mut clause_end = tokens.code[options_end - 1].end;
        // trailing comma before `)`
        if tokens.is_punct(options_end, b',') {
            clause_end = tokens.code[options_end].end;
        }
        if site.assertion.is_some() {
            site.clause_range = Some(arg_token.end..clause_end);
        }
    }

    Ok(Some(site))
}

/// Read `type: '<kind>'` between `from` and `to`
fn read_type_entry(
    tokens: &SourceTokens<'_>,
    from: usize,
    to: usize,
    file: &Path,
) -> BuildResult<Option<AssertionKind>> {
    let mut i = from;
    while i + 2 < to {
        let key = tokens.is_ident(i, "type")
            || tokens
                .get(i)
                .filter(|t| t.kind == TokenKind::Str)
                .and_then(|t| t.string_value(tokens.source))
                .is_some_and(|v| v == "type");
        if key && tokens.is_punct(i + 1, b':') {
            let Some(value) = tokens
                .get(i + 2)
                .and_then(|t| t.string_value(tokens.source))
            else {
                return Ok(None);
            };
            return value.parse::<AssertionKind>().map(Some).map_err(|message| {
                BuildError::Compile {
                    file: file.to_path_buf(),
                    message,
                }
            });
        }
        i += 1;
    }
    Ok(None)
}
