//! Minification of `html`, `svg` and `css` tagged template literals
//!
//! Only the literal chunks are touched; `${...}` substitutions are copied
//! as written. Whitespace runs collapse to a single space and, in markup
//! templates, complete `<!-- -->` comments are removed.

use std::path::Path;

use crate::domain::ports::minifier::Minifier;
use crate::domain::services::lexer::{template_chunks, tokenize, TokenKind};
use crate::domain::services::{apply_edits, TextEdit};
use crate::error::BuildResult;

const MARKUP_TAGS: &[&str] = &["html", "svg"];
const STYLE_TAGS: &[&str] = &["css"];

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLiteralMinifier;

impl Minifier for HtmlLiteralMinifier {
    fn name(&self) -> &str {
        "html-literals"
    }

    fn minify(&self, path: &Path, code: &str) -> BuildResult<String> {
        let tokens: Vec<_> = tokenize(code, path)?
            .into_iter()
            .filter(|t| !t.is_comment())
            .collect();

        let mut edits = Vec::new();
        for pair in tokens.windows(2) {
            let (tag, literal) = (&pair[0], &pair[1]);
            if !matches!(literal.kind, TokenKind::Template { .. }) || tag.kind != TokenKind::Ident
            {
                continue;
            }
            let name = tag.text(code);
            let markup = MARKUP_TAGS.contains(&name);
            if !markup && !STYLE_TAGS.contains(&name) {
                continue;
            }

            for chunk in template_chunks(code, literal, path)? {
                let original = &code[chunk.clone()];
                let compact = compact_chunk(original, markup);
                if compact != original {
                    edits.push(TextEdit::new(chunk, compact));
                }
            }
        }

        if edits.is_empty() {
            return Ok(code.to_string());
        }
        log::trace!("{}: {} template chunks compacted", path.display(), edits.len());
        Ok(apply_edits(code, edits))
    }
}

fn compact_chunk(chunk: &str, markup: bool) -> String {
    let text = if markup {
        strip_html_comments(chunk)
    } else {
        chunk.to_string()
    };
    collapse_whitespace(&text)
}

fn strip_html_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("<!--") {
        let Some(close) = rest[open..].find("-->") else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 3..];
    }
    out.push_str(rest);
    out
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
