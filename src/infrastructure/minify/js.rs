//! Token-level JavaScript compaction
//!
//! Drops comments and collapses the whitespace between tokens. Literal
//! tokens (strings, templates, regular expressions) are copied untouched,
//! and a gap that held a line break keeps one so automatic semicolon
//! insertion still sees it. `/*!` banners and `//#` pragmas survive.

use std::path::Path;

use crate::domain::ports::minifier::Minifier;
use crate::domain::services::lexer::{tokenize, Token, TokenKind};
use crate::error::BuildResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceJsMinifier;

fn is_kept_comment(token: &Token, source: &str) -> bool {
    let text = token.text(source);
    match token.kind {
        TokenKind::BlockComment => text.starts_with("/*!"),
        TokenKind::LineComment => text.starts_with("//#") || text.starts_with("//@"),
        _ => false,
    }
}

impl Minifier for WhitespaceJsMinifier {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn minify(&self, path: &Path, code: &str) -> BuildResult<String> {
        let tokens = tokenize(code, path)?;
        let mut out = String::with_capacity(code.len());
        let mut cursor = 0usize;
        let mut gap_newline = false;
        let mut gap = false;

        for token in &tokens {
            let between = &code[cursor..token.start];
            gap |= !between.is_empty();
            gap_newline |= between.contains('\n');
            cursor = token.end;

            if token.is_comment() && !is_kept_comment(token, code) {
                gap = true;
                gap_newline |= token.kind == TokenKind::LineComment
                    || token.text(code).contains('\n');
                continue;
            }

            if gap && !out.is_empty() && !out.ends_with('\n') {
                out.push(if gap_newline { '\n' } else { ' ' });
            }
            out.push_str(token.text(code));
            // a kept line comment runs to the end of its line
            if token.kind == TokenKind::LineComment {
                out.push('\n');
            }
            gap = false;
            gap_newline = false;
        }

        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minify(code: &str) -> String {
        WhitespaceJsMinifier.minify(Path::new("a.js"), code).unwrap()
    }

    #[test]
    fn strips_comments_and_indentation() {
        let out = minify("/** Alert */\nexport class Alert {\n    // field\n    open = false;\n}\n");
        assert_eq!(out, "export class Alert {\nopen = false;\n}\n");
    }

    #[test]
    fn literals_are_untouched() {
        let out = minify("const t = `a\n\n  b`;   const s = '  /* no */  ';");
        assert_eq!(out, "const t = `a\n\n  b`; const s = '  /* no */  ';\n");
    }

    #[test]
    fn banners_and_pragmas_survive() {
        let out = minify("/*! MIT */\nexport {};\n//# sourceMappingURL=a.js.map\n");
        assert_eq!(out, "/*! MIT */\nexport {};\n//# sourceMappingURL=a.js.map\n");
    }

    #[test]
    fn line_break_is_kept_for_asi() {
        let out = minify("let a = b\n/* c */\n(c)");
        assert_eq!(out, "let a = b\n(c)\n");
    }
}
