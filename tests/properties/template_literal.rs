//! Property tests for embedding stylesheet text in a template literal.

use proptest::prelude::*;

use blueprintui::domain::services::assertions::to_template_literal;

/// Undo the escaping a JavaScript template literal parser would undo
fn unescape(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the literal evaluates back to the original text.
    #[test]
    fn property_template_literal_preserves_text(text in "[ -~\n\t]{0,80}") {
        let literal = to_template_literal(&text);
        prop_assert!(literal.starts_with('`') && literal.ends_with('`'));
        prop_assert_eq!(unescape(&literal), text);
    }

    /// PROPERTY: no unescaped backtick or substitution survives inside.
    #[test]
    fn property_template_literal_has_no_open_substitution(text in "[`$\\\\{}a ]{0,40}") {
        let literal = to_template_literal(&text);
        let inner: Vec<char> = literal[1..literal.len() - 1].chars().collect();
        let mut i = 0;
        while i < inner.len() {
            match inner[i] {
                '\\' => i += 2,
                '`' => prop_assert!(false, "unescaped backtick in {}", literal),
                '$' => prop_assert!(false, "unescaped $ in {}", literal),
                _ => i += 1,
            }
        }
    }
}
