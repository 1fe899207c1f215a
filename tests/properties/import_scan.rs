//! Property tests for the import scanner.

use std::path::Path;

use proptest::prelude::*;

use blueprintui::domain::services::scan_imports;

fn specifier() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[a-z][a-z0-9_-]{0,8}").unwrap();
    (
        prop_oneof![Just("./"), Just("../"), Just("")],
        proptest::collection::vec(segment, 1..=3),
    )
        .prop_map(|(prefix, segments)| format!("{}{}.js", prefix, segments.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: scanning arbitrary text never panics.
    #[test]
    fn property_scan_never_panics(source in "[ -~\n]{0,200}") {
        let _ = scan_imports(&source, Path::new("/lib/src/a.ts"));
    }

    /// PROPERTY: every static import is found, in order, and its range
    /// covers the quoted literal.
    #[test]
    fn property_static_imports_are_found(
        specifiers in proptest::collection::vec(specifier(), 1..6),
        double in any::<bool>(),
    ) {
        let quote = if double { '"' } else { '\'' };
        let source: String = specifiers
            .iter()
            .enumerate()
            .map(|(i, s)| format!("import {{ x{} }} from {}{}{};\n", i, quote, s, quote))
            .collect();

        let sites = scan_imports(&source, Path::new("/lib/src/a.ts")).unwrap();
        let found: Vec<&str> = sites.iter().map(|s| s.specifier.as_str()).collect();
        let expected: Vec<&str> = specifiers.iter().map(String::as_str).collect();
        prop_assert_eq!(found, expected);
        for site in &sites {
            let literal = &source[site.specifier_range.clone()];
            prop_assert_eq!(literal, format!("{}{}{}", quote, site.specifier, quote));
            prop_assert!(site.assertion.is_none());
        }
    }

    /// PROPERTY: specifiers inside comments and strings are not imports.
    #[test]
    fn property_commented_imports_are_ignored(spec in specifier()) {
        let source = format!(
            "// import '{spec}';\n/* import '{spec}'; */\nconst s = \"import '{spec}'\";\n"
        );
        let sites = scan_imports(&source, Path::new("/lib/src/a.ts")).unwrap();
        prop_assert!(sites.is_empty(), "{:?}", sites);
    }
}
