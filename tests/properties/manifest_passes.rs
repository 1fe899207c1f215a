//! Property tests for manifest post-processing.

use std::path::Path;

use proptest::prelude::*;

use blueprintui::domain::entities::{ManifestDocument, ModuleDoc};
use blueprintui::domain::services::ManifestPasses;

fn module_path() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[a-z][a-z0-9-]{0,8}").unwrap();
    let prefix = prop_oneof![
        Just(String::new()),
        Just("src/".to_string()),
        Just("/work/lib/src/".to_string()),
    ];
    (
        prefix,
        proptest::collection::vec(segment, 1..=3),
        prop_oneof!["ts", "js"],
    )
        .prop_map(|(prefix, segments, ext)| format!("{}{}.{}", prefix, segments.join("/"), ext))
}

fn passes() -> ManifestPasses {
    ManifestPasses::new("./src", Path::new("/work/lib/src"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: after the passes, modules are sorted by path and no path
    /// carries the source root or the authoring extension.
    #[test]
    fn property_passes_canonicalize_and_sort(
        paths in proptest::collection::vec(module_path(), 0..12),
    ) {
        let mut document = ManifestDocument::new(paths.iter().map(ModuleDoc::new).collect());
        passes().apply(&mut document);

        let out: Vec<&str> = document.modules.iter().map(|m| m.path.as_str()).collect();
        let mut sorted = out.clone();
        sorted.sort();
        prop_assert_eq!(&out, &sorted);
        for path in out {
            prop_assert!(!path.starts_with("src/"), "{}", path);
            prop_assert!(!path.starts_with("/work/"), "{}", path);
            prop_assert!(path.ends_with(".js"), "{}", path);
        }
    }

    /// PROPERTY: the passes are idempotent.
    #[test]
    fn property_passes_are_idempotent(
        paths in proptest::collection::vec(module_path(), 0..12),
    ) {
        let mut once = ManifestDocument::new(paths.iter().map(ModuleDoc::new).collect());
        passes().apply(&mut once);
        let mut twice = once.clone();
        passes().apply(&mut twice);
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: input order does not affect the serialized manifest.
    #[test]
    fn property_serialization_ignores_input_order(
        paths in proptest::collection::vec(module_path(), 0..8),
    ) {
        let mut forward = ManifestDocument::new(paths.iter().map(ModuleDoc::new).collect());
        let mut backward = ManifestDocument::new(paths.iter().rev().map(ModuleDoc::new).collect());
        passes().apply(&mut forward);
        passes().apply(&mut backward);
        prop_assert_eq!(
            forward.to_json_string().unwrap(),
            backward.to_json_string().unwrap()
        );
    }
}
