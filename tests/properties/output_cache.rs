//! Property tests for the content-addressed output cache.

use std::path::PathBuf;

use proptest::prelude::*;

use blueprintui::domain::services::OutputCache;

fn code_path() -> impl Strategy<Value = PathBuf> {
    let segment = proptest::string::string_regex("[a-z0-9_-]{1,10}").unwrap();
    (proptest::collection::vec(segment, 1..=3), prop_oneof!["js", "mjs", "cjs"])
        .prop_map(|(segments, ext)| PathBuf::from(format!("/dist/{}.{}", segments.join("/"), ext)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: emitting the same bytes twice writes once.
    #[test]
    fn property_identical_reemit_is_suppressed(
        path in code_path(),
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let mut cache = OutputCache::new();
        prop_assert!(cache.should_write(&path, &bytes));
        prop_assert!(!cache.should_write(&path, &bytes));
        prop_assert_eq!(cache.len(), 1);
    }

    /// PROPERTY: any change of content is written, and the new content
    /// becomes the reference.
    #[test]
    fn property_changed_content_is_written(
        path in code_path(),
        first in proptest::collection::vec(any::<u8>(), 0..128),
        second in proptest::collection::vec(any::<u8>(), 0..128),
    ) {
        prop_assume!(first != second);
        let mut cache = OutputCache::new();
        prop_assert!(cache.should_write(&path, &first));
        prop_assert!(cache.should_write(&path, &second));
        prop_assert!(!cache.should_write(&path, &second));
        prop_assert!(cache.should_write(&path, &first));
    }

    /// PROPERTY: non-code outputs always pass and are never recorded.
    #[test]
    fn property_non_code_outputs_always_write(
        name in "[a-z]{1,10}",
        ext in prop_oneof!["json", "css", "md", "map", "html"],
        bytes in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let path = PathBuf::from(format!("/dist/{}.{}", name, ext));
        let mut cache = OutputCache::new();
        for _ in 0..3 {
            prop_assert!(cache.should_write(&path, &bytes));
        }
        prop_assert!(cache.is_empty());
    }
}
