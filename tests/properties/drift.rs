//! Property tests for the drift lock.

use proptest::prelude::*;

use blueprintui::domain::entities::LockSnapshot;
use blueprintui::domain::services::{DriftLock, DriftStatus};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: drift is exact byte equality against the snapshot.
    #[test]
    fn property_drift_is_byte_equality(
        locked in "[ -~\n]{0,120}",
        generated in "[ -~\n]{0,120}",
    ) {
        let lock = DriftLock::new();
        let status = lock.check(&generated, Some(&LockSnapshot::new(locked.clone())));
        if locked == generated {
            prop_assert_eq!(status, DriftStatus::InSync);
        } else {
            prop_assert_eq!(status, DriftStatus::Drifted);
        }
        prop_assert_eq!(lock.check(&generated, None), DriftStatus::Missing);
    }

    /// PROPERTY: identical texts summarize to no changed lines.
    #[test]
    fn property_identical_summary_is_empty(text in "[ -~\n]{0,200}") {
        let summary = DriftLock::new().summarize(&text, &text);
        prop_assert_eq!(summary.additions, 0);
        prop_assert_eq!(summary.deletions, 0);
    }
}
