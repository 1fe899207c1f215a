//! API drift lock
//!
//! Compares a freshly generated manifest with the committed lockfile. The
//! comparison is byte-for-byte: formatting or line-ending changes count as
//! drift just like API changes.

use similar::{ChangeTag, TextDiff};

use crate::domain::entities::LockSnapshot;

/// Outcome of comparing the generated manifest to the lockfile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftStatus {
    /// Lockfile and manifest are byte-identical
    InSync,
    /// Lockfile exists but differs
    Drifted,
    /// No lockfile yet
    Missing,
}

impl DriftStatus {
    pub fn is_in_sync(&self) -> bool {
        matches!(self, DriftStatus::InSync)
    }
}

/// Line statistics of a drift, for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriftSummary {
    pub additions: usize,
    pub deletions: usize,
}

impl DriftSummary {
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DriftLock;

impl DriftLock {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, generated: &str, snapshot: Option<&LockSnapshot>) -> DriftStatus {
        match snapshot {
            None => DriftStatus::Missing,
            Some(snapshot) if snapshot.matches(generated) => DriftStatus::InSync,
            Some(_) => DriftStatus::Drifted,
        }
    }

    /// Count changed lines between the lockfile and the generated manifest
    pub fn summarize(&self, locked: &str, generated: &str) -> DriftSummary {
        let diff = TextDiff::from_lines(locked, generated);
        let mut summary = DriftSummary::default();
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => summary.additions += 1,
                ChangeTag::Delete => summary.deletions += 1,
                ChangeTag::Equal => {}
            }
        }
        summary
    }
}
