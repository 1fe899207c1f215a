//! Api result types

use std::path::PathBuf;

use crate::domain::services::{DriftStatus, DriftSummary};

/// Result of an api run
#[derive(Debug, Clone)]
pub struct ApiResult {
    pub lockfile: PathBuf,
    /// Status against the lockfile as it was before any update
    pub status: DriftStatus,
    /// Changed line counts, when a previous lockfile existed and differed
    pub summary: Option<DriftSummary>,
    /// Previous lockfile content
    pub locked: Option<String>,
    /// Freshly generated manifest
    pub generated: String,
    /// Whether `--test` was requested
    pub tested: bool,
    /// Whether the lockfile was rewritten
    pub updated: bool,
}

impl ApiResult {
    /// `--test` was requested and the lockfile did not match
    pub fn test_failed(&self) -> bool {
        self.tested && !self.status.is_in_sync()
    }

    /// File name of the lockfile, for messages
    pub fn lockfile_name(&self) -> String {
        self.lockfile
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.lockfile.display().to_string())
    }
}
