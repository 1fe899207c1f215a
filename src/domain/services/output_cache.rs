//! Content-addressed output cache
//!
//! Suppresses rewriting generated code whose bytes did not change since the
//! last emit, so tools watching the output directory see no spurious events
//! during watch rebuilds. Lives for the whole process; nothing is persisted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// Extensions treated as generated code
pub const CODE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

#[derive(Debug, Clone, Default)]
pub struct OutputCache {
    entries: HashMap<PathBuf, ContentHash>,
}

impl OutputCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `bytes` must be written to `path`.
    ///
    /// Non-code paths always pass and are not recorded. For code paths the
    /// entry is updated exactly when `true` is returned.
    pub fn should_write(&mut self, path: &Path, bytes: &[u8]) -> bool {
        if self.is_unchanged(path, bytes) {
            return false;
        }
        self.record(path, bytes);
        true
    }

    /// Whether `bytes` match the last recorded emit of the code path `path`
    pub fn is_unchanged(&self, path: &Path, bytes: &[u8]) -> bool {
        is_code_path(path)
            && self
                .entries
                .get(path)
                .is_some_and(|previous| *previous == ContentHash::from_bytes(bytes))
    }

    /// Remember `bytes` as the content now on disk at `path`
    pub fn record(&mut self, path: &Path, bytes: &[u8]) {
        if is_code_path(path) {
            self.entries
                .insert(path.to_path_buf(), ContentHash::from_bytes(bytes));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_code_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CODE_EXTENSIONS.contains(&ext))
}
