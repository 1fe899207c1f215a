//! File-backed lockfile repository
//!
//! Implements the SnapshotRepository port. The snapshot is stored verbatim:
//! no parsing, no re-serialization, so comparisons stay byte-for-byte.

use std::path::Path;

use crate::domain::entities::LockSnapshot;
use crate::domain::ports::file_system::{FileSystem, FsError};
use crate::domain::ports::snapshot_repository::SnapshotRepository;
use crate::error::BuildResult;
use crate::infrastructure::fs::LocalFs;

/// Lockfile repository over a [`FileSystem`]
pub struct FsSnapshotRepository<F: FileSystem = LocalFs> {
    fs: F,
}

impl FsSnapshotRepository<LocalFs> {
    /// Create a new repository with the default file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl<F: FileSystem> FsSnapshotRepository<F> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

impl Default for FsSnapshotRepository<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> SnapshotRepository for FsSnapshotRepository<F> {
    fn load(&self, path: &Path) -> BuildResult<Option<LockSnapshot>> {
        match self.fs.read(path) {
            Ok(content) => Ok(Some(LockSnapshot::new(content))),
            Err(FsError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, path: &Path, snapshot: &LockSnapshot) -> BuildResult<()> {
        self.fs.write(path, snapshot.content())?;
        log::debug!("lockfile written to {}", path.display());
        Ok(())
    }
}
