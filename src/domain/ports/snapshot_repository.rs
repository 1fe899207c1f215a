//! SnapshotRepository port - persistence of the API lockfile
//!
//! Keeps the drift lock independent of where the snapshot is stored.

use std::path::Path;

use crate::domain::entities::LockSnapshot;
use crate::error::BuildResult;

pub trait SnapshotRepository {
    /// Load the snapshot at `path`, `None` if no lockfile exists yet
    fn load(&self, path: &Path) -> BuildResult<Option<LockSnapshot>>;

    /// Replace the snapshot at `path`
    fn save(&self, path: &Path, snapshot: &LockSnapshot) -> BuildResult<()>;
}
