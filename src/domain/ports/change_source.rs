//! ChangeSource port - where watch mode learns about edited files

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use crate::error::BuildResult;

/// Produces debounced batches of changed source paths
pub trait ChangeSource {
    /// Block until a batch of changes is ready.
    ///
    /// Returns `Ok(None)` once `running` is cleared or the source is closed.
    fn next_batch(&mut self, running: &AtomicBool) -> BuildResult<Option<Vec<PathBuf>>>;
}
