//! Api Use Case

use crate::application::manifest::{ManifestGenerator, ManifestOptions};
use crate::config::ProjectContext;
use crate::domain::entities::LockSnapshot;
use crate::domain::ports::{FileSystem, SnapshotRepository};
use crate::domain::services::{DriftLock, DriftStatus};
use crate::error::BuildResult;

use super::options::ApiOptions;
use super::result::ApiResult;

/// Verifies and updates the manifest lockfile
pub struct ApiUseCase<SR, FS>
where
    SR: SnapshotRepository,
    FS: FileSystem,
{
    snapshots: SR,
    fs: FS,
}

impl<SR, FS> ApiUseCase<SR, FS>
where
    SR: SnapshotRepository,
    FS: FileSystem,
{
    pub fn new(snapshots: SR, fs: FS) -> Self {
        Self { snapshots, fs }
    }

    /// Generate the manifest, compare, then update if asked.
    ///
    /// The comparison always runs against the lockfile as it was on entry,
    /// so `--test --update` reports the drift it is about to accept. A
    /// generation failure leaves the lockfile untouched.
    pub fn execute(&self, project: &ProjectContext, options: ApiOptions) -> BuildResult<ApiResult> {
        let generator = ManifestGenerator::new(&self.fs, ManifestOptions::from_project(project));
        let generated = generator.render()?;

        let lockfile = project.lockfile();
        let previous = self.snapshots.load(&lockfile)?;
        let drift = DriftLock::new();
        let status = drift.check(&generated, previous.as_ref());
        let summary = match (&previous, status) {
            (Some(locked), DriftStatus::Drifted) => {
                Some(drift.summarize(locked.content(), &generated))
            }
            _ => None,
        };
        log::debug!("api lockfile {}: {:?}", lockfile.display(), status);

        let updated = options.update;
        if updated {
            self.snapshots
                .save(&lockfile, &LockSnapshot::new(generated.clone()))?;
        }

        Ok(ApiResult {
            lockfile,
            status,
            summary,
            locked: previous.map(|s| s.content().to_string()),
            generated,
            tested: options.test,
            updated,
        })
    }
}
