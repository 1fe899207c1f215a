//! Controller state machine

use crate::error::{BuildError, BuildResult};

/// Where the controller is between and during cycles.
///
/// `Idle -> Building -> Success | Failed -> Building -> ...`. A cycle can
/// only begin from a non-building state, so cycles never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildState {
    #[default]
    Idle,
    Building,
    Success,
    Failed,
}

impl BuildState {
    pub fn begin(&mut self) -> BuildResult<()> {
        if *self == BuildState::Building {
            return Err(BuildError::phase(
                "controller",
                "a build cycle is already running",
            ));
        }
        *self = BuildState::Building;
        Ok(())
    }

    pub fn finish(&mut self, success: bool) {
        *self = if success {
            BuildState::Success
        } else {
            BuildState::Failed
        };
    }

    pub fn is_building(&self) -> bool {
        *self == BuildState::Building
    }
}
