//! One-shot and watch drivers around a build job

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::application::pipeline::{BuildJob, CycleStats};
use crate::domain::ports::ChangeSource;
use crate::domain::value_objects::path_to_slash;
use crate::error::{BuildError, BuildResult};

use super::event::BuildEvent;
use super::state::BuildState;

/// Outcome of a single cycle
#[derive(Debug)]
pub enum BuildOutcome {
    Success {
        cycle: u64,
        stats: CycleStats,
        warnings: Vec<String>,
        duration: Duration,
    },
    Failed {
        cycle: u64,
        error: BuildError,
        warnings: Vec<String>,
        duration: Duration,
    },
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success { .. })
    }

    pub fn duration(&self) -> Duration {
        match self {
            BuildOutcome::Success { duration, .. } | BuildOutcome::Failed { duration, .. } => {
                *duration
            }
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            BuildOutcome::Success { warnings, .. } | BuildOutcome::Failed { warnings, .. } => {
                warnings
            }
        }
    }
}

pub struct BuildController {
    job: BuildJob,
    state: BuildState,
}

impl BuildController {
    pub fn new(job: BuildJob) -> Self {
        Self {
            job,
            state: BuildState::Idle,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn job(&self) -> &BuildJob {
        &self.job
    }

    /// Run exactly one cycle
    pub fn run_once(&mut self) -> BuildResult<BuildOutcome> {
        self.cycle(&mut |_| {})
    }

    /// Run exactly one cycle, reporting its events
    pub fn run_once_reporting(
        &mut self,
        mut on_event: impl FnMut(BuildEvent),
    ) -> BuildResult<BuildOutcome> {
        self.cycle(&mut on_event)
    }

    /// Initial cycle, then one cycle per batch from `changes` until
    /// `running` is cleared. A failing cycle is reported and the loop keeps
    /// listening; only a broken change source ends the session early.
    pub fn watch(
        &mut self,
        running: &AtomicBool,
        changes: &mut dyn ChangeSource,
        mut on_event: impl FnMut(BuildEvent),
    ) -> BuildResult<()> {
        on_event(BuildEvent::WatchStarted {
            source: path_to_slash(&self.job.project().source_root()),
        });

        self.cycle(&mut on_event)?;
        while let Some(batch) = changes.next_batch(running)? {
            for path in &batch {
                on_event(BuildEvent::FileChanged {
                    path: path_to_slash(path),
                });
            }
            self.cycle(&mut on_event)?;
        }

        on_event(BuildEvent::Shutdown);
        Ok(())
    }

    /// One cycle with its events. The cycle's handle is closed before this
    /// returns, whatever the result.
    fn cycle(&mut self, on_event: &mut dyn FnMut(BuildEvent)) -> BuildResult<BuildOutcome> {
        self.state.begin()?;
        on_event(BuildEvent::Start {
            cycle: self.job.cycles() + 1,
        });

        let report = self.job.run_cycle();
        let cycle = report.handle.cycle();
        for warning in &report.warnings {
            on_event(BuildEvent::Warning {
                message: warning.clone(),
            });
        }

        let outcome = match report.result {
            Ok(stats) => {
                on_event(BuildEvent::Complete {
                    cycle,
                    duration_ms: report.duration.as_millis() as u64,
                    modules: stats.modules,
                    written: stats.written,
                    suppressed: stats.suppressed,
                });
                BuildOutcome::Success {
                    cycle,
                    stats,
                    warnings: report.warnings,
                    duration: report.duration,
                }
            }
            Err(error) => {
                on_event(BuildEvent::Error {
                    message: error.to_string(),
                });
                BuildOutcome::Failed {
                    cycle,
                    error,
                    warnings: report.warnings,
                    duration: report.duration,
                }
            }
        };
        report.handle.close();
        self.state.finish(outcome.is_success());
        Ok(outcome)
    }
}
