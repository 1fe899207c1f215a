//! Build pipeline controller
//!
//! Drives a [`BuildJob`](crate::application::pipeline::BuildJob) in one-shot
//! or watch mode and reports progress as [`BuildEvent`]s.

mod controller;
mod event;
mod state;

#[cfg(test)]
mod tests;

pub use controller::{BuildController, BuildOutcome};
pub use event::BuildEvent;
pub use state::BuildState;
