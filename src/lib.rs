//! Blueprint UI - build tooling for web component libraries
//!
//! Drives a fixed-order bundling pipeline over a library's sources, derives
//! a custom elements manifest from source annotations, and guards the public
//! API against unnoticed drift through a committed lockfile.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    ApiOptions, ApiUseCase, BuildController, BuildEvent, BuildOutcome, ManifestGenerator,
};
pub use config::{Config, ProjectContext};
pub use domain::value_objects::BuildMode;
pub use error::{BuildError, BuildResult, ErrorCategory};
