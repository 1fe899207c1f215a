//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BuildController` - One-shot and watch builds over a `BuildJob`
//! - `ApiUseCase` - Verifies and updates the manifest lockfile
//! - `ScaffoldUseCase` - Creates a new library from the embedded template
//!
//! ## Services
//!
//! - `pipeline` - The fixed-order bundling phases and the job that runs them
//! - `ManifestGenerator` - Custom elements manifest from source analysis

pub mod api;
pub mod build;
pub mod manifest;
pub mod pipeline;
pub mod scaffold;

pub use api::{ApiOptions, ApiResult, ApiUseCase};
pub use build::{BuildController, BuildEvent, BuildOutcome, BuildState};
pub use manifest::{ManifestGenerator, ManifestOptions};
pub use pipeline::{standard_phases, BuildJob, CycleStats, Toolchain, PHASE_ORDER};
pub use scaffold::{ScaffoldResult, ScaffoldUseCase, LIBRARY_TOKEN};
