//! Bundling pipeline
//!
//! A [`BuildJob`] owns the ordered phase list and runs one cycle at a time:
//! `build_start` → graph load → `graph_loaded` → `transform` per module →
//! `render_chunk` per chunk → `generate_bundle` → write → `write_bundle`.

mod graph;
mod job;
mod phase;
pub mod phases;

pub use graph::{GraphLoader, ModuleGraph};
pub use job::{BuildJob, BundleHandle, CycleReport, CycleStats};
pub use phase::{CycleContext, Phase, PhaseSlot};
pub use phases::{standard_phases, Toolchain, PHASE_ORDER};
