//! Phase trait and per-cycle context
//!
//! A phase is a named set of hooks. The job calls every active phase at
//! each hook stage, always in the fixed phase order, so the mode decides
//! only *whether* a phase runs and never *when*.

use std::path::PathBuf;

use crate::config::ProjectContext;
use crate::domain::entities::{Bundle, ModuleUnit, OutputChunk};
use crate::domain::ports::FileSystem;
use crate::domain::services::AssertionTable;
use crate::error::BuildResult;

use super::graph::ModuleGraph;

/// State shared by all phases for the duration of one cycle
pub struct CycleContext<'a> {
    pub project: &'a ProjectContext,
    pub fs: &'a dyn FileSystem,
    /// Absolute source root
    pub source_root: PathBuf,
    /// Absolute output root
    pub out_dir: PathBuf,
    /// Synthesized entry module; set by the entry-points phase
    pub entry: Option<ModuleUnit>,
    /// Filled by the assertion scan pass before any transform runs
    pub assertions: AssertionTable,
    pub warnings: Vec<String>,
}

impl<'a> CycleContext<'a> {
    pub fn new(project: &'a ProjectContext, fs: &'a dyn FileSystem) -> Self {
        Self {
            project,
            fs,
            source_root: project.source_root(),
            out_dir: project.out_dir(),
            entry: None,
            assertions: AssertionTable::new(),
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        if !self.warnings.contains(&message) {
            self.warnings.push(message);
        }
    }
}

/// One pipeline phase. Every hook defaults to a no-op.
pub trait Phase {
    /// Stable kebab-case name, used in logs and errors
    fn name(&self) -> &'static str;

    /// Before the module graph is loaded
    fn build_start(&mut self, _cx: &mut CycleContext<'_>) -> BuildResult<()> {
        Ok(())
    }

    /// After the whole graph is loaded, before any transform
    fn graph_loaded(&mut self, _graph: &ModuleGraph, _cx: &mut CycleContext<'_>) -> BuildResult<()> {
        Ok(())
    }

    /// Rewrite one module's code
    fn transform(
        &mut self,
        _module: &ModuleUnit,
        code: String,
        _cx: &mut CycleContext<'_>,
    ) -> BuildResult<String> {
        Ok(code)
    }

    /// Rewrite one output chunk
    fn render_chunk(&mut self, _chunk: &mut OutputChunk, _cx: &mut CycleContext<'_>) -> BuildResult<()> {
        Ok(())
    }

    /// Inspect or prune the bundle before it is written
    fn generate_bundle(&mut self, _bundle: &mut Bundle, _cx: &mut CycleContext<'_>) -> BuildResult<()> {
        Ok(())
    }

    /// After every chunk is on disk
    fn write_bundle(&mut self, _bundle: &Bundle, _cx: &mut CycleContext<'_>) -> BuildResult<()> {
        Ok(())
    }
}

/// A phase and whether it runs in the current mode
pub struct PhaseSlot {
    pub phase: Box<dyn Phase>,
    pub active: bool,
}

impl PhaseSlot {
    pub fn new(phase: impl Phase + 'static, active: bool) -> Self {
        Self {
            phase: Box::new(phase),
            active,
        }
    }

    pub fn name(&self) -> &'static str {
        self.phase.name()
    }
}
