//! `output-cache`: skip rewriting unchanged chunks during watch rebuilds

use crate::application::pipeline::{CycleContext, Phase};
use crate::domain::entities::Bundle;
use crate::domain::services::OutputCache;
use crate::error::BuildResult;

/// Drops chunks whose bytes match the last emit of the same output path.
///
/// The cache outlives cycles, so the first cycle of a process always writes
/// everything. Hashes are recorded in `write_bundle`, after every chunk of
/// the cycle reached disk; a failed write leaves the previous entries alone.
#[derive(Debug, Default)]
pub struct OutputCachePhase {
    cache: OutputCache,
}

impl OutputCachePhase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Phase for OutputCachePhase {
    fn name(&self) -> &'static str {
        "output-cache"
    }

    fn generate_bundle(&mut self, bundle: &mut Bundle, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        let before = bundle.len();
        let cache = &self.cache;
        bundle.retain(|chunk| {
            !cache.is_unchanged(&cx.out_dir.join(chunk.file_name()), chunk.code().as_bytes())
        });
        let suppressed = before - bundle.len();
        if suppressed > 0 {
            log::trace!("output cache: {} unchanged chunks not rewritten", suppressed);
        }
        Ok(())
    }

    fn write_bundle(&mut self, bundle: &Bundle, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        for chunk in bundle.chunks() {
            self.cache
                .record(&cx.out_dir.join(chunk.file_name()), chunk.code().as_bytes());
        }
        Ok(())
    }
}
