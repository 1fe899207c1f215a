//! `minify-html-literals` and `minify-javascript`

use std::path::PathBuf;

use crate::application::pipeline::{CycleContext, Phase};
use crate::domain::entities::OutputChunk;
use crate::domain::ports::Minifier;
use crate::error::{BuildError, BuildResult};

fn minify_chunk(
    phase: &'static str,
    minifier: &dyn Minifier,
    chunk: &mut OutputChunk,
) -> BuildResult<()> {
    let path = PathBuf::from(chunk.file_name());
    let code = minifier.minify(&path, chunk.code()).map_err(|e| match e {
        BuildError::Phase { .. } | BuildError::Parse { .. } | BuildError::Compile { .. } => e,
        other => BuildError::phase(phase, other.to_string()),
    })?;
    chunk.set_code(code);
    Ok(())
}

/// Collapses markup inside `html`, `svg` and `css` tagged templates
pub struct MinifyHtmlLiterals {
    minifier: Box<dyn Minifier>,
}

impl MinifyHtmlLiterals {
    pub fn new(minifier: Box<dyn Minifier>) -> Self {
        Self { minifier }
    }
}

impl Phase for MinifyHtmlLiterals {
    fn name(&self) -> &'static str {
        "minify-html-literals"
    }

    fn render_chunk(&mut self, chunk: &mut OutputChunk, _cx: &mut CycleContext<'_>) -> BuildResult<()> {
        minify_chunk(self.name(), self.minifier.as_ref(), chunk)
    }
}

/// Minifies every emitted chunk
pub struct MinifyJavaScript {
    minifier: Box<dyn Minifier>,
}

impl MinifyJavaScript {
    pub fn new(minifier: Box<dyn Minifier>) -> Self {
        Self { minifier }
    }
}

impl Phase for MinifyJavaScript {
    fn name(&self) -> &'static str {
        "minify-javascript"
    }

    fn render_chunk(&mut self, chunk: &mut OutputChunk, _cx: &mut CycleContext<'_>) -> BuildResult<()> {
        log::trace!("{}: {}", self.minifier.name(), chunk.file_name());
        minify_chunk(self.name(), self.minifier.as_ref(), chunk)
    }
}
