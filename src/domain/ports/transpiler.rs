//! Transpiler port - the external compiler behind the `compile` phase
//!
//! The pipeline treats the compiler as an opaque source-to-source function.
//! Resolution and bundling stay on this side of the boundary.

use std::path::PathBuf;

use crate::error::BuildResult;

/// One module handed to the compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub path: PathBuf,
    pub code: String,
    pub sourcemap: bool,
}

impl CompileRequest {
    pub fn new(path: impl Into<PathBuf>, code: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code: code.into(),
            sourcemap: false,
        }
    }

    pub fn with_sourcemap(mut self, sourcemap: bool) -> Self {
        self.sourcemap = sourcemap;
        self
    }

    /// `ts` for TypeScript sources, `js` otherwise
    pub fn loader(&self) -> &'static str {
        match self.path.extension().and_then(|e| e.to_str()) {
            Some("ts") | Some("tsx") | Some("mts") => "ts",
            _ => "js",
        }
    }
}

/// Source-to-source compiler
pub trait Transpiler {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Compile one module; errors abort the current cycle
    fn compile(&self, request: &CompileRequest) -> BuildResult<String>;
}
