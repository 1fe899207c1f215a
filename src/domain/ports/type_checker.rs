//! Type checker port - whole-project diagnostics in development builds

use std::path::Path;

use crate::error::BuildResult;

/// Checks the project without emitting anything
pub trait TypeChecker {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Diagnostic lines for the project described by `tsconfig`; empty when
    /// the project checks clean. `Err` means the checker could not run.
    fn check(&self, project_root: &Path, tsconfig: &Path) -> BuildResult<Vec<String>>;
}
