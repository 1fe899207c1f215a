//! Minifier port - opaque JS / CSS / markup minification

use std::path::Path;

use crate::error::BuildResult;

/// Source-to-source minifier for a single language
pub trait Minifier {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Minify `code`; `path` is used for diagnostics only
    fn minify(&self, path: &Path, code: &str) -> BuildResult<String>;
}
