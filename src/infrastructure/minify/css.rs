//! Stylesheet minification with lightningcss

use std::path::Path;

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

use crate::domain::ports::minifier::Minifier;
use crate::error::{BuildError, BuildResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct CssMinifier;

impl Minifier for CssMinifier {
    fn name(&self) -> &str {
        "lightningcss"
    }

    fn minify(&self, path: &Path, code: &str) -> BuildResult<String> {
        let error = |message: String| BuildError::Compile {
            file: path.to_path_buf(),
            message,
        };

        let options = ParserOptions {
            filename: path.display().to_string(),
            ..ParserOptions::default()
        };
        let mut sheet = StyleSheet::parse(code, options).map_err(|e| error(e.to_string()))?;
        sheet
            .minify(MinifyOptions::default())
            .map_err(|e| error(e.to_string()))?;
        let printed = sheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .map_err(|e| error(e.to_string()))?;
        Ok(printed.code)
    }
}
