//! External JavaScript minifier (`[bundler] js_minifier`)

use std::path::Path;

use crate::domain::ports::minifier::Minifier;
use crate::error::{BuildError, BuildResult};
use crate::infrastructure::compiler::run_filter;

#[derive(Debug, Clone)]
pub struct CommandMinifier {
    program: String,
    args: Vec<String>,
}

impl CommandMinifier {
    pub fn new(command: &[String]) -> BuildResult<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| BuildError::phase("minify-javascript", "minifier command is empty"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Minifier for CommandMinifier {
    fn name(&self) -> &str {
        &self.program
    }

    fn minify(&self, path: &Path, code: &str) -> BuildResult<String> {
        run_filter(&self.program, &self.args, code, path)
    }
}
