//! External compiler process
//!
//! Runs the configured command once per module with esbuild-compatible
//! flags: `--loader=ts|js`, `--sourcefile=<path>`, `--sourcemap=inline`
//! when source maps are on, and `--tsconfig-raw=<json>` when the project
//! has a tsconfig.

use std::path::Path;

use crate::domain::ports::transpiler::{CompileRequest, Transpiler};
use crate::error::{BuildError, BuildResult};

use super::process::run_filter;

#[derive(Debug, Clone)]
pub struct CommandTranspiler {
    program: String,
    args: Vec<String>,
    tsconfig_raw: Option<String>,
}

impl CommandTranspiler {
    /// Build from a command line; the first element is the program
    pub fn new(command: &[String]) -> BuildResult<Self> {
        let (program, args) = command.split_first().ok_or_else(|| {
            BuildError::phase("compile", "compiler command is empty")
        })?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            tsconfig_raw: None,
        })
    }

    /// Forward the tsconfig at `path`, if it exists
    pub fn with_tsconfig(mut self, path: &Path) -> BuildResult<Self> {
        if path.is_file() {
            self.tsconfig_raw = Some(std::fs::read_to_string(path)?);
        } else {
            log::debug!("no tsconfig at {}, compiling with defaults", path.display());
        }
        Ok(self)
    }

    fn arguments(&self, request: &CompileRequest) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(format!("--loader={}", request.loader()));
        args.push(format!("--sourcefile={}", request.path.display()));
        if request.sourcemap {
            args.push("--sourcemap=inline".to_string());
        }
        if let Some(raw) = &self.tsconfig_raw {
            args.push(format!("--tsconfig-raw={}", raw));
        }
        args
    }
}

impl Transpiler for CommandTranspiler {
    fn name(&self) -> &str {
        &self.program
    }

    fn compile(&self, request: &CompileRequest) -> BuildResult<String> {
        log::trace!("{} {}", self.program, request.path.display());
        run_filter(
            &self.program,
            &self.arguments(request),
            &request.code,
            &request.path,
        )
    }
}
