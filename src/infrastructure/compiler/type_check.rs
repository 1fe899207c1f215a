//! External type checker (`[bundler] type_check`, `tsc --noEmit` by default)

use std::path::Path;
use std::process::Command;

use crate::domain::ports::TypeChecker;
use crate::error::{BuildError, BuildResult};

#[derive(Debug, Clone)]
pub struct CommandTypeChecker {
    program: String,
    args: Vec<String>,
}

impl CommandTypeChecker {
    /// Build from a command line; `--project <tsconfig>` is appended per run
    pub fn new(command: &[String]) -> BuildResult<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| BuildError::phase("type-check", "type check command is empty"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl TypeChecker for CommandTypeChecker {
    fn name(&self) -> &str {
        &self.program
    }

    fn check(&self, project_root: &Path, tsconfig: &Path) -> BuildResult<Vec<String>> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(project_root);
        if tsconfig.is_file() {
            command.arg("--project").arg(tsconfig);
        }

        let output = command.output().map_err(|e| {
            BuildError::phase(
                "type-check",
                format!("could not start '{}': {}", self.program, e),
            )
        })?;
        if output.status.success() {
            return Ok(Vec::new());
        }

        let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .chain(String::from_utf8_lossy(&output.stderr).lines())
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        if lines.is_empty() {
            lines.push(format!("'{}' exited with {}", self.program, output.status));
        }
        Ok(lines)
    }
}
