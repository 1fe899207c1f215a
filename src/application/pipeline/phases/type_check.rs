//! `type-check`: whole-project diagnostics during development builds

use crate::application::pipeline::{CycleContext, Phase};
use crate::domain::entities::Bundle;
use crate::domain::ports::TypeChecker;
use crate::error::BuildResult;

/// Most diagnostic lines carried in one warning
const MAX_REPORTED_LINES: usize = 20;

/// Runs the type checker once the cycle's modules are compiled.
///
/// Findings never fail the cycle; they are reported as a warning so a watch
/// session keeps rebuilding while types are broken.
pub struct TypeCheck {
    checker: Option<Box<dyn TypeChecker>>,
}

impl TypeCheck {
    pub fn new(checker: Option<Box<dyn TypeChecker>>) -> Self {
        Self { checker }
    }
}

impl Phase for TypeCheck {
    fn name(&self) -> &'static str {
        "type-check"
    }

    fn generate_bundle(&mut self, _bundle: &mut Bundle, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        let Some(checker) = &self.checker else {
            return Ok(());
        };
        match checker.check(&cx.project.root, &cx.project.tsconfig()) {
            Ok(lines) if lines.is_empty() => {
                log::debug!("type-check: {} reported no problems", checker.name());
            }
            Ok(lines) => {
                let mut message = format!("type check failed ({} lines of output)", lines.len());
                for line in lines.iter().take(MAX_REPORTED_LINES) {
                    message.push('\n');
                    message.push_str(line);
                }
                if lines.len() > MAX_REPORTED_LINES {
                    message.push_str("\n...");
                }
                cx.warn(message);
            }
            Err(err) => cx.warn(format!("type check skipped: {}", err)),
        }
        Ok(())
    }
}
