//! `compile`: before hooks, the Transpiler port, after hooks

use std::path::Path;

use crate::application::pipeline::{CycleContext, Phase};
use crate::domain::entities::{ModuleKind, ModuleUnit};
use crate::domain::ports::{CompileRequest, Transpiler};
use crate::domain::services::{apply_edits, requote, scan_imports, TextEdit};
use crate::domain::value_objects::{is_relative_specifier, replace_extension};
use crate::error::BuildResult;

/// Source-to-source step run around the transpiler
pub trait CompileHook {
    fn name(&self) -> &str;

    fn apply(&self, path: &Path, code: String) -> BuildResult<String>;
}

/// Rewrites relative `.ts`/`.mts` specifiers to the emitted `.js`/`.mjs`
#[derive(Debug, Default)]
pub struct RuntimeExtensions;

impl CompileHook for RuntimeExtensions {
    fn name(&self) -> &str {
        "runtime-extensions"
    }

    fn apply(&self, path: &Path, code: String) -> BuildResult<String> {
        let mut edits = Vec::new();
        for site in scan_imports(&code, path)? {
            if !is_relative_specifier(&site.specifier) {
                continue;
            }
            let rewritten = replace_extension(&site.specifier, "ts", "js")
                .or_else(|| replace_extension(&site.specifier, "mts", "mjs"));
            if let Some(rewritten) = rewritten {
                let literal = &code[site.specifier_range.clone()];
                edits.push(TextEdit::new(
                    site.specifier_range.clone(),
                    requote(literal, &rewritten),
                ));
            }
        }
        if edits.is_empty() {
            return Ok(code);
        }
        Ok(apply_edits(&code, edits))
    }
}

pub struct Compile {
    transpiler: Box<dyn Transpiler>,
    before: Vec<Box<dyn CompileHook>>,
    after: Vec<Box<dyn CompileHook>>,
}

impl Compile {
    /// Compile phase with the built-in after hook
    pub fn new(transpiler: Box<dyn Transpiler>) -> Self {
        Self {
            transpiler,
            before: Vec::new(),
            after: vec![Box::new(RuntimeExtensions)],
        }
    }

    pub fn with_before_hook(mut self, hook: impl CompileHook + 'static) -> Self {
        self.before.push(Box::new(hook));
        self
    }

    pub fn with_after_hook(mut self, hook: impl CompileHook + 'static) -> Self {
        self.after.push(Box::new(hook));
        self
    }
}

impl Phase for Compile {
    fn name(&self) -> &'static str {
        "compile"
    }

    fn transform(
        &mut self,
        module: &ModuleUnit,
        mut code: String,
        cx: &mut CycleContext<'_>,
    ) -> BuildResult<String> {
        if module.kind() != ModuleKind::Script || cx.assertions.contains(module.path()) {
            return Ok(code);
        }

        for hook in &self.before {
            code = hook.apply(module.path(), code)?;
        }

        let request = CompileRequest::new(module.path(), code)
            .with_sourcemap(cx.project.config.library.sourcemap);
        log::trace!("{}: {}", self.transpiler.name(), module.path().display());
        let mut code = self.transpiler.compile(&request)?;

        for hook in &self.after {
            code = hook.apply(module.path(), code)?;
        }
        Ok(code)
    }
}
