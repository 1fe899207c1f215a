//! `module-assertions`: stylesheet/JSON modules and assertion stripping
//!
//! Two passes. `graph_loaded` scans every loaded module and fills the
//! cycle's assertion table; only then does `transform` run, so whether a
//! module is asserted never depends on the order modules are visited.

use std::path::Path;

use crate::application::pipeline::{CycleContext, ModuleGraph, Phase};
use crate::domain::entities::ModuleUnit;
use crate::domain::ports::Minifier;
use crate::domain::services::{apply_edits, asserted_module_body, requote, scan_imports, TextEdit};
use crate::domain::value_objects::AssertionKind;
use crate::error::BuildResult;

/// Suffix appended to asserted modules' output names and specifiers
pub const ASSERTED_OUTPUT_SUFFIX: &str = ".js";

pub struct ModuleAssertions {
    /// Applied to stylesheet text before it is wrapped, when set
    css_minifier: Option<Box<dyn Minifier>>,
}

impl ModuleAssertions {
    pub fn new(css_minifier: Option<Box<dyn Minifier>>) -> Self {
        Self { css_minifier }
    }

    /// Record every asserted edge of the graph
    pub fn scan(graph: &ModuleGraph, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        cx.assertions.clear();
        for module in graph.all_modules() {
            for edge in module.imports() {
                if let (Some(kind), Some(target)) = (edge.assertion, &edge.resolved) {
                    cx.assertions.record(target.clone(), kind, module.path())?;
                }
            }
        }
        log::debug!("{} asserted modules", cx.assertions.len());
        Ok(())
    }

    fn asserted_body(&self, kind: AssertionKind, module: &ModuleUnit) -> BuildResult<String> {
        let contents = match (kind, &self.css_minifier) {
            (AssertionKind::Css, Some(minifier)) => minifier.minify(module.path(), module.contents())?,
            _ => module.contents().to_string(),
        };
        asserted_module_body(kind, &contents, module.path())
    }

    /// Point asserted specifiers at the emitted `*.js` file and drop the
    /// assertion clause
    pub fn strip_assertions(code: &str, file: &Path) -> BuildResult<String> {
        let mut edits = Vec::new();
        for site in scan_imports(code, file)? {
            if site.assertion.is_none() {
                continue;
            }
            let literal = &code[site.specifier_range.clone()];
            let rewritten = format!("{}{}", site.specifier, ASSERTED_OUTPUT_SUFFIX);
            edits.push(TextEdit::new(
                site.specifier_range.clone(),
                requote(literal, &rewritten),
            ));
            if let Some(clause) = site.clause_range {
                edits.push(TextEdit::delete(clause));
            }
        }
        if edits.is_empty() {
            return Ok(code.to_string());
        }
        Ok(apply_edits(code, edits))
    }
}

impl Phase for ModuleAssertions {
    fn name(&self) -> &'static str {
        "module-assertions"
    }

    fn graph_loaded(&mut self, graph: &ModuleGraph, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        Self::scan(graph, cx)
    }

    fn transform(
        &mut self,
        module: &ModuleUnit,
        code: String,
        cx: &mut CycleContext<'_>,
    ) -> BuildResult<String> {
        if let Some(kind) = cx.assertions.get(module.path()) {
            return self.asserted_body(kind, module);
        }
        if module.kind().is_script() {
            return Self::strip_assertions(&code, module.path());
        }
        Ok(code)
    }
}
