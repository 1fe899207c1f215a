//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{
    standard_phases, ApiUseCase, BuildController, BuildJob, ScaffoldUseCase, Toolchain,
};
use crate::config::ProjectContext;
use crate::domain::ports::{Minifier, Transpiler, TypeChecker};
use crate::error::BuildResult;
use crate::infrastructure::{
    CommandMinifier, CommandTranspiler, CommandTypeChecker, CssMinifier, FsEventSource, FsSnapshotRepository,
    HtmlLiteralMinifier, LocalFs, PassthroughTranspiler, WhitespaceJsMinifier,
};

/// Type alias for the concrete ApiUseCase with all dependencies
pub type ConcreteApiUseCase = ApiUseCase<FsSnapshotRepository, LocalFs>;

/// Transpiler and minifiers for a project.
///
/// Empty command lists pick the fallback:
/// - `compiler`: sources are emitted untranspiled
/// - `js_minifier`: the built-in minifier
/// - `type_check`: no development type check
pub fn create_toolchain(project: &ProjectContext) -> BuildResult<Toolchain> {
    let bundler = &project.config.bundler;

    let transpiler: Box<dyn Transpiler> = if bundler.compiler.is_empty() {
        Box::new(PassthroughTranspiler)
    } else {
        Box::new(CommandTranspiler::new(&bundler.compiler)?.with_tsconfig(&project.tsconfig())?)
    };

    let js_minifier: Box<dyn Minifier> = if bundler.js_minifier.is_empty() {
        Box::new(WhitespaceJsMinifier)
    } else {
        Box::new(CommandMinifier::new(&bundler.js_minifier)?)
    };

    let type_checker: Option<Box<dyn TypeChecker>> = if bundler.type_check.is_empty() {
        None
    } else {
        Some(Box::new(CommandTypeChecker::new(&bundler.type_check)?))
    };

    Ok(Toolchain {
        transpiler,
        css_minifier: Box::new(CssMinifier),
        js_minifier,
        html_minifier: Box::new(HtmlLiteralMinifier),
        type_checker,
    })
}

/// Create a build controller with all phases for the project's mode
pub fn create_build_controller(project: ProjectContext) -> BuildResult<BuildController> {
    let toolchain = create_toolchain(&project)?;
    let phases = standard_phases(&project, toolchain);
    let job = BuildJob::new(project, Box::new(LocalFs::new()), phases);
    Ok(BuildController::new(job))
}

/// Watch the source root, ignoring the output directory
pub fn create_change_source(project: &ProjectContext) -> BuildResult<FsEventSource> {
    FsEventSource::new(&project.source_root(), vec![project.out_dir()])
}

/// Create an api use case with all dependencies wired up
pub fn create_api_use_case() -> ConcreteApiUseCase {
    ApiUseCase::new(FsSnapshotRepository::new(), LocalFs::new())
}

pub fn create_scaffold_use_case() -> ScaffoldUseCase<LocalFs> {
    ScaffoldUseCase::new(LocalFs::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::BuildMode;

    #[test]
    fn empty_compiler_uses_passthrough() {
        let mut project = ProjectContext::with_defaults("/lib", BuildMode::Production);
        project.config.bundler.compiler.clear();
        let toolchain = create_toolchain(&project).unwrap();
        assert_eq!(toolchain.transpiler.name(), PassthroughTranspiler.name());
    }

    #[test]
    fn configured_minifier_is_external() {
        let mut project = ProjectContext::with_defaults("/lib", BuildMode::Production);
        project.config.bundler.compiler.clear();
        project.config.bundler.js_minifier = vec!["terser".to_string(), "--module".to_string()];
        let toolchain = create_toolchain(&project).unwrap();
        assert_ne!(toolchain.js_minifier.name(), WhitespaceJsMinifier.name());
    }

    #[test]
    fn empty_type_check_disables_checker() {
        let mut project = ProjectContext::with_defaults("/lib", BuildMode::Development);
        project.config.bundler.compiler.clear();
        assert!(create_toolchain(&project).unwrap().type_checker.is_some());

        project.config.bundler.type_check.clear();
        assert!(create_toolchain(&project).unwrap().type_checker.is_none());
    }

    #[test]
    fn controller_starts_idle() {
        let mut project = ProjectContext::with_defaults("/lib", BuildMode::Development);
        project.config.bundler.compiler.clear();
        let controller = create_build_controller(project).unwrap();
        assert_eq!(controller.state(), crate::application::BuildState::Idle);
        assert!(controller.job().active_phases().contains(&"output-cache"));
    }
}
