//! The fourteen pipeline phases
//!
//! [`standard_phases`] builds them in their fixed order. Development and
//! production share the order; the mode only toggles which slots are active.

mod assertions;
mod assets;
mod cache;
mod clean;
mod compile;
mod entry;
mod manifest;
mod minify;
mod package;
mod super_call;
mod type_check;
mod version;

pub use assertions::{ModuleAssertions, ASSERTED_OUTPUT_SUFFIX};
pub use assets::CopyAssets;
pub use cache::OutputCachePhase;
pub use clean::{CleanOutDir, PostClean};
pub use compile::{Compile, CompileHook, RuntimeExtensions};
pub use entry::{EntryPoints, VIRTUAL_ENTRY_ID};
pub use manifest::CustomElementsManifest;
pub use minify::{MinifyHtmlLiterals, MinifyJavaScript};
pub use package::CleanPackageJson;
pub use super_call::PatchSuperMinify;
pub use type_check::TypeCheck;
pub use version::{InlinePackageVersion, VERSION_TOKEN};

use crate::config::ProjectContext;
use crate::domain::ports::{Minifier, Transpiler, TypeChecker};

use super::phase::PhaseSlot;

/// Phase names in execution order
pub const PHASE_ORDER: [&str; 14] = [
    "clean-out-dir",
    "copy-assets",
    "entry-points",
    "module-assertions",
    "compile",
    "type-check",
    "output-cache",
    "minify-html-literals",
    "minify-javascript",
    "inline-package-version",
    "patch-super-minify",
    "post-clean",
    "custom-elements-manifest",
    "clean-package-json",
];

/// External collaborators the phases are built around
pub struct Toolchain {
    pub transpiler: Box<dyn Transpiler>,
    pub css_minifier: Box<dyn Minifier>,
    pub js_minifier: Box<dyn Minifier>,
    pub html_minifier: Box<dyn Minifier>,
    /// `None` turns the development type check off
    pub type_checker: Option<Box<dyn TypeChecker>>,
}

/// All phases in order, activated for the project's build mode
pub fn standard_phases(project: &ProjectContext, toolchain: Toolchain) -> Vec<PhaseSlot> {
    let production = project.mode.is_production();
    let minify = project.config.bundler.minify;
    let css_minifier = (production && minify.css).then_some(toolchain.css_minifier);

    vec![
        PhaseSlot::new(CleanOutDir, production),
        PhaseSlot::new(CopyAssets, true),
        PhaseSlot::new(EntryPoints, true),
        PhaseSlot::new(ModuleAssertions::new(css_minifier), true),
        PhaseSlot::new(Compile::new(toolchain.transpiler), true),
        PhaseSlot::new(TypeCheck::new(toolchain.type_checker), !production),
        PhaseSlot::new(OutputCachePhase::new(), !production),
        PhaseSlot::new(
            MinifyHtmlLiterals::new(toolchain.html_minifier),
            production && minify.html,
        ),
        PhaseSlot::new(
            MinifyJavaScript::new(toolchain.js_minifier),
            production && minify.javascript,
        ),
        PhaseSlot::new(InlinePackageVersion, production),
        PhaseSlot::new(PatchSuperMinify, production),
        PhaseSlot::new(PostClean, production),
        PhaseSlot::new(CustomElementsManifest::new(), production),
        PhaseSlot::new(CleanPackageJson, production),
    ]
}
