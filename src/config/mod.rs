//! Configuration module
//!
//! Resolution order:
//! 1. `--config <path>` (must exist)
//! 2. `./blueprint.config.toml` in the project root (optional)
//! 3. Built-in defaults
//!
//! The chosen file and the build mode travel to the pipeline through
//! `BLUEPRINTUI_CONFIG` and `BLUEPRINTUI_BUILD`.

mod loader;
mod project;
mod types;

pub use loader::{
    load_from_env, load_project, load_with_warnings, resolve_config_path, ConfigWarning,
    CONFIG_ENV, DEFAULT_CONFIG_FILE,
};
pub use project::{PackageInfo, ProjectContext, MANIFEST_FILE_NAME};
pub use types::{
    BundlerConfig, BundlerOverrides, Config, LibraryConfig, LibraryOverrides, MinifyConfig,
    MinifyOverrides, UserConfig,
};
