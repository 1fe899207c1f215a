//! Resolved project context
//!
//! Joins the merged [`Config`] with the project root, the build mode and the
//! package metadata. All paths handed to the pipeline come from here, already
//! absolute and normalized.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::value_objects::{normalize_path, path_to_slash, BuildMode};

use super::types::Config;

/// File name of the generated manifest inside `out_dir`
pub const MANIFEST_FILE_NAME: &str = "custom-elements.json";

/// The subset of `package.json` the pipeline reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Directory config paths are relative to (the working directory)
    pub root: PathBuf,
    pub config_file: Option<PathBuf>,
    pub mode: BuildMode,
    pub config: Config,
    pub package: PackageInfo,
}

impl ProjectContext {
    /// Context with built-in defaults, mostly for tests and `api` callers
    pub fn with_defaults(root: impl Into<PathBuf>, mode: BuildMode) -> Self {
        Self {
            root: root.into(),
            config_file: None,
            mode,
            config: Config::default(),
            package: PackageInfo::default(),
        }
    }

    /// Resolve a configured path against the project root
    pub fn resolve(&self, configured: &str) -> PathBuf {
        normalize_path(&self.root.join(configured))
    }

    pub fn source_root(&self) -> PathBuf {
        self.resolve(&self.config.library.base_dir)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.resolve(&self.config.library.out_dir)
    }

    pub fn tsconfig(&self) -> PathBuf {
        self.resolve(&self.config.library.tsconfig)
    }

    pub fn lockfile(&self) -> PathBuf {
        self.resolve(&self.config.library.custom_elements_manifest_lockfile)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir().join(MANIFEST_FILE_NAME)
    }

    pub fn assets(&self) -> Vec<PathBuf> {
        self.config
            .library
            .assets
            .iter()
            .map(|a| self.resolve(a))
            .collect()
    }

    /// Entry globs as absolute patterns.
    ///
    /// Glob metacharacters in the root itself are escaped so only the
    /// configured part of the pattern is interpreted.
    pub fn entry_patterns(&self) -> Vec<String> {
        let root = glob::Pattern::escape(&path_to_slash(&self.root));
        self.config
            .library
            .entry_points
            .iter()
            .map(|pattern| {
                let relative = pattern.trim_start_matches("./");
                if Path::new(relative).is_absolute() {
                    relative.to_string()
                } else {
                    format!("{}/{}", root.trim_end_matches('/'), relative)
                }
            })
            .collect()
    }

    /// `base_dir` exactly as configured, used when canonicalizing manifest paths
    pub fn configured_base_dir(&self) -> &str {
        &self.config.library.base_dir
    }
}
