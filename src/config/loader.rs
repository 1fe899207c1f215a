//! Configuration loading
//!
//! The CLI resolves which file to use and exports it (together with the
//! build mode) as environment variables; [`load_from_env`] picks both up
//! again on the pipeline side.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::domain::value_objects::{normalize_path, BuildMode};
use crate::error::{BuildError, BuildResult};

use super::project::{PackageInfo, ProjectContext};
use super::types::{Config, UserConfig};

/// Environment variable carrying the absolute config path
pub const CONFIG_ENV: &str = "BLUEPRINTUI_CONFIG";

/// Config file looked up in the project root when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "blueprint.config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Decide which config file applies.
///
/// An explicitly requested file must exist. The default file is optional:
/// when it is missing the built-in defaults are used and `None` is returned.
pub fn resolve_config_path(root: &Path, explicit: Option<&Path>) -> BuildResult<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            let path = normalize_path(&root.join(path));
            if path.is_file() {
                Ok(Some(path))
            } else {
                Err(BuildError::ConfigNotFound { path })
            }
        }
        None => {
            let path = root.join(DEFAULT_CONFIG_FILE);
            Ok(path.is_file().then_some(path))
        }
    }
}

/// Load a user config file and collect unknown-key warnings.
///
/// `.json` files are read with `serde_json`, everything else as TOML.
pub fn load_with_warnings(path: &Path) -> BuildResult<(UserConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => BuildError::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => BuildError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let user: UserConfig = if is_json {
        let mut deserializer = serde_json::Deserializer::from_str(&content);
        deserialize_tracking(&mut deserializer, &mut unknown_paths)
    } else {
        let deserializer = toml::de::Deserializer::new(&content);
        deserialize_tracking(deserializer, &mut unknown_paths)
    }
    .map_err(|message| BuildError::InvalidConfig {
        file: path.to_path_buf(),
        message,
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((user, warnings))
}

fn deserialize_tracking<'de, D, T>(deserializer: D, unknown: &mut Vec<String>) -> Result<T, String>
where
    D: serde::Deserializer<'de>,
    D::Error: std::fmt::Display,
    T: DeserializeOwned,
{
    serde_ignored::deserialize(deserializer, |p| unknown.push(p.to_string()))
        .map_err(|e| e.to_string().trim().to_string())
}

/// Build the project context from an optional config file and a mode.
pub fn load_project(
    root: &Path,
    config_file: Option<&Path>,
    mode: BuildMode,
) -> BuildResult<(ProjectContext, Vec<ConfigWarning>)> {
    let (config, warnings) = match config_file {
        Some(path) => {
            let (user, warnings) = load_with_warnings(path)?;
            (Config::default().merge(user), warnings)
        }
        None => (Config::default(), Vec::new()),
    };

    let package = read_package_info(root)?;
    log::debug!(
        "loaded configuration (file: {}, mode: {})",
        config_file
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string()),
        mode
    );

    Ok((
        ProjectContext {
            root: root.to_path_buf(),
            config_file: config_file.map(Path::to_path_buf),
            mode,
            config,
            package,
        },
        warnings,
    ))
}

/// Load the project using `BLUEPRINTUI_CONFIG` and `BLUEPRINTUI_BUILD`.
///
/// An unset or empty `BLUEPRINTUI_CONFIG` means defaults. A set path that
/// does not exist is a configuration error.
pub fn load_from_env(root: &Path) -> BuildResult<(ProjectContext, Vec<ConfigWarning>)> {
    let mode = std::env::var(BuildMode::ENV_VAR)
        .map(|v| BuildMode::from_env_value(&v))
        .unwrap_or_default();

    let config_file = std::env::var(CONFIG_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    if let Some(path) = &config_file {
        if !path.is_file() {
            return Err(BuildError::ConfigNotFound { path: path.clone() });
        }
    }

    load_project(root, config_file.as_deref(), mode)
}

/// Read `name` and `version` from `package.json`, if present
fn read_package_info(root: &Path) -> BuildResult<PackageInfo> {
    let path = root.join("package.json");
    if !path.is_file() {
        return Ok(PackageInfo::default());
    }
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|e| BuildError::InvalidConfig {
        file: path,
        message: e.to_string(),
    })
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "library",
        "bundler",
        "base_dir",
        "out_dir",
        "entry_points",
        "externals",
        "assets",
        "tsconfig",
        "sourcemap",
        "custom_elements_manifest_lockfile",
        "manifest_tags",
        "manifest_command_tag",
        "manifest_exclude",
        "compiler",
        "js_minifier",
        "type_check",
        "minify",
        "javascript",
        "css",
        "html",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
