//! Configuration types
//!
//! Two shapes live here. [`Config`] is the fully resolved configuration with
//! every value present. [`UserConfig`] mirrors what a user may write in
//! `blueprint.config.toml` (or `.json`): every leaf is optional so that
//! [`Config::merge`] can tell "unset" from "set to the default".

use serde::{Deserialize, Serialize};

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub bundler: BundlerConfig,
}

/// `[library]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Source root; manifest paths are made relative to it
    pub base_dir: String,
    pub out_dir: String,
    /// Glob patterns expanded into the virtual entry module
    pub entry_points: Vec<String>,
    /// Bare specifiers allowed to stay external without a warning.
    /// An entry ending in `/` also allows every deep import below it.
    pub externals: Vec<String>,
    /// Files or directories copied verbatim into `out_dir`
    pub assets: Vec<String>,
    pub tsconfig: String,
    pub sourcemap: bool,
    pub custom_elements_manifest_lockfile: String,
    /// Doc tags copied into declaration metadata
    pub manifest_tags: Vec<String>,
    pub manifest_command_tag: String,
    /// Globs excluded from manifest analysis
    pub manifest_exclude: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            out_dir: default_out_dir(),
            entry_points: default_entry_points(),
            externals: Vec::new(),
            assets: Vec::new(),
            tsconfig: default_tsconfig(),
            sourcemap: false,
            custom_elements_manifest_lockfile: default_lockfile(),
            manifest_tags: default_manifest_tags(),
            manifest_command_tag: default_command_tag(),
            manifest_exclude: default_manifest_exclude(),
        }
    }
}

/// `[bundler]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundlerConfig {
    /// Transpiler command line. Source is piped on stdin, JavaScript is read
    /// back from stdout. An empty list disables transpilation (sources are
    /// emitted as-is).
    pub compiler: Vec<String>,
    /// Optional external JavaScript minifier, same stdin/stdout contract.
    /// Empty means the built-in comment stripper.
    pub js_minifier: Vec<String>,
    /// Development-only type checker; `--project <tsconfig>` is appended.
    /// Findings are reported as warnings. Empty turns the check off.
    pub type_check: Vec<String>,
    pub minify: MinifyConfig,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            js_minifier: Vec::new(),
            type_check: default_type_check(),
            minify: MinifyConfig::default(),
        }
    }
}

/// `[bundler.minify]` switches, honored in production only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinifyConfig {
    pub javascript: bool,
    pub css: bool,
    pub html: bool,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            javascript: true,
            css: true,
            html: true,
        }
    }
}

fn default_base_dir() -> String {
    "./src".to_string()
}

fn default_out_dir() -> String {
    "./dist".to_string()
}

fn default_entry_points() -> Vec<String> {
    vec!["./src/**/index.ts".to_string()]
}

fn default_tsconfig() -> String {
    "./tsconfig.lib.json".to_string()
}

fn default_lockfile() -> String {
    "./custom-elements.lock.json".to_string()
}

fn default_manifest_tags() -> Vec<String> {
    ["docs", "spec", "status", "since", "example"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_command_tag() -> String {
    "command".to_string()
}

fn default_manifest_exclude() -> Vec<String> {
    [
        "**/*.test.ts",
        "**/*.spec.ts",
        "**/*.a11y.ts",
        "**/*.performance.ts",
        "**/*.stories.ts",
        "**/*.examples.js",
        "**/*.d.ts",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_compiler() -> Vec<String> {
    vec![
        "esbuild".to_string(),
        "--format=esm".to_string(),
        "--target=es2022".to_string(),
    ]
}

fn default_type_check() -> Vec<String> {
    vec!["tsc".to_string(), "--noEmit".to_string()]
}

/// Configuration as written by the user
///
/// JSON files use the camelCase names of the JavaScript tooling, so every
/// multi-word key also accepts its camelCase alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub library: LibraryOverrides,
    #[serde(default)]
    pub bundler: BundlerOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LibraryOverrides {
    #[serde(default, alias = "baseDir")]
    pub base_dir: Option<String>,
    #[serde(default, alias = "outDir")]
    pub out_dir: Option<String>,
    #[serde(default, alias = "entryPoints")]
    pub entry_points: Option<Vec<String>>,
    #[serde(default)]
    pub externals: Option<Vec<String>>,
    #[serde(default)]
    pub assets: Option<Vec<String>>,
    #[serde(default)]
    pub tsconfig: Option<String>,
    #[serde(default)]
    pub sourcemap: Option<bool>,
    #[serde(
        default,
        alias = "customElementsManifestLockFile",
        alias = "customElementsManifestLockfile"
    )]
    pub custom_elements_manifest_lockfile: Option<String>,
    #[serde(default, alias = "manifestTags")]
    pub manifest_tags: Option<Vec<String>>,
    #[serde(default, alias = "manifestCommandTag")]
    pub manifest_command_tag: Option<String>,
    #[serde(default, alias = "manifestExclude")]
    pub manifest_exclude: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BundlerOverrides {
    #[serde(default)]
    pub compiler: Option<Vec<String>>,
    #[serde(default, alias = "jsMinifier")]
    pub js_minifier: Option<Vec<String>>,
    #[serde(default, alias = "typeCheck")]
    pub type_check: Option<Vec<String>>,
    #[serde(default)]
    pub minify: MinifyOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MinifyOverrides {
    #[serde(default)]
    pub javascript: Option<bool>,
    #[serde(default)]
    pub css: Option<bool>,
    #[serde(default)]
    pub html: Option<bool>,
}

/// Replace `slot` when the override is set
fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl Config {
    /// Deep-merge user overrides over `self`.
    ///
    /// The user value wins at every leaf. Lists are leaves: a user list
    /// replaces the default list instead of extending it.
    pub fn merge(mut self, user: UserConfig) -> Self {
        let lib = user.library;
        set(&mut self.library.base_dir, lib.base_dir);
        set(&mut self.library.out_dir, lib.out_dir);
        set(&mut self.library.entry_points, lib.entry_points);
        set(&mut self.library.externals, lib.externals);
        set(&mut self.library.assets, lib.assets);
        set(&mut self.library.tsconfig, lib.tsconfig);
        set(&mut self.library.sourcemap, lib.sourcemap);
        set(
            &mut self.library.custom_elements_manifest_lockfile,
            lib.custom_elements_manifest_lockfile,
        );
        set(&mut self.library.manifest_tags, lib.manifest_tags);
        set(&mut self.library.manifest_command_tag, lib.manifest_command_tag);
        set(&mut self.library.manifest_exclude, lib.manifest_exclude);

        let bundler = user.bundler;
        set(&mut self.bundler.compiler, bundler.compiler);
        set(&mut self.bundler.js_minifier, bundler.js_minifier);
        set(&mut self.bundler.type_check, bundler.type_check);
        set(&mut self.bundler.minify.javascript, bundler.minify.javascript);
        set(&mut self.bundler.minify.css, bundler.minify.css);
        set(&mut self.bundler.minify.html, bundler.minify.html);
        self
    }

    /// Whether a bare specifier is on the externals allowlist
    pub fn is_allowed_external(&self, specifier: &str) -> bool {
        self.library.externals.iter().any(|allowed| {
            specifier == allowed
                || (allowed.ends_with('/') && specifier.starts_with(allowed.as_str()))
                || specifier
                    .strip_prefix(allowed.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}
