//! Manifest post-processing passes
//!
//! Run in a fixed order over the whole document once every module has been
//! analyzed: canonicalize paths, normalize extensions, then sort modules.
//! Each pass rewrites only path-bearing fields, never free text.

use std::path::Path;

use crate::domain::entities::ManifestDocument;
use crate::domain::value_objects::{path_to_slash, replace_extension};

/// The three post-processing passes with their settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPasses {
    /// Prefixes removed from paths, longest first, each ending in `/`
    prefixes: Vec<String>,
    authoring_extension: String,
    runtime_extension: String,
}

impl ManifestPasses {
    /// Build the passes for a source root.
    ///
    /// `configured_root` is the root as written in configuration (for example
    /// `./src`), `absolute_root` the same directory resolved on disk. Both are
    /// stripped, with or without a leading separator.
    pub fn new(configured_root: &str, absolute_root: &Path) -> Self {
        let mut roots = vec![clean_root(configured_root)];
        roots.push(clean_root(&path_to_slash(absolute_root)));

        let mut prefixes = Vec::new();
        for root in roots.into_iter().filter(|r| !r.is_empty()) {
            prefixes.push(format!("{}/", root));
            prefixes.push(format!("/{}/", root));
        }
        prefixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        prefixes.dedup();

        Self {
            prefixes,
            authoring_extension: "ts".to_string(),
            runtime_extension: "js".to_string(),
        }
    }

    pub fn with_extensions(mut self, authoring: impl Into<String>, runtime: impl Into<String>) -> Self {
        self.authoring_extension = authoring.into();
        self.runtime_extension = runtime.into();
        self
    }

    /// Apply all passes in order
    pub fn apply(&self, document: &mut ManifestDocument) {
        self.canonicalize(document);
        self.normalize_extensions(document);
        sort_modules(document);
    }

    /// Strip the source root from every path in the document
    pub fn canonicalize(&self, document: &mut ManifestDocument) {
        document.visit_paths_mut(|path| {
            if let Some(rest) = self
                .prefixes
                .iter()
                .find_map(|prefix| path.strip_prefix(prefix.as_str()))
            {
                *path = rest.to_string();
            }
        });
    }

    /// Rewrite the authoring extension of every path to the runtime one
    pub fn normalize_extensions(&self, document: &mut ManifestDocument) {
        let from = self.authoring_extension.as_str();
        let to = self.runtime_extension.as_str();
        document.visit_paths_mut(|path| {
            if let Some(rewritten) = replace_extension(path, from, to) {
                *path = rewritten;
            }
        });
    }
}

/// Stable sort of modules by path, code-point order
pub fn sort_modules(document: &mut ManifestDocument) {
    document.modules.sort_by(|a, b| a.path.cmp(&b.path));
}

/// `./src/` -> `src`, `/abs/lib/src/` -> `abs/lib/src`
fn clean_root(root: &str) -> String {
    let mut root = root.trim();
    while let Some(rest) = root.strip_prefix("./") {
        root = rest;
    }
    root.trim_matches('/').to_string()
}
