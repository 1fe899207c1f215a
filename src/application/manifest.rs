//! Custom elements manifest generation
//!
//! Analyzes every authoring module under the source root (not just the
//! modules reachable from the entry points), then runs the post-processing
//! passes over the whole document. The `custom-elements-manifest` phase and
//! the `api` command both go through [`ManifestGenerator`], so the file on
//! disk and the drift check always agree byte for byte.

use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;

use crate::config::ProjectContext;
use crate::domain::entities::ManifestDocument;
use crate::domain::ports::FileSystem;
use crate::domain::services::{analyze_module, AnalyzerOptions, ManifestPasses};
use crate::domain::value_objects::path_to_slash;
use crate::error::{BuildError, BuildResult};

/// Extensions analyzed for declarations
const ANALYZED_EXTENSIONS: &[&str] = &["ts", "js"];

/// Settings for one generation run, taken from the project
#[derive(Debug, Clone)]
pub struct ManifestOptions {
    pub project_root: PathBuf,
    pub source_root: PathBuf,
    /// `base_dir` as written in the config, e.g. `./src`
    pub configured_base_dir: String,
    pub exclude: Vec<String>,
    pub analyzer: AnalyzerOptions,
}

impl ManifestOptions {
    pub fn from_project(project: &ProjectContext) -> Self {
        let library = &project.config.library;
        Self {
            project_root: project.root.clone(),
            source_root: project.source_root(),
            configured_base_dir: project.configured_base_dir().to_string(),
            exclude: library.manifest_exclude.clone(),
            analyzer: AnalyzerOptions {
                metadata_tags: library.manifest_tags.clone(),
                command_tag: library.manifest_command_tag.clone(),
            },
        }
    }
}

pub struct ManifestGenerator<'a> {
    fs: &'a dyn FileSystem,
    options: ManifestOptions,
}

impl<'a> ManifestGenerator<'a> {
    pub fn new(fs: &'a dyn FileSystem, options: ManifestOptions) -> Self {
        Self { fs, options }
    }

    pub fn options(&self) -> &ManifestOptions {
        &self.options
    }

    /// Authoring files under the source root, sorted, with excludes applied.
    ///
    /// Only the configured excludes filter the walk. Ignore files and git
    /// state on the machine never change which modules are analyzed.
    pub fn source_files(&self) -> BuildResult<Vec<PathBuf>> {
        let root = &self.options.source_root;
        if !self.fs.is_dir(root) {
            return Err(BuildError::Manifest(format!(
                "source root {} is not a directory",
                root.display()
            )));
        }

        let mut overrides = OverrideBuilder::new(root);
        for pattern in &self.options.exclude {
            overrides
                .add(&format!("!{}", pattern))
                .map_err(|e| BuildError::Manifest(format!("invalid exclude '{}': {}", pattern, e)))?;
        }
        let overrides = overrides
            .build()
            .map_err(|e| BuildError::Manifest(e.to_string()))?;

        let mut files = Vec::new();
        for entry in WalkBuilder::new(root)
            .standard_filters(false)
            .overrides(overrides)
            .build() {
            let entry = entry.map_err(|e| BuildError::Manifest(e.to_string()))?;
            let path = entry.path();
            let analyzed = entry.file_type().is_some_and(|t| t.is_file())
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| ANALYZED_EXTENSIONS.contains(&e));
            if analyzed {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Analyze all source files and run the post-processing passes
    pub fn generate(&self) -> BuildResult<ManifestDocument> {
        let files = self.source_files()?;
        let mut modules = Vec::with_capacity(files.len());
        for file in &files {
            let source = self.fs.read(file)?;
            let module_path = self.module_path(file);
            let module = analyze_module(&source, file, &module_path, &self.options.analyzer)
                .map_err(|e| BuildError::Manifest(e.to_string()))?;
            modules.push(module);
        }

        let mut document = ManifestDocument::new(modules);
        ManifestPasses::new(&self.options.configured_base_dir, &self.options.source_root)
            .apply(&mut document);
        log::debug!("manifest: analyzed {} modules", files.len());
        Ok(document)
    }

    /// Serialized manifest, exactly as written to disk and to the lockfile
    pub fn render(&self) -> BuildResult<String> {
        self.generate()?.to_json_string()
    }

    /// Generate and write the manifest to `path`
    pub fn write(&self, path: &Path) -> BuildResult<String> {
        let json = self.render()?;
        self.fs.write(path, &json)?;
        log::info!("wrote {}", path.display());
        Ok(json)
    }

    /// Slash path relative to the project root; absolute when outside it
    fn module_path(&self, file: &Path) -> String {
        match file.strip_prefix(&self.options.project_root) {
            Ok(relative) => path_to_slash(relative),
            Err(_) => path_to_slash(file),
        }
    }
}
