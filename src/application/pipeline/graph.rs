//! Module graph loading
//!
//! Walks imports breadth-first from the entry module and reads every
//! reachable file once. Only relative specifiers are followed; bare ones
//! stay external. The loader never transforms anything, so the graph is the
//! complete input of the assertion scan pass.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::entities::{ImportEdge, ModuleKind, ModuleUnit};
use crate::domain::ports::FileSystem;
use crate::domain::services::scan_imports;
use crate::domain::value_objects::{is_relative_specifier, join_specifier, replace_extension};
use crate::error::{BuildError, BuildResult};

/// Every module reachable from the entry, keyed by absolute path
#[derive(Debug, Clone)]
pub struct ModuleGraph {
    entry: ModuleUnit,
    modules: BTreeMap<PathBuf, ModuleUnit>,
    externals: BTreeSet<String>,
}

impl ModuleGraph {
    pub fn entry(&self) -> &ModuleUnit {
        &self.entry
    }

    pub fn get(&self, path: &Path) -> Option<&ModuleUnit> {
        self.modules.get(path)
    }

    /// File modules in path order; the virtual entry is not included
    pub fn modules(&self) -> impl Iterator<Item = &ModuleUnit> {
        self.modules.values()
    }

    /// Entry first, then file modules
    pub fn all_modules(&self) -> impl Iterator<Item = &ModuleUnit> {
        std::iter::once(&self.entry).chain(self.modules.values())
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Bare specifiers left external
    pub fn externals(&self) -> &BTreeSet<String> {
        &self.externals
    }
}

pub struct GraphLoader<'a> {
    fs: &'a dyn FileSystem,
    source_root: &'a Path,
    config: &'a Config,
}

impl<'a> GraphLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem, source_root: &'a Path, config: &'a Config) -> Self {
        Self {
            fs,
            source_root,
            config,
        }
    }

    /// Load everything reachable from `entry`.
    ///
    /// Bare specifiers missing from the externals allowlist are reported
    /// through `warn` once per specifier.
    pub fn load(&self, entry: ModuleUnit, warn: &mut dyn FnMut(String)) -> BuildResult<ModuleGraph> {
        let mut modules: BTreeMap<PathBuf, ModuleUnit> = BTreeMap::new();
        let mut externals = BTreeSet::new();
        let mut queued: BTreeSet<PathBuf> = BTreeSet::new();
        let mut queue: VecDeque<PathBuf> = VecDeque::new();

        let entry_edges = self.edges(&entry, &mut externals, warn)?;
        for edge in &entry_edges {
            if let Some(target) = &edge.resolved {
                if queued.insert(target.clone()) {
                    queue.push_back(target.clone());
                }
            }
        }
        let entry = entry.with_imports(entry_edges);

        while let Some(path) = queue.pop_front() {
            let contents = self.fs.read(&path)?;
            let unit = ModuleUnit::new(path.clone(), contents);
            let edges = if unit.kind().is_script() {
                self.edges(&unit, &mut externals, warn)?
            } else {
                Vec::new()
            };
            for edge in &edges {
                if let Some(target) = &edge.resolved {
                    if queued.insert(target.clone()) {
                        queue.push_back(target.clone());
                    }
                }
            }
            modules.insert(path, unit.with_imports(edges));
        }

        log::debug!(
            "module graph: {} modules, {} externals",
            modules.len(),
            externals.len()
        );
        Ok(ModuleGraph {
            entry,
            modules,
            externals,
        })
    }

    fn edges(
        &self,
        unit: &ModuleUnit,
        externals: &mut BTreeSet<String>,
        warn: &mut dyn FnMut(String),
    ) -> BuildResult<Vec<ImportEdge>> {
        let mut edges = Vec::new();
        for site in scan_imports(unit.contents(), unit.path())? {
            if site.type_only {
                continue;
            }
            let edge = ImportEdge::new(site.specifier.clone())
                .with_assertion(site.assertion)
                .with_dynamic(site.dynamic);

            if !is_relative_specifier(&site.specifier) {
                if externals.insert(site.specifier.clone())
                    && !self.config.is_allowed_external(&site.specifier)
                {
                    warn(format!(
                        "'{}' is imported by {} but is not listed in externals; treating it as external",
                        site.specifier,
                        unit.path().display()
                    ));
                }
                edges.push(edge);
                continue;
            }

            let target = self
                .resolve(unit.path(), &site.specifier)
                .ok_or_else(|| BuildError::Resolve {
                    specifier: site.specifier.clone(),
                    importer: unit.path().to_path_buf(),
                })?;

            if !target.starts_with(self.source_root) {
                return Err(BuildError::Compile {
                    file: unit.path().to_path_buf(),
                    message: format!(
                        "'{}' resolves to {}, outside the source root {}",
                        site.specifier,
                        target.display(),
                        self.source_root.display()
                    ),
                });
            }

            if !ModuleKind::from_path(&target).is_script() && site.assertion.is_none() {
                return Err(BuildError::Compile {
                    file: unit.path().to_path_buf(),
                    message: format!(
                        "'{}' is not a script module; import it with an assertion such as {{ type: 'css' }}",
                        site.specifier
                    ),
                });
            }

            edges.push(edge.with_resolved(target));
        }
        Ok(edges)
    }

    /// Resolve a relative specifier against its importer.
    ///
    /// Order: the path as written, `.js` -> `.ts`, then the extensionless
    /// candidates `.ts`, `.js`, `/index.ts`, `/index.js`.
    pub fn resolve(&self, importer: &Path, specifier: &str) -> Option<PathBuf> {
        let base = join_specifier(importer, specifier);
        let is_file = |p: &Path| self.fs.exists(p) && !self.fs.is_dir(p);

        if is_file(&base) {
            return Some(base);
        }

        let written = base.to_string_lossy().into_owned();
        let swapped = replace_extension(&written, "js", "ts")
            .or_else(|| replace_extension(&written, "mjs", "mts"));
        if let Some(swapped) = swapped.map(PathBuf::from) {
            if is_file(&swapped) {
                return Some(swapped);
            }
        }

        [".ts", ".js", "/index.ts", "/index.js"]
            .iter()
            .map(|suffix| PathBuf::from(format!("{}{}", written, suffix)))
            .find(|candidate| is_file(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::LocalFs;
    use std::fs;
    use tempfile::tempdir;

    fn entry_for(paths: &[&Path]) -> ModuleUnit {
        let body: String = paths
            .iter()
            .map(|p| format!("export * from '{}';\n", p.display()))
            .collect();
        ModuleUnit::virtual_module("\0entry", body)
    }

    fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_reachable_modules_with_js_to_ts_fallback() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let index = write(&src, "alert/index.ts", "export * from './element.js';");
        write(
            &src,
            "alert/element.ts",
            "import styles from './element.css' with { type: 'css' };\nimport { html } from 'lit';",
        );
        write(&src, "alert/element.css", ":host { display: block; }");

        let mut config = Config::default();
        config.library.externals = vec!["lit".to_string()];
        let fs = LocalFs::new();
        let loader = GraphLoader::new(&fs, &src, &config);
        let mut warnings = Vec::new();
        let graph = loader
            .load(entry_for(&[&index]), &mut |w| warnings.push(w))
            .unwrap();

        assert_eq!(graph.len(), 3);
        assert!(graph.get(&src.join("alert/element.css")).is_some());
        assert!(graph.externals().contains("lit"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn unlisted_bare_import_warns_once() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let a = write(&src, "a.ts", "import 'tslib';\nexport * from './b';");
        write(&src, "b.ts", "import { x } from 'tslib';");

        let config = Config::default();
        let fs = LocalFs::new();
        let mut warnings = Vec::new();
        GraphLoader::new(&fs, &src, &config)
            .load(entry_for(&[&a]), &mut |w| warnings.push(w))
            .unwrap();

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'tslib'"));
    }

    #[test]
    fn missing_relative_target_is_resolve_error() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let a = write(&src, "a.ts", "import './missing.js';");

        let config = Config::default();
        let fs = LocalFs::new();
        let err = GraphLoader::new(&fs, &src, &config)
            .load(entry_for(&[&a]), &mut |_| {})
            .unwrap_err();
        assert!(matches!(err, BuildError::Resolve { .. }));
    }

    #[test]
    fn unasserted_stylesheet_is_compile_error() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let a = write(&src, "a.ts", "import './a.css';");
        write(&src, "a.css", "");

        let config = Config::default();
        let fs = LocalFs::new();
        let err = GraphLoader::new(&fs, &src, &config)
            .load(entry_for(&[&a]), &mut |_| {})
            .unwrap_err();
        assert!(err.to_string().contains("not a script module"));
    }

    #[test]
    fn import_outside_source_root_is_compile_error() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let a = write(&src, "a.ts", "import '../shared.js';");
        write(dir.path(), "shared.js", "");

        let config = Config::default();
        let fs = LocalFs::new();
        let err = GraphLoader::new(&fs, &src, &config)
            .load(entry_for(&[&a]), &mut |_| {})
            .unwrap_err();
        assert!(err.to_string().contains("outside the source root"));
    }

    #[test]
    fn resolves_directory_index() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let importer = write(&src, "a.ts", "");
        let index = write(&src, "button/index.ts", "");

        let config = Config::default();
        let fs = LocalFs::new();
        let loader = GraphLoader::new(&fs, &src, &config);
        assert_eq!(loader.resolve(&importer, "./button"), Some(index));
        assert_eq!(loader.resolve(&importer, "./nothing"), None);
    }
}
