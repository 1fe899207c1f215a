//! `entry-points`: expand the entry globs into one virtual module

use std::path::PathBuf;

use crate::domain::entities::ModuleUnit;
use crate::domain::services::requote;
use crate::domain::value_objects::path_to_slash;
use crate::error::{BuildError, BuildResult};

use crate::application::pipeline::{CycleContext, Phase};

/// Id of the synthesized entry module; never written to disk
pub const VIRTUAL_ENTRY_ID: &str = "\0blueprint:entry";

#[derive(Debug, Default)]
pub struct EntryPoints;

impl EntryPoints {
    /// Files matched by `patterns`, sorted and deduplicated
    pub fn expand(patterns: &[String]) -> BuildResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for pattern in patterns {
            let paths = glob::glob(pattern).map_err(|e| {
                BuildError::phase("entry-points", format!("invalid pattern '{}': {}", pattern, e))
            })?;
            for path in paths {
                let path = path.map_err(|e| BuildError::phase("entry-points", e.to_string()))?;
                if path.is_file() {
                    files.push(path);
                }
            }
        }
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// `export * from '<entry>'` per entry
    pub fn entry_module(entries: &[PathBuf]) -> ModuleUnit {
        let body: String = entries
            .iter()
            .map(|path| format!("export * from {};\n", requote("'", &path_to_slash(path))))
            .collect();
        ModuleUnit::virtual_module(VIRTUAL_ENTRY_ID, body)
    }
}

impl Phase for EntryPoints {
    fn name(&self) -> &'static str {
        "entry-points"
    }

    fn build_start(&mut self, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        let patterns = cx.project.entry_patterns();
        let entries = Self::expand(&patterns)?;
        if entries.is_empty() {
            return Err(BuildError::phase(
                "entry-points",
                format!("no files match the entry points {:?}", cx.project.config.library.entry_points),
            ));
        }
        log::debug!("{} entry points", entries.len());
        cx.entry = Some(Self::entry_module(&entries));
        Ok(())
    }
}
