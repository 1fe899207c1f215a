//! `clean-out-dir` and `post-clean`

use std::path::PathBuf;

use crate::application::pipeline::{CycleContext, Phase};
use crate::domain::entities::Bundle;
use crate::domain::value_objects::path_to_slash;
use crate::error::{BuildError, BuildResult};

/// Removes the output root before anything is built
#[derive(Debug, Default)]
pub struct CleanOutDir;

impl Phase for CleanOutDir {
    fn name(&self) -> &'static str {
        "clean-out-dir"
    }

    fn build_start(&mut self, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        if cx.project.root.starts_with(&cx.out_dir) || cx.source_root.starts_with(&cx.out_dir) {
            return Err(BuildError::phase(
                self.name(),
                format!(
                    "refusing to remove {}: it contains the project sources",
                    cx.out_dir.display()
                ),
            ));
        }
        log::debug!("removing {}", cx.out_dir.display());
        cx.fs.remove_dir_all(&cx.out_dir)?;
        Ok(())
    }
}

/// Names removed from the output root after writing
const TRANSIENT_PATTERNS: &[&str] = &["**/.tsbuildinfo", "**/*.tsbuildinfo", "**/_virtual"];

/// Deletes compiler leftovers from the output root
#[derive(Debug, Default)]
pub struct PostClean;

impl PostClean {
    fn transient_paths(out_dir: &std::path::Path) -> BuildResult<Vec<PathBuf>> {
        let root = glob::Pattern::escape(&path_to_slash(out_dir));
        let mut found = Vec::new();
        for pattern in TRANSIENT_PATTERNS {
            let full = format!("{}/{}", root, pattern);
            let paths =
                glob::glob(&full).map_err(|e| BuildError::phase("post-clean", e.to_string()))?;
            found.extend(paths.filter_map(Result::ok));
        }
        found.sort();
        found.dedup();
        Ok(found)
    }
}

impl Phase for PostClean {
    fn name(&self) -> &'static str {
        "post-clean"
    }

    fn write_bundle(&mut self, _bundle: &Bundle, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        for path in Self::transient_paths(&cx.out_dir)? {
            log::debug!("post-clean: removing {}", path.display());
            if cx.fs.is_dir(&path) {
                cx.fs.remove_dir_all(&path)?;
            } else if cx.fs.exists(&path) {
                cx.fs.remove(&path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectContext;
    use crate::domain::value_objects::BuildMode;
    use crate::infrastructure::fs::LocalFs;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn clean_out_dir_removes_previous_output() {
        let dir = tempdir().unwrap();
        let project = ProjectContext::with_defaults(dir.path(), BuildMode::Production);
        fs::create_dir_all(dir.path().join("dist/old")).unwrap();
        fs::write(dir.path().join("dist/old/stale.js"), "").unwrap();

        let local = LocalFs::new();
        let mut cx = CycleContext::new(&project, &local);
        CleanOutDir.build_start(&mut cx).unwrap();

        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn clean_out_dir_refuses_to_remove_the_project() {
        let dir = tempdir().unwrap();
        let mut project = ProjectContext::with_defaults(dir.path(), BuildMode::Production);
        project.config.library.out_dir = ".".to_string();

        let local = LocalFs::new();
        let mut cx = CycleContext::new(&project, &local);
        assert!(CleanOutDir.build_start(&mut cx).is_err());
        assert!(dir.path().exists());
    }

    #[test]
    fn post_clean_removes_transient_files() {
        let dir = tempdir().unwrap();
        let project = ProjectContext::with_defaults(dir.path(), BuildMode::Production);
        let dist = dir.path().join("dist");
        fs::create_dir_all(dist.join("alert")).unwrap();
        fs::create_dir_all(dist.join("_virtual")).unwrap();
        fs::write(dist.join("alert/.tsbuildinfo"), "{}").unwrap();
        fs::write(dist.join("_virtual/entry.js"), "").unwrap();
        fs::write(dist.join("alert/index.js"), "").unwrap();

        let local = LocalFs::new();
        let mut cx = CycleContext::new(&project, &local);
        PostClean.write_bundle(&Bundle::new(), &mut cx).unwrap();

        assert!(!dist.join("alert/.tsbuildinfo").exists());
        assert!(!dist.join("_virtual").exists());
        assert!(dist.join("alert/index.js").exists());
    }
}
