//! `copy-assets`: copy configured files or directories into the output root

use crate::application::pipeline::{CycleContext, Phase};
use crate::error::{BuildError, BuildResult};

#[derive(Debug, Default)]
pub struct CopyAssets;

impl Phase for CopyAssets {
    fn name(&self) -> &'static str {
        "copy-assets"
    }

    fn build_start(&mut self, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        for src in cx.project.assets() {
            let Some(file_name) = src.file_name() else {
                continue;
            };
            if !cx.fs.exists(&src) {
                return Err(BuildError::phase(
                    self.name(),
                    format!("asset not found: {}", src.display()),
                ));
            }
            let dest = cx.out_dir.join(file_name);
            log::debug!("copying {} -> {}", src.display(), dest.display());
            cx.fs.copy_recursive(&src, &dest)?;
        }
        Ok(())
    }
}
