//! `clean-package-json`: publishable `package.json` in the output root

use crate::application::pipeline::{CycleContext, Phase};
use crate::domain::entities::Bundle;
use crate::error::{BuildError, BuildResult};

/// Top-level `package.json` keys that never ship
const DEVELOPMENT_KEYS: &[&str] = &["scripts", "devDependencies"];

/// Writes `<out_dir>/package.json` from the project's `package.json` minus
/// [`DEVELOPMENT_KEYS`]. Key order is preserved.
#[derive(Debug, Default)]
pub struct CleanPackageJson;

impl CleanPackageJson {
    /// Cleaned, pretty-printed copy of `source`
    pub fn clean(source: &str) -> Result<String, serde_json::Error> {
        let mut package: serde_json::Value = serde_json::from_str(source)?;
        if let Some(object) = package.as_object_mut() {
            for key in DEVELOPMENT_KEYS {
                object.shift_remove(*key);
            }
        }
        serde_json::to_string_pretty(&package)
    }
}

impl Phase for CleanPackageJson {
    fn name(&self) -> &'static str {
        "clean-package-json"
    }

    fn write_bundle(&mut self, _bundle: &Bundle, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        let source_path = cx.project.root.join("package.json");
        if !cx.fs.exists(&source_path) {
            log::debug!("clean-package-json: no package.json at {}", source_path.display());
            return Ok(());
        }
        let source = cx.fs.read(&source_path)?;
        let cleaned = Self::clean(&source).map_err(|e| {
            BuildError::phase(self.name(), format!("{}: {}", source_path.display(), e))
        })?;
        let target = cx.out_dir.join("package.json");
        cx.fs.write(&target, &cleaned)?;
        log::debug!("wrote {}", target.display());
        Ok(())
    }
}
