//! `inline-package-version`: substitute the `PACKAGE_VERSION` token

use crate::application::pipeline::{CycleContext, Phase};
use crate::domain::entities::OutputChunk;
use crate::error::BuildResult;

/// Placeholder replaced in emitted code
pub const VERSION_TOKEN: &str = "PACKAGE_VERSION";

#[derive(Debug, Default)]
pub struct InlinePackageVersion;

impl Phase for InlinePackageVersion {
    fn name(&self) -> &'static str {
        "inline-package-version"
    }

    fn render_chunk(&mut self, chunk: &mut OutputChunk, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        if !chunk.code().contains(VERSION_TOKEN) {
            return Ok(());
        }
        match cx.project.package.version.clone() {
            Some(version) => {
                let code = chunk.code().replace(VERSION_TOKEN, &version);
                chunk.set_code(code);
            }
            None => cx.warn(format!(
                "{} uses {} but package.json has no version; token left as is",
                chunk.file_name(),
                VERSION_TOKEN
            )),
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

    #[test]
    fn replaces_every_occurrence() {
        let mut project = ProjectContext::with_defaults("/lib", BuildMode::Production);
        project.package.version = Some("2.1.0".to_string());
        let local = LocalFs::new();
        let mut cx = CycleContext::new(&project, &local);
        let mut chunk = OutputChunk::new(
            "index.js",
            "export const version = 'PACKAGE_VERSION'; log('PACKAGE_VERSION');",
            "/lib/src/index.ts",
        );

        InlinePackageVersion.render_chunk(&mut chunk, &mut cx).unwrap();
        assert_eq!(chunk.code(), "export const version = '2.1.0'; log('2.1.0');");
    }

    #[test]
    fn missing_version_warns_and_keeps_token() {
        let project = ProjectContext::with_defaults("/lib", BuildMode::Production);
        let local = LocalFs::new();
        let mut cx = CycleContext::new(&project, &local);
        let mut chunk = OutputChunk::new("index.js", "'PACKAGE_VERSION'", "/lib/src/index.ts");

        InlinePackageVersion.render_chunk(&mut chunk, &mut cx).unwrap();
        assert_eq!(chunk.code(), "'PACKAGE_VERSION'");
        assert_eq!(cx.warnings.len(), 1);
    }
}
