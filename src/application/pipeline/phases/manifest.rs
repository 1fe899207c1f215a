//! `custom-elements-manifest`: write the API manifest once per process

use crate::application::manifest::{ManifestGenerator, ManifestOptions};
use crate::application::pipeline::{CycleContext, Phase};
use crate::domain::entities::Bundle;
use crate::error::BuildResult;

#[derive(Debug, Default)]
pub struct CustomElementsManifest {
    written: bool,
}

impl CustomElementsManifest {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Phase for CustomElementsManifest {
    fn name(&self) -> &'static str {
        "custom-elements-manifest"
    }

    fn write_bundle(&mut self, _bundle: &Bundle, cx: &mut CycleContext<'_>) -> BuildResult<()> {
        if self.written {
            return Ok(());
        }
        let generator = ManifestGenerator::new(cx.fs, ManifestOptions::from_project(cx.project));
        generator.write(&cx.project.manifest_path())?;
        self.written = true;
        Ok(())
    }
}
