//! `patch-super-minify`: undo a minifier rewrite some engines mis-handle
//!
//! Minifiers fold a constructor's `super()` call into a comma sequence with
//! the following statement. Safari 15 and some Chromium builds misbehave on
//! that shape, so the call is split back out.

use crate::application::pipeline::{CycleContext, Phase};
use crate::domain::entities::OutputChunk;
use crate::error::BuildResult;

/// `(from, to)` replacements, applied in order
const SUPER_CALL_PATCHES: &[(&str, &str)] = &[
    ("super(...arguments),", "super(...arguments);"),
    ("super(),", "super();"),
];

#[derive(Debug, Default)]
pub struct PatchSuperMinify;

impl Phase for PatchSuperMinify {
    fn name(&self) -> &'static str {
        "patch-super-minify"
    }

    fn render_chunk(&mut self, chunk: &mut OutputChunk, _cx: &mut CycleContext<'_>) -> BuildResult<()> {
        if !SUPER_CALL_PATCHES.iter().any(|(from, _)| chunk.code().contains(from)) {
            return Ok(());
        }
        let mut code = chunk.code().to_string();
        for (from, to) in SUPER_CALL_PATCHES {
            code = code.replace(from, to);
        }
        chunk.set_code(code);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectContext;
    use crate::domain::value_objects::BuildMode;
    use crate::infrastructure::fs::LocalFs;

    fn patch(code: &str) -> String {
        let project = ProjectContext::with_defaults("/lib", BuildMode::Production);
        let local = LocalFs::new();
        let mut cx = CycleContext::new(&project, &local);
        let mut chunk = OutputChunk::new("alert/element.js", code, "/lib/src/alert/element.ts");
        PatchSuperMinify.render_chunk(&mut chunk, &mut cx).unwrap();
        chunk.code().to_string()
    }

    #[test]
    fn splits_folded_super_calls() {
        assert_eq!(
            patch("constructor(){super(...arguments),this.status=\"info\"}"),
            "constructor(){super(...arguments);this.status=\"info\"}"
        );
        assert_eq!(
            patch("constructor(){super(),this.a=1}"),
            "constructor(){super();this.a=1}"
        );
    }

    #[test]
    fn leaves_other_calls_alone() {
        let code = "constructor(){super(a),f(super.x)}";
        assert_eq!(patch(code), code);
    }
}
