//! Identity transpiler, used when no compiler command is configured

use crate::domain::ports::transpiler::{CompileRequest, Transpiler};
use crate::error::BuildResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranspiler;

impl Transpiler for PassthroughTranspiler {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn compile(&self, request: &CompileRequest) -> BuildResult<String> {
        Ok(request.code.clone())
    }
}
