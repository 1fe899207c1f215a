//! Compiler adapters
//!
//! Implementations of the Transpiler and TypeChecker ports.

mod command;
mod passthrough;
mod process;
mod type_check;

pub use command::CommandTranspiler;
pub use passthrough::PassthroughTranspiler;
pub(crate) use process::run_filter;
pub use type_check::CommandTypeChecker;
