//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod change_source;
pub mod file_system;
pub mod minifier;
pub mod snapshot_repository;
pub mod transpiler;
pub mod type_checker;

pub use change_source::ChangeSource;
pub use file_system::{FileSystem, FsError, FsResult};
pub use minifier::Minifier;
pub use snapshot_repository::SnapshotRepository;
pub use transpiler::{CompileRequest, Transpiler};
pub use type_checker::TypeChecker;
