//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `ModuleUnit` - One source file entering the pipeline
//! - `OutputChunk` / `Bundle` - Emitted files of one build cycle
//! - `ManifestDocument` - Generated API surface description
//! - `LockSnapshot` - Last accepted serialized manifest

mod lock_snapshot;
mod manifest;
mod module_unit;
mod output_file;

pub use lock_snapshot::LockSnapshot;
pub use manifest::{
    CommandDoc, DeclarationDoc, DeclarationKind, ExportDoc, ExportKind,
    ManifestDocument, MemberDoc, MemberKind, ModuleDoc, NamedDoc, Privacy, Reference,
    MANIFEST_SCHEMA_VERSION,
};
pub use module_unit::{ImportEdge, ModuleKind, ModuleUnit};
pub use output_file::{Bundle, OutputChunk};
