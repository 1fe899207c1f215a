//! Domain Services
//!
//! Pure logic over source text and domain entities.
//! These services have no I/O dependencies and are easily testable.

pub mod analyzer;
pub mod assertions;
pub mod doc_comment;
pub mod drift;
pub mod imports;
pub mod lexer;
pub mod manifest_passes;
pub mod output_cache;

pub use analyzer::{analyze_module, AnalyzerOptions, DEFAULT_COMMAND_TAG, DEFAULT_METADATA_TAGS};
pub use assertions::{
    apply_edits, asserted_module_body, requote, AssertionRecord, AssertionTable, TextEdit,
};
pub use drift::{DriftLock, DriftStatus, DriftSummary};
pub use imports::{scan_imports, ImportSite};
pub use manifest_passes::{sort_modules, ManifestPasses};
pub use output_cache::OutputCache;
