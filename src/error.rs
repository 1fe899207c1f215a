//! Error types for the build tool
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;
use crate::domain::value_objects::AssertionKind;

/// Result type alias for build operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Coarse error taxonomy used to decide how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or unreadable user configuration; the pipeline never starts
    Configuration,
    /// Source rejected while bundling or compiling
    Compilation,
    /// Static analysis failed while producing the API manifest
    Manifest,
    /// Anything else (I/O, watcher setup, scaffolding)
    Environment,
}

/// Main error type for build operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// Config file explicitly requested but not present
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Config file present but not valid
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Source text could not be tokenized or is structurally broken
    #[error("{file}:{line}:{column}: {message}")]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A relative import does not point at a file
    #[error("could not resolve '{specifier}' from {importer}")]
    Resolve { specifier: String, importer: PathBuf },

    /// Two import sites assert different kinds for one module
    #[error(
        "conflicting import assertions for {path}: '{first}' (from {first_importer}) and '{second}' (from {second_importer})"
    )]
    AssertionConflict {
        path: PathBuf,
        first: AssertionKind,
        first_importer: PathBuf,
        second: AssertionKind,
        second_importer: PathBuf,
    },

    /// The transpiler (or a module transform) rejected a file
    #[error("failed to compile {file}: {message}")]
    Compile { file: PathBuf, message: String },

    /// A pipeline phase failed outside of per-module compilation
    #[error("phase '{phase}' failed: {message}")]
    Phase { phase: &'static str, message: String },

    /// Manifest generation failed
    #[error("manifest generation failed: {0}")]
    Manifest(String),

    /// Scaffolding a new library failed
    #[error("cannot scaffold '{name}': {reason}")]
    Scaffold { name: String, reason: String },

    /// File watcher could not be set up
    #[error("watch error: {0}")]
    Watch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BuildError {
    /// Map the error onto the taxonomy used by the CLI
    pub fn category(&self) -> ErrorCategory {
        match self {
            BuildError::ConfigNotFound { .. } | BuildError::InvalidConfig { .. } => {
                ErrorCategory::Configuration
            }
            BuildError::Parse { .. }
            | BuildError::Resolve { .. }
            | BuildError::AssertionConflict { .. }
            | BuildError::Compile { .. }
            | BuildError::Phase { .. } => ErrorCategory::Compilation,
            BuildError::Manifest(_) => ErrorCategory::Manifest,
            BuildError::Scaffold { .. }
            | BuildError::Watch(_)
            | BuildError::Io(_)
            | BuildError::Fs(_)
            | BuildError::Json(_) => ErrorCategory::Environment,
        }
    }

    pub(crate) fn phase(phase: &'static str, message: impl Into<String>) -> Self {
        BuildError::Phase {
            phase,
            message: message.into(),
        }
    }
}
