//! ModuleUnit entity - one source file entering the pipeline
//!
//! Created once per pipeline pass when the graph loader reads a file, and
//! never shared across passes. Contents are immutable after the read; phases
//! produce new code strings instead of mutating the unit.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::AssertionKind;

/// What a module is, judged by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// JavaScript or TypeScript source
    Script,
    /// `.css`
    Stylesheet,
    /// `.json`
    Json,
    /// Anything else
    Asset,
    /// Synthesized by the pipeline, has no file on disk
    Virtual,
}

impl ModuleKind {
    /// Extensions treated as script sources
    pub const SCRIPT_EXTENSIONS: &'static [&'static str] =
        &["ts", "tsx", "mts", "js", "mjs", "jsx"];

    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if Self::SCRIPT_EXTENSIONS.contains(&ext) => ModuleKind::Script,
            Some("css") => ModuleKind::Stylesheet,
            Some("json") => ModuleKind::Json,
            _ => ModuleKind::Asset,
        }
    }

    pub fn is_script(&self) -> bool {
        matches!(self, ModuleKind::Script | ModuleKind::Virtual)
    }
}

/// One import or re-export edge declared by a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    /// Specifier as written in source
    pub specifier: String,
    /// Absolute path of the target, for relative specifiers that resolved
    pub resolved: Option<PathBuf>,
    /// Attached type assertion, if any
    pub assertion: Option<AssertionKind>,
    /// `import()` expression rather than a static declaration
    pub dynamic: bool,
}

impl ImportEdge {
    pub fn new(specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            resolved: None,
            assertion: None,
            dynamic: false,
        }
    }

    pub fn with_assertion(mut self, assertion: Option<AssertionKind>) -> Self {
        self.assertion = assertion;
        self
    }

    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn with_resolved(mut self, resolved: PathBuf) -> Self {
        self.resolved = Some(resolved);
        self
    }
}

/// A source file read by the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleUnit {
    path: PathBuf,
    contents: String,
    kind: ModuleKind,
    imports: Vec<ImportEdge>,
}

impl ModuleUnit {
    /// Create a unit for a file on disk
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let path = path.into();
        let kind = ModuleKind::from_path(&path);
        Self {
            path,
            contents: contents.into(),
            kind,
            imports: Vec::new(),
        }
    }

    /// Create a synthesized module (e.g. the virtual entry module)
    pub fn virtual_module(id: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: id.into(),
            contents: contents.into(),
            kind: ModuleKind::Virtual,
            imports: Vec::new(),
        }
    }

    /// Attach the import edges discovered while scanning
    pub fn with_imports(mut self, imports: Vec<ImportEdge>) -> Self {
        self.imports = imports;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn imports(&self) -> &[ImportEdge] {
        &self.imports
    }

    /// File extension without the dot
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }
}
