//! Output entities - the files a build cycle emits
//!
//! A `Bundle` maps output file names (relative to the output root, `/`
//! separated) to chunks. Phases may rewrite chunk code or drop chunks before
//! the bundle is written.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One emitted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    file_name: String,
    code: String,
    facade: PathBuf,
}

impl OutputChunk {
    pub fn new(file_name: impl Into<String>, code: impl Into<String>, facade: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            code: code.into(),
            facade: facade.into(),
        }
    }

    /// Output path relative to the output root
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: String) {
        self.code = code;
    }

    /// Source module this chunk was produced from
    pub fn facade(&self) -> &Path {
        &self.facade
    }
}

/// All chunks of one cycle, ordered by file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    chunks: BTreeMap<String, OutputChunk>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chunk: OutputChunk) {
        self.chunks.insert(chunk.file_name.clone(), chunk);
    }

    pub fn get(&self, file_name: &str) -> Option<&OutputChunk> {
        self.chunks.get(file_name)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &OutputChunk> {
        self.chunks.values()
    }

    pub fn chunks_mut(&mut self) -> impl Iterator<Item = &mut OutputChunk> {
        self.chunks.values_mut()
    }

    /// Keep only chunks for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&OutputChunk) -> bool) {
        self.chunks.retain(|_, chunk| keep(chunk));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_orders_by_file_name() {
        let mut bundle = Bundle::new();
        bundle.insert(OutputChunk::new("z.js", "", "/src/z.ts"));
        bundle.insert(OutputChunk::new("a.js", "", "/src/a.ts"));

        let names: Vec<_> = bundle.chunks().map(|c| c.file_name().to_string()).collect();
        assert_eq!(names, vec!["a.js", "z.js"]);
    }

    #[test]
    fn bundle_retain_drops_chunks() {
        let mut bundle = Bundle::new();
        bundle.insert(OutputChunk::new("a.js", "a", "/src/a.ts"));
        bundle.insert(OutputChunk::new("b.js", "b", "/src/b.ts"));

        bundle.retain(|c| c.code() == "b");
        assert_eq!(bundle.len(), 1);
        assert!(bundle.get("b.js").is_some());
    }
}
