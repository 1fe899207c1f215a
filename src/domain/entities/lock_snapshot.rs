//! LockSnapshot entity - the last accepted manifest
//!
//! Persisted between runs. Only an explicit update replaces it; verification
//! compares bytes and never merges.

/// Serialized manifest as committed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockSnapshot {
    content: String,
}

impl LockSnapshot {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Byte-for-byte equality with a freshly generated manifest
    pub fn matches(&self, generated: &str) -> bool {
        self.content.as_bytes() == generated.as_bytes()
    }
}
