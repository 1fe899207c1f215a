//! Import assertion kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an import site asks for its target to be interpreted.
///
/// Written as `with { type: 'css' }` (or the older `assert { ... }`) on a
/// static import, or as the options argument of a dynamic `import()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssertionKind {
    /// Constructible stylesheet module
    Css,
    /// JSON module
    Json,
}

impl AssertionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssertionKind::Css => "css",
            AssertionKind::Json => "json",
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssertionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "css" => Ok(AssertionKind::Css),
            "json" => Ok(AssertionKind::Json),
            other => Err(format!("unsupported import assertion type '{}'", other)),
        }
    }
}
