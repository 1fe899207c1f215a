//! Build mode value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether the pipeline produces release artifacts or a fast dev build.
///
/// The CLI exports this as `BLUEPRINTUI_BUILD` before the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Production,
    Development,
}

impl BuildMode {
    /// Environment variable carrying the mode
    pub const ENV_VAR: &'static str = "BLUEPRINTUI_BUILD";

    /// Parse the environment representation. Anything but `development`
    /// is treated as a production build.
    pub fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("development") {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, BuildMode::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Production => "production",
            BuildMode::Development => "development",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_value_development() {
        assert_eq!(
            BuildMode::from_env_value("development"),
            BuildMode::Development
        );
        assert_eq!(
            BuildMode::from_env_value(" Development "),
            BuildMode::Development
        );
    }

    #[test]
    fn env_value_defaults_to_production() {
        assert_eq!(BuildMode::from_env_value("production"), BuildMode::Production);
        assert_eq!(BuildMode::from_env_value(""), BuildMode::Production);
        assert!(BuildMode::from_env_value("prod").is_production());
    }
}
