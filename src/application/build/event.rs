//! Build events for terminal and NDJSON output

use serde::Serialize;

/// Observable events of a build or watch session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BuildEvent {
    /// Watch mode is listening
    WatchStarted { source: String },
    /// A source file changed
    FileChanged { path: String },
    /// A cycle began
    Start { cycle: u64 },
    Warning { message: String },
    /// The current cycle failed
    Error { message: String },
    /// The current cycle finished
    Complete {
        cycle: u64,
        duration_ms: u64,
        modules: usize,
        written: usize,
        suppressed: usize,
    },
    /// Watch mode stopped
    Shutdown,
}

impl BuildEvent {
    /// Convert to JSON string with "command": "build" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("build"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
