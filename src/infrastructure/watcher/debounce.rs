//! Debouncing of raw file-system events

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Pending changes and the time of the most recent one
#[derive(Debug, Default)]
pub struct WatcherState {
    pending_changes: BTreeSet<PathBuf>,
    last_change: Option<Instant>,
}

impl WatcherState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Quiet for at least [`DEBOUNCE_MS`] with changes pending
    pub fn should_sync(&self) -> bool {
        match self.last_change {
            Some(last) => {
                !self.pending_changes.is_empty()
                    && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
            }
            None => false,
        }
    }

    /// Take all pending changes (sorted), resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        self.last_change = None;
        std::mem::take(&mut self.pending_changes)
            .into_iter()
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_state_debouncing() {
        let mut state = WatcherState::new();
        assert!(!state.should_sync());

        state.add_change(PathBuf::from("src/alert/element.ts"));
        // still inside the debounce window
        assert!(!state.should_sync());
        assert!(state.has_pending());

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));
        assert!(state.should_sync());

        let changes = state.take_changes();
        assert_eq!(changes.len(), 1);
        assert!(!state.should_sync());
        assert!(!state.has_pending());
    }

    #[test]
    fn test_watcher_state_coalesces_and_sorts() {
        let mut state = WatcherState::new();
        state.add_change(PathBuf::from("src/b.ts"));
        state.add_change(PathBuf::from("src/a.ts"));
        state.add_change(PathBuf::from("src/b.ts"));

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));

        assert_eq!(
            state.take_changes(),
            vec![PathBuf::from("src/a.ts"), PathBuf::from("src/b.ts")]
        );
    }
}
