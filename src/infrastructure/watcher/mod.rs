//! File watching for `bp build --watch`
//!
//! `FsEventSource` adapts notify to the ChangeSource port; `WatcherState`
//! coalesces bursts of events into one batch per rebuild.

mod debounce;
mod fs_events;

pub use debounce::{WatcherState, DEBOUNCE_MS};
pub use fs_events::FsEventSource;
