//! notify-backed change source

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::ports::ChangeSource;
use crate::domain::value_objects::ContentHash;
use crate::error::{BuildError, BuildResult};

use super::debounce::WatcherState;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Watches the source root and yields debounced batches of edited files.
///
/// Events under any of the `ignored` directories (the output root) are
/// dropped, as are saves that leave a file's content unchanged.
pub struct FsEventSource {
    // dropping the watcher stops event delivery
    _watcher: RecommendedWatcher,
    rx: Receiver<PathBuf>,
    ignored: Vec<PathBuf>,
    state: WatcherState,
    content_hashes: HashMap<PathBuf, ContentHash>,
}

impl FsEventSource {
    pub fn new(root: &Path, ignored: Vec<PathBuf>) -> BuildResult<Self> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if !matches!(event.kind, EventKind::Access(_)) => {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("watch error: {}", e),
            },
            Config::default(),
        )
        .map_err(|e| BuildError::Watch(e.to_string()))?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| BuildError::Watch(format!("{}: {}", root.display(), e)))?;
        log::debug!("watching {}", root.display());

        let source = Self {
            _watcher: watcher,
            rx,
            ignored,
            state: WatcherState::new(),
            content_hashes: HashMap::new(),
        };
        source.drain_startup_events();
        Ok(source)
    }

    /// Some backends report existing files right after registration
    fn drain_startup_events(&self) {
        let cooldown_end = Instant::now() + Duration::from_millis(200);
        while Instant::now() < cooldown_end {
            let _ = self.rx.recv_timeout(POLL_INTERVAL);
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.ignored.iter().any(|dir| path.starts_with(dir))
    }

    /// Record `path` unless it is ignored or its bytes did not change
    fn observe(&mut self, path: PathBuf) {
        if self.is_ignored(&path) {
            return;
        }
        match std::fs::read(&path) {
            Ok(bytes) => {
                let hash = ContentHash::from_bytes(&bytes);
                if self.content_hashes.get(&path) == Some(&hash) {
                    log::trace!("unchanged save ignored: {}", path.display());
                    return;
                }
                self.content_hashes.insert(path.clone(), hash);
            }
            // removed or a directory; still worth a rebuild
            Err(_) => {
                self.content_hashes.remove(&path);
            }
        }
        self.state.add_change(path);
    }
}

impl ChangeSource for FsEventSource {
    fn next_batch(&mut self, running: &AtomicBool) -> BuildResult<Option<Vec<PathBuf>>> {
        while running.load(Ordering::SeqCst) {
            match self.rx.recv_timeout(POLL_INTERVAL) {
                Ok(path) => self.observe(path),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Ok(None),
            }

            if self.state.should_sync() {
                return Ok(Some(self.state.take_changes()));
            }
        }
        Ok(None)
    }
}
