//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `compiler/` - Transpiler adapters (external process, passthrough)
//! - `minify/` - CSS, JavaScript and template-literal minifiers
//! - `repositories/` - Lockfile snapshot storage
//! - `watcher/` - notify-based change source for watch mode

pub mod compiler;
pub mod fs;
pub mod minify;
pub mod repositories;
pub mod watcher;

pub use compiler::{CommandTranspiler, CommandTypeChecker, PassthroughTranspiler};
pub use fs::LocalFs;
pub use minify::{CommandMinifier, CssMinifier, HtmlLiteralMinifier, WhitespaceJsMinifier};
pub use repositories::FsSnapshotRepository;
pub use watcher::{FsEventSource, WatcherState};
