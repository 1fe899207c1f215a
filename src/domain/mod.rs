//! Domain Layer
//!
//! Pure logic of the build tool without process or watcher dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Core entities (ModuleUnit, ManifestDocument, LockSnapshot)
//! - `value_objects/` - Immutable value types (AssertionKind, BuildMode, ContentHash)
//! - `services/` - Domain services (lexer, import scanner, analyzer, manifest passes,
//!   output cache, drift lock)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No process I/O** - compilers, minifiers and watchers sit behind ports
//! 2. **Pure Functions** - Services are stateless where possible and testable
//! 3. **Ports & Adapters** - All external collaborators go through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
