//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Command line definition shared by the binary and its tests
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use blueprintui::presentation::factory;
//!
//! let mut controller = factory::create_build_controller(project)?;
//! let outcome = controller.run_once()?;
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands};
pub use factory::{
    create_api_use_case, create_build_controller, create_change_source, create_scaffold_use_case,
    create_toolchain,
};
