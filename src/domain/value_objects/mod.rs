//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod assertion;
mod build_mode;
mod hash;
mod source_path;

pub use assertion::AssertionKind;
pub use build_mode::BuildMode;
pub use hash::ContentHash;
pub use source_path::{
    is_relative_specifier, join_specifier, normalize_path, path_to_slash, replace_extension,
};
