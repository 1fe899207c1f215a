//! Terminal rendering for the `bp` binary
//!
//! Views turn application results into strings; commands decide where they
//! are printed. Nothing in here touches the build itself.

pub mod blocks;
pub mod ci;
pub mod components;
pub mod context;
pub mod error;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
