pub mod api;
pub mod build;
pub mod new;
