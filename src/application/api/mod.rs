//! API drift lock use case
//!
//! Regenerates the manifest and compares it with the lockfile, updating the
//! lockfile on request.

mod options;
mod result;
mod use_case;


pub use options::ApiOptions;
pub use result::ApiResult;
pub use use_case::ApiUseCase;
