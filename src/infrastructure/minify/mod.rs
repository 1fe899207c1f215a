//! Minifier adapters
//!
//! Implementations of the Minifier port. The pipeline only relies on the
//! port contract; none of these aim to be a full optimizer.

mod command;
mod css;
mod html;
mod js;

pub use command::CommandMinifier;
pub use css::CssMinifier;
pub use html::HtmlLiteralMinifier;
pub use js::WhitespaceJsMinifier;
