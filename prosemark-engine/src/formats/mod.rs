//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the markup tree and various text representations.

pub mod html;
pub mod markdown;

pub use html::HtmlFormat;
pub use markdown::MarkdownFormat;
