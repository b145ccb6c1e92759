//! Small helpers shared across layers.

pub mod json;
pub mod log_sanitizer;
pub mod slug;

pub use json::*;
pub use log_sanitizer::*;
pub use slug::*;
