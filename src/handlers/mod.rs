//! HTTP request handlers organized by resource.

pub mod auth_handler;
pub mod bootcamp_handler;
pub mod course_handler;
pub mod review_handler;
pub mod user_handler;

pub use auth_handler::*;
pub use bootcamp_handler::*;
pub use course_handler::*;
pub use review_handler::*;
pub use user_handler::*;
