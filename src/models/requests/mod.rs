//! Request models for API endpoints.

pub mod auth;
pub mod bootcamp;
pub mod course;
pub mod review;
pub mod user;

pub use auth::*;
pub use bootcamp::*;
pub use course::*;
pub use review::*;
pub use user::*;
