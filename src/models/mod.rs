//! Data models organized by type.

pub mod bootcamp;
pub mod claims;
pub mod course;
pub mod owned;
pub mod requests;
pub mod responses;
pub mod review;
pub mod user;

pub use bootcamp::*;
pub use claims::*;
pub use course::*;
pub use owned::*;
pub use requests::*;
pub use responses::*;
pub use review::*;
pub use user::*;
