//! Services organized by domain concern.

pub mod auth_service;
pub mod bootcamp_service;
pub mod course_service;
pub mod review_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use bootcamp_service::BootcampService;
pub use course_service::CourseService;
pub use review_service::ReviewService;
pub use user_service::UserService;
