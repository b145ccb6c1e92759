//! MongoDB collection names.

pub const COLLECTION_BOOTCAMPS: &str = "bootcamps";
pub const COLLECTION_COURSES: &str = "courses";
pub const COLLECTION_REVIEWS: &str = "reviews";
pub const COLLECTION_USERS: &str = "users";
