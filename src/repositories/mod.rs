//! Repository layer for database operations.
//!
//! Typed repositories handle CRUD for each resource behind the store traits;
//! [`QueryableCollection`] is the untyped view the list queries run against.

pub mod bootcamp_repository;
pub mod course_repository;
#[cfg(test)]
pub mod memory;
pub mod review_repository;
pub mod store;
pub mod traits;
pub mod user_repository;

pub use bootcamp_repository::BootcampRepository;
pub use course_repository::CourseRepository;
#[cfg(test)]
pub use memory::{MemoryAccounts, MemoryCollection};
pub use review_repository::ReviewRepository;
pub use store::{MongoCollection, QueryableCollection};
pub use traits::{AccountLookup, BootcampStore, CourseStore, ReviewStore};
pub use user_repository::UserRepository;
