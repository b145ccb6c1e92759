//! Typed persistence used by the services.
//!
//! The MongoDB repositories implement these; services only see the traits.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::errors::ApiError;
use crate::models::{Bootcamp, Course, Review, Role};

use super::store::QueryableCollection;

/// Resolves the account behind a token on every authenticated request.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// The account's stored role, `None` when the account no longer exists.
    async fn current_role(&self, id: ObjectId) -> Result<Option<Role>, ApiError>;
}

#[async_trait]
pub trait BootcampStore: Send + Sync {
    /// Untyped view for list and populated queries.
    fn documents(&self) -> &dyn QueryableCollection;

    async fn insert(&self, bootcamp: &Bootcamp) -> Result<ObjectId, ApiError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Bootcamp>, ApiError>;

    /// Number of bootcamps published by `user_id`.
    async fn count_by_owner(&self, user_id: ObjectId) -> Result<u64, ApiError>;

    /// Apply `$set` with `update` and return the updated bootcamp.
    async fn update(&self, id: ObjectId, update: Document) -> Result<Option<Bootcamp>, ApiError>;

    /// Store a recomputed aggregate such as `averageCost`; `None` clears it.
    async fn set_aggregate(
        &self,
        id: ObjectId,
        field: &str,
        value: Option<f64>,
    ) -> Result<(), ApiError>;

    async fn delete(&self, id: ObjectId) -> Result<(), ApiError>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    fn documents(&self) -> &dyn QueryableCollection;

    async fn insert(&self, course: &Course) -> Result<ObjectId, ApiError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Course>, ApiError>;

    async fn update(&self, id: ObjectId, update: Document) -> Result<Option<Course>, ApiError>;

    async fn delete(&self, id: ObjectId) -> Result<(), ApiError>;

    /// Remove every course of a bootcamp.
    async fn delete_by_bootcamp(&self, bootcamp_id: ObjectId) -> Result<u64, ApiError>;

    /// Mean tuition of a bootcamp's courses, `None` when it has none.
    async fn average_tuition(&self, bootcamp_id: ObjectId) -> Result<Option<f64>, ApiError>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    fn documents(&self) -> &dyn QueryableCollection;

    /// Fails with "Duplicate value entered" when the user already reviewed the bootcamp.
    async fn insert(&self, review: &Review) -> Result<ObjectId, ApiError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Review>, ApiError>;

    async fn update(&self, id: ObjectId, update: Document) -> Result<Option<Review>, ApiError>;

    async fn delete(&self, id: ObjectId) -> Result<(), ApiError>;

    /// Remove every review of a bootcamp.
    async fn delete_by_bootcamp(&self, bootcamp_id: ObjectId) -> Result<u64, ApiError>;

    /// Mean rating of a bootcamp's reviews, `None` when it has none.
    async fn average_rating(&self, bootcamp_id: ObjectId) -> Result<Option<f64>, ApiError>;
}
