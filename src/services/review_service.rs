//! Bootcamp reviews and the average rating derived from them.

use std::sync::Arc;

use log::{debug, info};
use mongodb::bson::{self, doc, oid::ObjectId, DateTime};
use mongodb::Database;
use serde_json::Value;

use crate::constants::{CODE_BOOTCAMP_NOT_FOUND, CODE_REVIEW_NOT_FOUND};
use crate::errors::ApiError;
use crate::middleware::require_owner_or_admin;
use crate::models::{Claims, CreateReviewRequest, Review, UpdateReviewRequest};
use crate::query::{advanced_results, AdvancedResults};
use crate::repositories::{BootcampRepository, BootcampStore, ReviewRepository, ReviewStore};
use crate::services::bootcamp_service::BOOTCAMP_SUMMARY;
use crate::utils::document_to_json;

pub struct ReviewService {
    reviews: Arc<dyn ReviewStore>,
    bootcamps: Arc<dyn BootcampStore>,
}

impl ReviewService {
    pub fn new(db: &Database) -> Self {
        Self::with_stores(
            Arc::new(ReviewRepository::new(db)),
            Arc::new(BootcampRepository::new(db)),
        )
    }

    pub fn with_stores(
        reviews: Arc<dyn ReviewStore>,
        bootcamps: Arc<dyn BootcampStore>,
    ) -> Self {
        Self { reviews, bootcamps }
    }

    /// Reviews are listed with their bootcamp's name and description.
    pub async fn list(&self, params: &[(String, String)]) -> Result<AdvancedResults, ApiError> {
        advanced_results(self.reviews.documents(), params, Some(BOOTCAMP_SUMMARY)).await
    }

    pub async fn list_for_bootcamp(&self, bootcamp_id: &str) -> Result<Vec<Value>, ApiError> {
        let bootcamp_id = ObjectId::parse_str(bootcamp_id)?;
        let reviews = self
            .reviews
            .documents()
            .find_all_populated(doc! { "bootcamp": bootcamp_id }, None)
            .await?;
        Ok(reviews.into_iter().map(document_to_json).collect())
    }

    pub async fn get_review(&self, id: &str) -> Result<Value, ApiError> {
        let object_id = ObjectId::parse_str(id)?;
        self.reviews
            .documents()
            .find_one_populated(doc! { "_id": object_id }, Some(BOOTCAMP_SUMMARY))
            .await?
            .map(document_to_json)
            .ok_or_else(|| review_not_found(id))
    }

    /// Review a bootcamp; a second review by the same user is a duplicate.
    pub async fn create_review(
        &self,
        claims: &Claims,
        bootcamp_id: &str,
        req: CreateReviewRequest,
    ) -> Result<Review, ApiError> {
        let bootcamp_object_id = ObjectId::parse_str(bootcamp_id)?;
        if self.bootcamps.find_by_id(bootcamp_object_id).await?.is_none() {
            return Err(ApiError::not_found(
                CODE_BOOTCAMP_NOT_FOUND,
                format!("No bootcamp with the id of {}", bootcamp_id),
            ));
        }

        let review = Review {
            id: None,
            title: req.title.trim().to_string(),
            text: req.text,
            rating: req.rating,
            created_at: DateTime::now(),
            bootcamp: bootcamp_object_id,
            user: claims.user_id()?,
        };

        let id = self.reviews.insert(&review).await?;
        info!("Review {} added to bootcamp {}", id, bootcamp_object_id);
        self.refresh_average_rating(bootcamp_object_id).await?;

        Ok(Review {
            id: Some(id),
            ..review
        })
    }

    pub async fn update_review(
        &self,
        claims: &Claims,
        id: &str,
        req: UpdateReviewRequest,
    ) -> Result<Review, ApiError> {
        let (object_id, review) = self.find(id).await?;
        require_owner_or_admin(claims, &review, "update")?;

        let update = bson::to_document(&req)?;
        if update.is_empty() {
            return Ok(review);
        }

        let updated = self
            .reviews
            .update(object_id, update)
            .await?
            .ok_or_else(|| review_not_found(id))?;
        self.refresh_average_rating(updated.bootcamp).await?;
        Ok(updated)
    }

    pub async fn delete_review(&self, claims: &Claims, id: &str) -> Result<(), ApiError> {
        let (object_id, review) = self.find(id).await?;
        require_owner_or_admin(claims, &review, "delete")?;

        self.reviews.delete(object_id).await?;
        info!("Review {} deleted", object_id);
        self.refresh_average_rating(review.bootcamp).await
    }

    async fn find(&self, id: &str) -> Result<(ObjectId, Review), ApiError> {
        let object_id = ObjectId::parse_str(id)?;
        let review = self
            .reviews
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| review_not_found(id))?;
        Ok((object_id, review))
    }

    async fn refresh_average_rating(&self, bootcamp_id: ObjectId) -> Result<(), ApiError> {
        let average = self.reviews.average_rating(bootcamp_id).await?;
        debug!("Average rating of bootcamp {} is now {:?}", bootcamp_id, average);
        self.bootcamps
            .set_aggregate(bootcamp_id, "averageRating", average)
            .await
    }
}

fn review_not_found(id: &str) -> ApiError {
    ApiError::not_found(
        CODE_REVIEW_NOT_FOUND,
        format!("No review found with the id of {}", id),
    )
}
