//! Review repository.

use async_trait::async_trait;
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_REVIEWS;
use crate::errors::ApiError;
use crate::models::Review;

use super::store::{inserted_id, MongoCollection, QueryableCollection};
use super::traits::ReviewStore;

pub struct ReviewRepository {
    collection: Collection<Review>,
    documents: MongoCollection,
}

impl ReviewRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_REVIEWS),
            documents: MongoCollection::new(db, COLLECTION_REVIEWS),
        }
    }

    /// Create the unique `{bootcamp, user}` index that limits a user to one
    /// review per bootcamp.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for reviews collection...");

        let indexes = vec![IndexModel::builder()
            .keys(doc! { "bootcamp": 1, "user": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build()];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }
}

#[async_trait]
impl ReviewStore for ReviewRepository {
    fn documents(&self) -> &dyn QueryableCollection {
        &self.documents
    }

    async fn insert(&self, review: &Review) -> Result<ObjectId, ApiError> {
        inserted_id(self.collection.insert_one(review).await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Review>, ApiError> {
        debug!("Repository: Finding review by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn update(&self, id: ObjectId, update: Document) -> Result<Option<Review>, ApiError> {
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete(&self, id: ObjectId) -> Result<(), ApiError> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }

    /// Remove every review of a bootcamp.
    async fn delete_by_bootcamp(&self, bootcamp_id: ObjectId) -> Result<u64, ApiError> {
        let result = self
            .collection
            .delete_many(doc! { "bootcamp": bootcamp_id })
            .await?;
        Ok(result.deleted_count)
    }

    /// Mean rating of a bootcamp's reviews, `None` when it has none.
    async fn average_rating(&self, bootcamp_id: ObjectId) -> Result<Option<f64>, ApiError> {
        let pipeline = vec![
            doc! { "$match": { "bootcamp": bootcamp_id } },
            doc! { "$group": { "_id": "$bootcamp", "averageRating": { "$avg": "$rating" } } },
        ];
        let group: Option<Document> = self.collection.aggregate(pipeline).await?.try_next().await?;
        Ok(group.and_then(|g| g.get_f64("averageRating").ok()))
    }
}
