//! Bootcamp repository.

use async_trait::async_trait;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_BOOTCAMPS;
use crate::errors::ApiError;
use crate::models::Bootcamp;

use super::store::{inserted_id, MongoCollection, QueryableCollection};
use super::traits::BootcampStore;

pub struct BootcampRepository {
    collection: Collection<Bootcamp>,
    documents: MongoCollection,
}

impl BootcampRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_BOOTCAMPS),
            documents: MongoCollection::new(db, COLLECTION_BOOTCAMPS),
        }
    }

    /// Create database indexes:
    /// - Unique index on `name`
    /// - Index on `slug`
    /// - Index on `user` for the one-bootcamp-per-publisher check
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for bootcamps collection...");

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder().keys(doc! { "slug": 1 }).build(),
            IndexModel::builder().keys(doc! { "user": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }
}

#[async_trait]
impl BootcampStore for BootcampRepository {
    fn documents(&self) -> &dyn QueryableCollection {
        &self.documents
    }

    async fn insert(&self, bootcamp: &Bootcamp) -> Result<ObjectId, ApiError> {
        inserted_id(self.collection.insert_one(bootcamp).await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Bootcamp>, ApiError> {
        debug!("Repository: Finding bootcamp by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Number of bootcamps published by `user_id`.
    async fn count_by_owner(&self, user_id: ObjectId) -> Result<u64, ApiError> {
        Ok(self
            .collection
            .count_documents(doc! { "user": user_id })
            .await?)
    }

    /// Apply `$set` with `update` and return the updated bootcamp.
    async fn update(
        &self,
        id: ObjectId,
        update: Document,
    ) -> Result<Option<Bootcamp>, ApiError> {
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update })
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Store a recomputed aggregate such as `averageCost`; `None` clears it.
    async fn set_aggregate(
        &self,
        id: ObjectId,
        field: &str,
        value: Option<f64>,
    ) -> Result<(), ApiError> {
        let mut fields = Document::new();
        let update = match value {
            Some(value) => {
                fields.insert(field, Bson::Double(value));
                doc! { "$set": fields }
            }
            None => {
                fields.insert(field, "");
                doc! { "$unset": fields }
            }
        };
        self.collection
            .update_one(doc! { "_id": id }, update)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> Result<(), ApiError> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }
}
