//! Course repository.

use async_trait::async_trait;
use futures::TryStreamExt;
use log::debug;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::constants::COLLECTION_COURSES;
use crate::errors::ApiError;
use crate::models::Course;

use super::store::{inserted_id, MongoCollection, QueryableCollection};
use super::traits::CourseStore;

pub struct CourseRepository {
    collection: Collection<Course>,
    documents: MongoCollection,
}

impl CourseRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_COURSES),
            documents: MongoCollection::new(db, COLLECTION_COURSES),
        }
    }
}

#[async_trait]
impl CourseStore for CourseRepository {
    fn documents(&self) -> &dyn QueryableCollection {
        &self.documents
    }

    async fn insert(&self, course: &Course) -> Result<ObjectId, ApiError> {
        inserted_id(self.collection.insert_one(course).await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Course>, ApiError> {
        debug!("Repository: Finding course by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn update(&self, id: ObjectId, update: Document) -> Result<Option<Course>, ApiError> {
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

    /// Remove every course of a bootcamp.
    async fn delete_by_bootcamp(&self, bootcamp_id: ObjectId) -> Result<u64, ApiError> {
        let result = self
            .collection
            .delete_many(doc! { "bootcamp": bootcamp_id })
            .await?;
        Ok(result.deleted_count)
    }

    /// Mean tuition of a bootcamp's courses, `None` when it has none.
    async fn average_tuition(&self, bootcamp_id: ObjectId) -> Result<Option<f64>, ApiError> {
        let pipeline = vec![
            doc! { "$match": { "bootcamp": bootcamp_id } },
            doc! { "$group": { "_id": "$bootcamp", "averageCost": { "$avg": "$tuition" } } },
        ];
        let group: Option<Document> = self.collection.aggregate(pipeline).await?.try_next().await?;
        Ok(group.and_then(|g| g.get_f64("averageCost").ok()))
    }
}
