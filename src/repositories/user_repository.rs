//! User repository for all MongoDB operations related to users.

use async_trait::async_trait;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_USERS;
use crate::errors::ApiError;
use crate::models::{Role, User};
use crate::utils::mask_email;

use super::store::{inserted_id, MongoCollection};
use super::traits::AccountLookup;

/// Fields of a user document that are never returned to clients.
pub const USER_HIDDEN_FIELDS: &[&str] = &["password"];

/// Repository for user-related database operations.
pub struct UserRepository {
    collection: Collection<User>,
    documents: MongoCollection,
}

impl UserRepository {
    /// Create a new UserRepository instance.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_USERS),
            documents: MongoCollection::new(db, COLLECTION_USERS)
                .with_hidden_fields(USER_HIDDEN_FIELDS),
        }
    }

    /// Untyped view used by list queries; passwords are stripped.
    pub fn documents(&self) -> &MongoCollection {
        &self.documents
    }

    /// Create the unique index on `email`.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for users collection...");

        let indexes = vec![IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build()];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    /// Insert a new user into the database.
    pub async fn insert(&self, user: &User) -> Result<ObjectId, ApiError> {
        inserted_id(self.collection.insert_one(user).await?)
    }

    /// Find a user by their ObjectId.
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, ApiError> {
        debug!("Repository: Finding user by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Find a user by email address (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        debug!("Repository: Finding user by email: {}", mask_email(email));
        Ok(self
            .collection
            .find_one(doc! { "email": email.to_lowercase() })
            .await?)
    }

    /// Apply `$set` with `update` and return the updated user.
    pub async fn update(&self, id: ObjectId, update: Document) -> Result<Option<User>, ApiError> {
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update })
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// Replace the stored password hash.
    pub async fn update_password(&self, id: ObjectId, password_hash: &str) -> Result<(), ApiError> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "password": password_hash } },
            )
            .await?;
        Ok(())
    }

    /// Delete a user by ObjectId, returning whether one was removed.
    pub async fn delete(&self, id: ObjectId) -> Result<bool, ApiError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl AccountLookup for UserRepository {
    async fn current_role(&self, id: ObjectId) -> Result<Option<Role>, ApiError> {
        Ok(self.find_by_id(id).await?.map(|user| user.role))
    }
}
