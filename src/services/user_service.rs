//! User administration: listing, creating, updating and deleting accounts.

use log::{info, warn};
use mongodb::bson::{self, oid::ObjectId, DateTime};
use mongodb::Database;

use crate::constants::CODE_USER_NOT_FOUND;
use crate::errors::ApiError;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::query::{advanced_results, AdvancedResults};
use crate::repositories::UserRepository;
use crate::services::auth_service::hash_password;
use crate::utils::mask_email;

pub struct UserService {
    repository: UserRepository,
}

impl UserService {
    pub fn new(db: &Database) -> Self {
        Self {
            repository: UserRepository::new(db),
        }
    }

    /// Filtered, sorted and paginated users, without password hashes.
    pub async fn list(&self, params: &[(String, String)]) -> Result<AdvancedResults, ApiError> {
        advanced_results(self.repository.documents(), params, None).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        let object_id = ObjectId::parse_str(id)?;
        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    pub async fn create_user(&self, req: CreateUserRequest) -> Result<User, ApiError> {
        info!("Admin creating user {}", mask_email(&req.email));

        let user = User {
            id: None,
            name: req.name.trim().to_string(),
            email: req.email.to_lowercase(),
            role: req.role.unwrap_or_default(),
            password: hash_password(&req.password)?,
            created_at: DateTime::now(),
        };

        let id = self.repository.insert(&user).await?;
        Ok(User {
            id: Some(id),
            ..user
        })
    }

    pub async fn update_user(&self, id: &str, req: UpdateUserRequest) -> Result<User, ApiError> {
        let object_id = ObjectId::parse_str(id)?;

        let mut update = bson::to_document(&req)?;
        if let Some(email) = req.email {
            update.insert("email", email.to_lowercase());
        }

        if update.is_empty() {
            return self.get_user(id).await;
        }

        info!("Updating user {}", id);
        self.repository
            .update(object_id, update)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let object_id = ObjectId::parse_str(id)?;

        if !self.repository.delete(object_id).await? {
            warn!("Delete failed: User not found with id: {}", id);
            return Err(user_not_found(id));
        }

        info!("Deleted user {}", id);
        Ok(())
    }
}

fn user_not_found(id: &str) -> ApiError {
    ApiError::not_found(CODE_USER_NOT_FOUND, format!("No user with the id of {}", id))
}
