//! Authentication service for registration, login, the caller's own account,
//! token generation and password utilities.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use log::{debug, info, warn};
use mongodb::bson::{self, oid::ObjectId, DateTime};
use mongodb::Database;

use crate::config::CONFIG;
use crate::constants::{
    CODE_INVALID_CREDENTIALS, CODE_USER_NOT_FOUND, CODE_WRONG_PASSWORD, ERR_INVALID_CREDENTIALS,
    ERR_MISSING_INSERTED_ID, ERR_WRONG_PASSWORD,
};
use crate::errors::ApiError;
use crate::models::{
    Claims, LoginRequest, RegisterRequest, UpdateDetailsRequest, UpdatePasswordRequest, User,
};
use crate::repositories::UserRepository;
use crate::utils::mask_email;

/// Service for authentication operations.
pub struct AuthService {
    repository: UserRepository,
}

impl AuthService {
    /// Create a new AuthService instance.
    pub fn new(db: &Database) -> Self {
        Self {
            repository: UserRepository::new(db),
        }
    }

    /// Create an account and return a token for it.
    pub async fn register(&self, req: RegisterRequest) -> Result<String, ApiError> {
        info!("Registering user {}", mask_email(&req.email));

        let user = User {
            id: None,
            name: req.name.trim().to_string(),
            email: req.email.to_lowercase(),
            role: req.role.unwrap_or_default(),
            password: hash_password(&req.password)?,
            created_at: DateTime::now(),
        };

        let id = self.repository.insert(&user).await?;
        generate_token(&User {
            id: Some(id),
            ..user
        })
    }

    /// Authenticate a user and return a JWT token.
    pub async fn login(&self, req: LoginRequest) -> Result<String, ApiError> {
        let invalid = || ApiError::unauthorized(CODE_INVALID_CREDENTIALS, ERR_INVALID_CREDENTIALS);

        let user = self
            .repository
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: no user {}", mask_email(&req.email));
                invalid()
            })?;

        if !verify_password(&req.password, &user.password)? {
            warn!("Login failed: wrong password for {}", mask_email(&req.email));
            return Err(invalid());
        }

        generate_token(&user)
    }

    /// The account behind `claims`.
    pub async fn me(&self, claims: &Claims) -> Result<User, ApiError> {
        let id = claims.user_id()?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(&id))
    }

    /// Change the caller's name and/or email.
    pub async fn update_details(
        &self,
        claims: &Claims,
        req: UpdateDetailsRequest,
    ) -> Result<User, ApiError> {
        let id = claims.user_id()?;

        let mut update = bson::Document::new();
        if let Some(name) = req.name {
            update.insert("name", name.trim());
        }
        if let Some(email) = req.email {
            update.insert("email", email.to_lowercase());
        }

        if update.is_empty() {
            debug!("No details to update for user {}", id);
            return self.me(claims).await;
        }

        self.repository
            .update(id, update)
            .await?
            .ok_or_else(|| user_not_found(&id))
    }

    /// Change the caller's password and return a fresh token.
    pub async fn update_password(
        &self,
        claims: &Claims,
        req: UpdatePasswordRequest,
    ) -> Result<String, ApiError> {
        let user = self.me(claims).await?;
        let id = user
            .id
            .ok_or_else(|| ApiError::internal(ERR_MISSING_INSERTED_ID))?;

        if !verify_password(&req.current_password, &user.password)? {
            warn!("Password change failed: wrong current password for {}", id);
            return Err(ApiError::unauthorized(CODE_WRONG_PASSWORD, ERR_WRONG_PASSWORD));
        }

        self.repository
            .update_password(id, &hash_password(&req.new_password)?)
            .await?;

        info!("Password changed for user {}", id);
        generate_token(&user)
    }
}

fn user_not_found(id: &ObjectId) -> ApiError {
    ApiError::not_found(CODE_USER_NOT_FOUND, format!("No user with the id of {}", id))
}

/// Hash a password using bcrypt.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    Ok(verify(password, hash)?)
}

/// Generate a JWT token for a stored user.
pub fn generate_token(user: &User) -> Result<String, ApiError> {
    let id = user
        .id
        .ok_or_else(|| ApiError::internal(ERR_MISSING_INSERTED_ID))?;

    let now = Utc::now().timestamp() as usize;
    let exp = now + (CONFIG.jwt_expiration_hours as usize * 3600);

    let claims = Claims {
        sub: id.to_hex(),
        email: user.email.clone(),
        role: user.role.to_string(),
        exp,
        iat: now,
    };

    debug!(
        "Generated token for user {} with role {}",
        mask_email(&user.email),
        user.role
    );

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(CONFIG.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}
