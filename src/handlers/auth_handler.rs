//! Authentication handlers: registration, login and the caller's own account.

use actix_web::{web, HttpResponse};
use log::info;
use validator::Validate;

use crate::errors::ApiError;
use crate::models::{
    ApiResponse, Claims, LoginRequest, RegisterRequest, TokenResponse, UpdateDetailsRequest,
    UpdatePasswordRequest, UserResponse,
};
use crate::services::AuthService;

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered, token issued", body = TokenResponse),
        (status = 400, description = "Validation error or duplicate email", body = crate::errors::ErrorResponse)
    )
)]
pub async fn register(
    auth_service: web::Data<AuthService>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let token = auth_service.register(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TokenResponse::new(token)))
}

/// Authenticate a user and get a JWT token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::errors::ErrorResponse)
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let token = auth_service.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TokenResponse::new(token)))
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    claims: Claims,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, ApiError> {
    let user = auth_service.me(&claims).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}

/// Update the current user's name and email
#[utoipa::path(
    put,
    path = "/api/v1/auth/updatedetails",
    tag = "Authentication",
    request_body = UpdateDetailsRequest,
    responses(
        (status = 200, description = "Details updated", body = UserResponse),
        (status = 400, description = "Validation error or duplicate email", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_details(
    claims: Claims,
    auth_service: web::Data<AuthService>,
    body: web::Json<UpdateDetailsRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let user = auth_service
        .update_details(&claims, body.into_inner())
        .await?;
    info!("User {} updated their details", claims.sub);
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}

/// Change the current user's password
///
/// A fresh token is issued on success.
#[utoipa::path(
    put,
    path = "/api/v1/auth/updatepassword",
    tag = "Authentication",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = TokenResponse),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized or wrong current password", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_password(
    claims: Claims,
    auth_service: web::Data<AuthService>,
    body: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let token = auth_service
        .update_password(&claims, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(TokenResponse::new(token)))
}
