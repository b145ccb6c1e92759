//! Bootcamp handlers. Reads are public; writes need a publisher or admin.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::{Authorized, Publishers};
use crate::models::{ApiResponse, Bootcamp, CreateBootcampRequest, UpdateBootcampRequest};
use crate::query::AdvancedResults;
use crate::services::BootcampService;
use crate::utils::model_to_json;

/// List bootcamps
///
/// Any other query parameter filters on the field of the same name; append
/// `[gt]`, `[gte]`, `[lt]`, `[lte]` or `[in]` to compare instead of matching,
/// e.g. `averageCost[lte]=10000` or `careers[in]=Business`.
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps",
    tag = "Bootcamps",
    params(
        ("select" = Option<String>, Query, description = "Comma separated fields to return"),
        ("sort" = Option<String>, Query, description = "Comma separated sort fields, '-' for descending (default: -createdAt)"),
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Results per page (default: 1)")
    ),
    responses(
        (status = 200, description = "Page of bootcamps with their courses", body = AdvancedResults)
    )
)]
pub async fn get_bootcamps(
    bootcamp_service: web::Data<BootcampService>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let results = bootcamp_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(results))
}

/// Get a bootcamp by ID
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps/{id}",
    tag = "Bootcamps",
    params(
        ("id" = String, Path, description = "Bootcamp ID")
    ),
    responses(
        (status = 200, description = "Bootcamp found", body = Bootcamp),
        (status = 404, description = "Bootcamp not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_bootcamp(
    bootcamp_service: web::Data<BootcampService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let bootcamp = bootcamp_service.get_bootcamp(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(model_to_json(&bootcamp)?)))
}

/// Publish a new bootcamp
///
/// Publishers may own one bootcamp; admins may create any number.
#[utoipa::path(
    post,
    path = "/api/v1/bootcamps",
    tag = "Bootcamps",
    request_body = CreateBootcampRequest,
    responses(
        (status = 201, description = "Bootcamp created", body = Bootcamp),
        (status = 400, description = "Validation error, duplicate name or bootcamp already published", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role may not publish", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_bootcamp(
    claims: Authorized<Publishers>,
    bootcamp_service: web::Data<BootcampService>,
    body: web::Json<CreateBootcampRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let bootcamp = bootcamp_service
        .create_bootcamp(&claims, body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(model_to_json(&bootcamp)?)))
}

/// Update a bootcamp the caller owns
#[utoipa::path(
    put,
    path = "/api/v1/bootcamps/{id}",
    tag = "Bootcamps",
    params(
        ("id" = String, Path, description = "Bootcamp ID")
    ),
    request_body = UpdateBootcampRequest,
    responses(
        (status = 200, description = "Bootcamp updated", body = Bootcamp),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized or not the owner", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role may not publish", body = crate::errors::ErrorResponse),
        (status = 404, description = "Bootcamp not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_bootcamp(
    claims: Authorized<Publishers>,
    bootcamp_service: web::Data<BootcampService>,
    path: web::Path<String>,
    body: web::Json<UpdateBootcampRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let bootcamp = bootcamp_service
        .update_bootcamp(&claims, &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(model_to_json(&bootcamp)?)))
}

/// Delete a bootcamp with its courses and reviews
#[utoipa::path(
    delete,
    path = "/api/v1/bootcamps/{id}",
    tag = "Bootcamps",
    params(
        ("id" = String, Path, description = "Bootcamp ID")
    ),
    responses(
        (status = 200, description = "Bootcamp deleted"),
        (status = 401, description = "Unauthorized or not the owner", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role may not publish", body = crate::errors::ErrorResponse),
        (status = 404, description = "Bootcamp not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_bootcamp(
    claims: Authorized<Publishers>,
    bootcamp_service: web::Data<BootcampService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    bootcamp_service
        .delete_bootcamp(&claims, &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::empty()))
}
