//! Review handlers. Only users and admins write reviews.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::{Authorized, Reviewers};
use crate::models::{ApiResponse, CreateReviewRequest, Review, UpdateReviewRequest};
use crate::query::AdvancedResults;
use crate::services::ReviewService;
use crate::utils::model_to_json;

/// List reviews with their bootcamp's name and description
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    tag = "Reviews",
    params(
        ("select" = Option<String>, Query, description = "Comma separated fields to return"),
        ("sort" = Option<String>, Query, description = "Comma separated sort fields, '-' for descending"),
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Results per page (default: 1)")
    ),
    responses(
        (status = 200, description = "Page of reviews", body = AdvancedResults)
    )
)]
pub async fn get_reviews(
    review_service: web::Data<ReviewService>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let results = review_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(results))
}

/// List every review of a bootcamp
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps/{bootcamp_id}/reviews",
    tag = "Reviews",
    params(
        ("bootcamp_id" = String, Path, description = "Bootcamp ID")
    ),
    responses(
        (status = 200, description = "Reviews of the bootcamp", body = [Review])
    )
)]
pub async fn get_bootcamp_reviews(
    review_service: web::Data<ReviewService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let reviews = review_service
        .list_for_bootcamp(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(reviews)))
}

/// Get a review by ID
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(
        ("id" = String, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review found", body = Review),
        (status = 404, description = "Review not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_review(
    review_service: web::Data<ReviewService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let review = review_service.get_review(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(review)))
}

/// Review a bootcamp
///
/// Each user may review a bootcamp once.
#[utoipa::path(
    post,
    path = "/api/v1/bootcamps/{bootcamp_id}/reviews",
    tag = "Reviews",
    params(
        ("bootcamp_id" = String, Path, description = "Bootcamp ID")
    ),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Validation error or bootcamp already reviewed", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role may not review", body = crate::errors::ErrorResponse),
        (status = 404, description = "Bootcamp not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_review(
    claims: Authorized<Reviewers>,
    review_service: web::Data<ReviewService>,
    path: web::Path<String>,
    body: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let review = review_service
        .create_review(&claims, &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(model_to_json(&review)?)))
}

/// Update a review the caller wrote
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(
        ("id" = String, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized or not the author", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role may not review", body = crate::errors::ErrorResponse),
        (status = 404, description = "Review not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_review(
    claims: Authorized<Reviewers>,
    review_service: web::Data<ReviewService>,
    path: web::Path<String>,
    body: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let review = review_service
        .update_review(&claims, &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(model_to_json(&review)?)))
}

/// Delete a review the caller wrote
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(
        ("id" = String, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 401, description = "Unauthorized or not the author", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role may not review", body = crate::errors::ErrorResponse),
        (status = 404, description = "Review not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_review(
    claims: Authorized<Reviewers>,
    review_service: web::Data<ReviewService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    review_service
        .delete_review(&claims, &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::empty()))
}
