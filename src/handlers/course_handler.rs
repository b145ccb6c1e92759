//! Course handlers, including the courses nested under a bootcamp.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::{Authorized, Publishers};
use crate::models::{ApiResponse, Course, CreateCourseRequest, UpdateCourseRequest};
use crate::query::AdvancedResults;
use crate::services::CourseService;
use crate::utils::model_to_json;

/// List courses with their bootcamp's name and description
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    tag = "Courses",
    params(
        ("select" = Option<String>, Query, description = "Comma separated fields to return"),
        ("sort" = Option<String>, Query, description = "Comma separated sort fields, '-' for descending"),
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Results per page (default: 1)")
    ),
    responses(
        (status = 200, description = "Page of courses", body = AdvancedResults)
    )
)]
pub async fn get_courses(
    course_service: web::Data<CourseService>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let results = course_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(results))
}

/// List every course of a bootcamp
#[utoipa::path(
    get,
    path = "/api/v1/bootcamps/{bootcamp_id}/courses",
    tag = "Courses",
    params(
        ("bootcamp_id" = String, Path, description = "Bootcamp ID")
    ),
    responses(
        (status = 200, description = "Courses of the bootcamp", body = [Course])
    )
)]
pub async fn get_bootcamp_courses(
    course_service: web::Data<CourseService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let courses = course_service
        .list_for_bootcamp(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(courses)))
}

/// Get a course by ID
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    tag = "Courses",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 404, description = "Course not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_course(
    course_service: web::Data<CourseService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let course = course_service.get_course(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(course)))
}

/// Add a course to a bootcamp the caller owns
#[utoipa::path(
    post,
    path = "/api/v1/bootcamps/{bootcamp_id}/courses",
    tag = "Courses",
    params(
        ("bootcamp_id" = String, Path, description = "Bootcamp ID")
    ),
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized or not the bootcamp owner", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role may not publish", body = crate::errors::ErrorResponse),
        (status = 404, description = "Bootcamp not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_course(
    claims: Authorized<Publishers>,
    course_service: web::Data<CourseService>,
    path: web::Path<String>,
    body: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let course = course_service
        .create_course(&claims, &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(model_to_json(&course)?)))
}

/// Update a course the caller owns
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    tag = "Courses",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Validation error", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized or not the owner", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role may not publish", body = crate::errors::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_course(
    claims: Authorized<Publishers>,
    course_service: web::Data<CourseService>,
    path: web::Path<String>,
    body: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let course = course_service
        .update_course(&claims, &path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(model_to_json(&course)?)))
}

/// Delete a course the caller owns
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    tag = "Courses",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 401, description = "Unauthorized or not the owner", body = crate::errors::ErrorResponse),
        (status = 403, description = "Role may not publish", body = crate::errors::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::errors::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_course(
    claims: Authorized<Publishers>,
    course_service: web::Data<CourseService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    course_service
        .delete_course(&claims, &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::empty()))
}
