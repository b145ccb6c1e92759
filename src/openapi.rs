use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::errors::ErrorResponse;
use crate::models::{
    Bootcamp, Career, Course, CreateBootcampRequest, CreateCourseRequest, CreateReviewRequest,
    CreateUserRequest, HealthResponse, LoginRequest, MinimumSkill, RegisterRequest, Review, Role,
    TokenResponse, UpdateBootcampRequest, UpdateCourseRequest, UpdateDetailsRequest,
    UpdatePasswordRequest, UpdateReviewRequest, UpdateUserRequest, UserResponse,
};
use crate::query::{AdvancedResults, PageLink, Pagination};

/// OpenAPI documentation for the DevCamper API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevCamper API",
        version = "1.0.0",
        description = "Bootcamp directory API: bootcamps, their courses and reviews, with filtering, sorting and pagination on every list endpoint.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Authentication", description = "Registration, login and the caller's own account"),
        (name = "Bootcamps", description = "Bootcamp directory"),
        (name = "Courses", description = "Courses offered by bootcamps"),
        (name = "Reviews", description = "Bootcamp reviews and ratings"),
        (name = "Users", description = "User administration (admin only)")
    ),
    paths(
        crate::routes::health_check,
        crate::handlers::register,
        crate::handlers::login,
        crate::handlers::get_me,
        crate::handlers::update_details,
        crate::handlers::update_password,
        crate::handlers::get_bootcamps,
        crate::handlers::get_bootcamp,
        crate::handlers::create_bootcamp,
        crate::handlers::update_bootcamp,
        crate::handlers::delete_bootcamp,
        crate::handlers::get_courses,
        crate::handlers::get_bootcamp_courses,
        crate::handlers::get_course,
        crate::handlers::create_course,
        crate::handlers::update_course,
        crate::handlers::delete_course,
        crate::handlers::get_reviews,
        crate::handlers::get_bootcamp_reviews,
        crate::handlers::get_review,
        crate::handlers::create_review,
        crate::handlers::update_review,
        crate::handlers::delete_review,
        crate::handlers::get_users,
        crate::handlers::get_user,
        crate::handlers::create_user,
        crate::handlers::update_user,
        crate::handlers::delete_user
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            UpdateDetailsRequest,
            UpdatePasswordRequest,
            CreateUserRequest,
            UpdateUserRequest,
            CreateBootcampRequest,
            UpdateBootcampRequest,
            CreateCourseRequest,
            UpdateCourseRequest,
            CreateReviewRequest,
            UpdateReviewRequest,
            Role,
            Career,
            MinimumSkill,
            Bootcamp,
            Course,
            Review,
            UserResponse,
            TokenResponse,
            AdvancedResults,
            Pagination,
            PageLink,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security configuration for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "JWT token obtained from the /api/v1/auth/login endpoint",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_nested_routes() {
        let spec = ApiDoc::openapi();
        assert!(spec
            .paths
            .paths
            .contains_key("/api/v1/bootcamps/{bootcamp_id}/courses"));
        assert!(spec.paths.paths.contains_key("/api/v1/reviews/{id}"));
    }
}
