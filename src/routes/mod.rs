use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::constants::{CODE_BAD_REQUEST, MSG_SERVER_RUNNING};
use crate::errors::ApiError;
use crate::handlers;
use crate::middleware::AuthMiddleware;
use crate::models::HealthResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(
            web::scope("/api/v1")
                // Claims are attached when a token is sent; handler extractors decide who may pass
                .wrap(AuthMiddleware)
                .route("/health", web::get().to(health_check))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(handlers::register))
                        .route("/login", web::post().to(handlers::login))
                        .route("/me", web::get().to(handlers::get_me))
                        .route("/updatedetails", web::put().to(handlers::update_details))
                        .route("/updatepassword", web::put().to(handlers::update_password)),
                )
                .service(
                    web::scope("/bootcamps")
                        .route("", web::get().to(handlers::get_bootcamps))
                        .route("", web::post().to(handlers::create_bootcamp))
                        // Nested resources
                        .route(
                            "/{bootcamp_id}/courses",
                            web::get().to(handlers::get_bootcamp_courses),
                        )
                        .route(
                            "/{bootcamp_id}/courses",
                            web::post().to(handlers::create_course),
                        )
                        .route(
                            "/{bootcamp_id}/reviews",
                            web::get().to(handlers::get_bootcamp_reviews),
                        )
                        .route(
                            "/{bootcamp_id}/reviews",
                            web::post().to(handlers::create_review),
                        )
                        .route("/{id}", web::get().to(handlers::get_bootcamp))
                        .route("/{id}", web::put().to(handlers::update_bootcamp))
                        .route("/{id}", web::delete().to(handlers::delete_bootcamp)),
                )
                .service(
                    web::scope("/courses")
                        .route("", web::get().to(handlers::get_courses))
                        .route("/{id}", web::get().to(handlers::get_course))
                        .route("/{id}", web::put().to(handlers::update_course))
                        .route("/{id}", web::delete().to(handlers::delete_course)),
                )
                .service(
                    web::scope("/reviews")
                        .route("", web::get().to(handlers::get_reviews))
                        .route("/{id}", web::get().to(handlers::get_review))
                        .route("/{id}", web::put().to(handlers::update_review))
                        .route("/{id}", web::delete().to(handlers::delete_review)),
                )
                // Admin only
                .service(
                    web::scope("/users")
                        .route("", web::get().to(handlers::get_users))
                        .route("", web::post().to(handlers::create_user))
                        .route("/{id}", web::get().to(handlers::get_user))
                        .route("/{id}", web::put().to(handlers::update_user))
                        .route("/{id}", web::delete().to(handlers::delete_user)),
                ),
        );
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(CODE_BAD_REQUEST, err.to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request(CODE_BAD_REQUEST, err.to_string()).into()
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: MSG_SERVER_RUNNING.to_string(),
    })
}
