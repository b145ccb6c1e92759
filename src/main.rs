mod config;
mod constants;
mod errors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod query;
mod repositories;
mod routes;
mod services;
mod utils;
mod validators;

use std::sync::Arc;

use actix_governor::Governor;
use actix_web::middleware::{Condition, Logger};
use actix_web::{web, App, HttpServer};
use log::info;
use mongodb::bson::doc;
use mongodb::Client;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CONFIG;
use crate::constants::MSG_SERVER_RUNNING;
use crate::middleware::{cors, create_rate_limiter_config, security_headers};
use crate::openapi::ApiDoc;
use crate::repositories::{AccountLookup, BootcampRepository, ReviewRepository, UserRepository};
use crate::services::{AuthService, BootcampService, CourseService, ReviewService, UserService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&CONFIG.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");

    let db = client.database(&CONFIG.database_name);

    db.run_command(doc! { "ping": 1 })
        .await
        .expect("Failed to ping MongoDB");
    info!("Connected to MongoDB database {}", CONFIG.database_name);

    // Unique constraints back the duplicate checks
    UserRepository::new(&db)
        .create_indexes()
        .await
        .expect("Failed to create user indexes");
    BootcampRepository::new(&db)
        .create_indexes()
        .await
        .expect("Failed to create bootcamp indexes");
    ReviewRepository::new(&db)
        .create_indexes()
        .await
        .expect("Failed to create review indexes");

    // Tokens are checked against the stored account on every request
    let accounts: web::Data<dyn AccountLookup> =
        web::Data::from(Arc::new(UserRepository::new(&db)) as Arc<dyn AccountLookup>);

    // Initialize services
    let auth_service = web::Data::new(AuthService::new(&db));
    let bootcamp_service = web::Data::new(BootcampService::new(&db));
    let course_service = web::Data::new(CourseService::new(&db));
    let review_service = web::Data::new(ReviewService::new(&db));
    let user_service = web::Data::new(UserService::new(&db));

    let rate_limiter = create_rate_limiter_config();
    let openapi = ApiDoc::openapi();

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("{} at http://{}", MSG_SERVER_RUNNING, server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&rate_limiter))
            .wrap(Condition::new(CONFIG.cors_enabled, cors()))
            .wrap(security_headers())
            .wrap(Logger::default())
            .app_data(accounts.clone())
            .app_data(auth_service.clone())
            .app_data(bootcamp_service.clone())
            .app_data(course_service.clone())
            .app_data(review_service.clone())
            .app_data(user_service.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
