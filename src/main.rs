use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use std::net::TcpListener;
use std::sync::Arc;

mod clients;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;

use crate::clients::openai_client::OpenAiClient;
use crate::config::AppSettings;
use crate::routes::configure_routes;
use crate::services::ContentService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load application settings
    let app_settings = match AppSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load application settings: {}", e);
            log::error!("Cannot start server without valid settings");
            std::process::exit(1);
        }
    };

    let host = &app_settings.server.host;
    let port = app_settings.server.port;

    log::info!("Starting server at http://{}:{}", host, port);

    let server_addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(server_addr)?;

    HttpServer::new(move || {
        let app_settings = app_settings.clone();

        // Initialize services. The provider client carries no credential;
        // callers pass theirs with each request.
        let provider = Arc::new(OpenAiClient::new(&app_settings));
        let content_service = web::Data::new(ContentService::new(provider));

        // Configure CORS using actix-cors
        let mut cors = Cors::default();
        if app_settings.server.cors_origins.contains(&"*".to_string()) {
            cors = cors.allow_any_origin();
        } else {
            for origin in &app_settings.server.cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(app_settings.clone()))
            .app_data(content_service)
            // Health check endpoint
            .service(web::resource("/health").route(web::get().to(handlers::health::health_check)))
            // API routes
            .service(web::scope("/api").configure(configure_routes))
            // Single-page UI
            .service(Files::new("/", "./static").index_file("index.html"))
    })
    .listen(listener)?
    .run()
    .await
}
