use crate::handlers;
use actix_web::web;

/// Configures the API routes. Mounted under the "/api" scope in main.rs.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/content")
            .route("/generate", web::post().to(handlers::generate::generate_content)),
    );
}
