use actix_cors::Cors;
use actix_web::{web, HttpRequest};

use super::error::ApiError;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))

        // Health checks
        .route("/health", web::get().to(handlers::health_check))
        .route("/metrics", web::get().to(handlers::metrics_endpoint))

        .service(
            web::scope("/api")
                .wrap(
                    Cors::default()
                        .allowed_origin_fn(|origin, _req_head| {
                            origin.as_bytes().starts_with(b"http://localhost") ||
                            origin.as_bytes().starts_with(b"https://")
                        })
                        .allowed_methods(vec!["GET", "POST"])
                        .allowed_headers(vec!["Content-Type"])
                        .expose_headers(vec!["Content-Disposition"])
                        .max_age(3600)
                )
                .service(
                    web::resource("/docx")
                        .app_data(web::JsonConfig::default().error_handler(export_error_handler))
                        .route(web::post().to(handlers::export_docx))
                )
                .route("/enhance", web::post().to(handlers::enhance_prompt))
                .route("/generate", web::post().to(handlers::generate_report))
        );
}

fn json_error_handler(err: actix_web::error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(path = %req.path(), error = %err, "Rejected request body");
    ApiError::from(err).into()
}

/// Export has no validation step, so an unreadable body is reported as a
/// failed document build.
fn export_error_handler(err: actix_web::error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::error!(path = %req.path(), error = %err, "Failed to read export body");
    ApiError::internal_server_error(format!("Failed to generate document: {}", err)).into()
}
