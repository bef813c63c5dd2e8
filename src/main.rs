use actix_web::{web, App, HttpServer, middleware};
use anyhow::Result;
use report_studio::api::middleware::compression::create_compression_middleware;
use report_studio::api::{configure_routes, ApiState};
use report_studio::common::AppConfig;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    tracing::info!("Starting Report Studio API");

    // Initialize Prometheus metrics
    prometheus::default_registry()
        .register(Box::new(prometheus::process_collector::ProcessCollector::for_self()))?;

    // Load configuration
    let config = AppConfig::from_env()?;
    let host = config.server.host.clone();
    let port = config.server.port;
    let compression = config.server.enable_compression;

    tracing::info!(
        models = ?config.generator.models,
        enhancer_model = %config.enhancer.model,
        base_url = %config.llm.base_url,
        "Configuration loaded"
    );

    // Initialize application state
    let state = web::Data::new(ApiState::new(config));

    tracing::info!("Starting server on {}:{}", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(create_compression_middleware(compression))
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
