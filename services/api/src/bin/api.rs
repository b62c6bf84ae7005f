//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{FileKeyValueStore, HttpGenerationAdapter},
    config::Config,
    error::ApiError,
    web::{api_router, ApiDoc, AppState},
};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use copy_generator_core::ports::ClipboardService;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(feature = "clipboard")]
fn clipboard_adapter() -> Arc<dyn ClipboardService> {
    Arc::new(api_lib::adapters::SystemClipboardAdapter)
}

#[cfg(not(feature = "clipboard"))]
fn clipboard_adapter() -> Arc<dyn ClipboardService> {
    Arc::new(api_lib::adapters::NoopClipboardAdapter)
}

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Adapters ---
    let generator = Arc::new(HttpGenerationAdapter::new(
        &config.generation_base_url,
        config.connect_timeout,
    )?);
    info!("Generation service at {}", config.generation_base_url);

    let store = Arc::new(FileKeyValueStore::new(config.storage_path.clone()));
    info!("History stored in {}", store.path().display());

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(generator, store, clipboard_adapter()));

    // --- 4. Create the Web Router ---
    let origin = config.frontend_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid FRONTEND_ORIGIN '{}': {}",
            config.frontend_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let app = Router::new()
        .merge(api_router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
