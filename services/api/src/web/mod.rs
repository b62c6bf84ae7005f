pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub use rest::{
    clear_handler, copy_handler, generate_handler, get_state_handler, list_history_handler,
    prompt_handler, restore_handler, update_form_handler, ApiDoc,
};
pub use state::AppState;

/// Builds the API routes over the shared state. Layers (CORS, docs) are added
/// by the binary.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(get_state_handler))
        .route("/form", put(update_form_handler))
        .route("/generate", post(generate_handler))
        .route("/clear", post(clear_handler))
        .route("/copy", post(copy_handler))
        .route("/history", get(list_history_handler))
        .route("/history/{id}/restore", post(restore_handler))
        .route("/prompt", post(prompt_handler))
        .with_state(app_state)
}
