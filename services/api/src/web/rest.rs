//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers that expose the application controller, and the
//! master definition for the OpenAPI specification.

use crate::web::{
    protocol::{
        history_items, FormView, HistoryItemView, PromptRequest, PromptResponse, StateView,
    },
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use copy_generator_core::{ports::REQUEST_FAILED_MESSAGE, FormState, GenerationStatus, PortError};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_state_handler,
        update_form_handler,
        generate_handler,
        clear_handler,
        copy_handler,
        list_history_handler,
        restore_handler,
        prompt_handler,
    ),
    components(
        schemas(FormView, StateView, HistoryItemView, PromptRequest, PromptResponse)
    ),
    tags(
        (name = "Copy Generator API", description = "Local API behind the product copy generator UI.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// State and Form
//=========================================================================================

/// Current form, result, status and history.
#[utoipa::path(
    get,
    path = "/state",
    responses((status = 200, description = "Current application state", body = StateView))
)]
pub async fn get_state_handler(State(app_state): State<Arc<AppState>>) -> Json<StateView> {
    let controller = app_state.controller.lock().await;
    Json(StateView::from(&*controller))
}

/// Replace every form field.
#[utoipa::path(
    put,
    path = "/form",
    request_body = FormView,
    responses((status = 200, description = "Form updated", body = StateView))
)]
pub async fn update_form_handler(
    State(app_state): State<Arc<AppState>>,
    Json(form): Json<FormView>,
) -> Json<StateView> {
    let mut controller = app_state.controller.lock().await;
    controller.set_form(FormState::from(form));
    Json(StateView::from(&*controller))
}

//=========================================================================================
// Generation
//=========================================================================================

/// Generate copy for the current form.
///
/// Failures of the generation service are reported in the `error` field of the
/// returned state, not as an HTTP error.
#[utoipa::path(
    post,
    path = "/generate",
    responses(
        (status = 200, description = "Generation settled", body = StateView),
        (status = 409, description = "Generation not allowed (blank name or a call in flight)", body = StateView)
    )
)]
pub async fn generate_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let pending = app_state.controller.lock().await.begin_submit();

    let Some(pending) = pending else {
        let controller = app_state.controller.lock().await;
        return (StatusCode::CONFLICT, Json(StateView::from(&*controller)));
    };

    // The call and the settle run in their own task: a client that disconnects
    // drops this handler, but the submission still settles.
    let task_state = Arc::clone(&app_state);
    let settled = tokio::spawn(async move {
        let outcome = pending.call().await;
        let mut controller = task_state.controller.lock().await;
        controller.finish_submit(pending, outcome);
        StateView::from(&*controller)
    })
    .await;

    match settled {
        Ok(view) => (StatusCode::OK, Json(view)),
        Err(e) => {
            error!("Generation task failed: {}", e);
            let controller = app_state.controller.lock().await;
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StateView::from(&*controller)),
            )
        }
    }
}

/// Clear the displayed result. Form and history are untouched.
#[utoipa::path(
    post,
    path = "/clear",
    responses((status = 200, description = "Result cleared", body = StateView))
)]
pub async fn clear_handler(State(app_state): State<Arc<AppState>>) -> Json<StateView> {
    let mut controller = app_state.controller.lock().await;
    controller.clear_result();
    Json(StateView::from(&*controller))
}

/// Copy the displayed result to the clipboard, if there is one.
#[utoipa::path(
    post,
    path = "/copy",
    responses((status = 204, description = "Copied, or nothing to copy"))
)]
pub async fn copy_handler(State(app_state): State<Arc<AppState>>) -> StatusCode {
    let copy = app_state.controller.lock().await.begin_copy();
    let Some(copy) = copy else {
        info!("Copy requested with no result to copy.");
        return StatusCode::NO_CONTENT;
    };

    // System clipboard access blocks, so it runs off the async workers.
    if let Err(e) = tokio::task::spawn_blocking(move || copy.write()).await {
        error!("Clipboard task failed: {}", e);
    }
    StatusCode::NO_CONTENT
}

//=========================================================================================
// History
//=========================================================================================

/// Past generations, newest first.
#[utoipa::path(
    get,
    path = "/history",
    responses((status = 200, description = "History entries", body = [HistoryItemView]))
)]
pub async fn list_history_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<HistoryItemView>> {
    let controller = app_state.controller.lock().await;
    Json(history_items(&controller))
}

/// Load a history entry back into the form and result.
#[utoipa::path(
    post,
    path = "/history/{id}/restore",
    params(("id" = i64, Path, description = "History entry id")),
    responses(
        (status = 200, description = "Entry restored", body = StateView),
        (status = 404, description = "No entry with that id")
    )
)]
pub async fn restore_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<StateView>, (StatusCode, String)> {
    let mut controller = app_state.controller.lock().await;
    let restored = controller.restore(id).map(|_| ());
    match restored {
        Ok(_) => Ok(Json(StateView::from(&*controller))),
        Err(PortError::NotFound(message)) => Err((StatusCode::NOT_FOUND, message)),
        Err(e) => {
            error!("Failed to restore history entry {}: {:?}", id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to restore history entry".to_string(),
            ))
        }
    }
}

//=========================================================================================
// Free-form Prompt
//=========================================================================================

/// Generate text for a free-form prompt. Not recorded in history.
#[utoipa::path(
    post,
    path = "/prompt",
    request_body = PromptRequest,
    responses(
        (status = 200, description = "Generated text", body = PromptResponse),
        (status = 400, description = "Blank prompt"),
        (status = 502, description = "The generation service failed")
    )
)]
pub async fn prompt_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<PromptRequest>,
) -> Result<Json<PromptResponse>, (StatusCode, String)> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "prompt is required".to_string()));
    }

    let service = {
        let mut client = app_state.prompt_client.lock().await;
        client.begin();
        client.service()
    };

    let prompt = prompt.to_string();
    let task_state = Arc::clone(&app_state);
    let settled = tokio::spawn(async move {
        let outcome = service.generate_text(&prompt).await;
        let mut client = task_state.prompt_client.lock().await;
        match client.settle(outcome) {
            Some(text) => Ok(text),
            None => Err(match client.status() {
                GenerationStatus::Failed { message } => message.clone(),
                _ => REQUEST_FAILED_MESSAGE.to_string(),
            }),
        }
    })
    .await;

    match settled {
        Ok(Ok(text)) => Ok(Json(PromptResponse { text })),
        Ok(Err(message)) => {
            warn!("Prompt generation failed: {}", message);
            Err((StatusCode::BAD_GATEWAY, message))
        }
        Err(e) => {
            error!("Prompt task failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Prompt generation was interrupted".to_string(),
            ))
        }
    }
}
