//! services/api/src/web/state.rs
//!
//! Defines the application state shared by all handlers.

use copy_generator_core::{
    ports::{ClipboardService, CopyGenerationService, KeyValueStore},
    AppController, GenerationClient,
};
use std::sync::Arc;
use tokio::sync::Mutex;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// Locks are only held for the synchronous parts of an action. Service calls run
/// in spawned tasks that take the lock again only to settle.
pub struct AppState {
    pub controller: Mutex<AppController>,
    /// Separate client for free-form prompts, so its loading state never
    /// blocks copy generation.
    pub prompt_client: Mutex<GenerationClient>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn CopyGenerationService>,
        store: Arc<dyn KeyValueStore>,
        clipboard: Arc<dyn ClipboardService>,
    ) -> Self {
        let controller = AppController::new(Arc::clone(&generator), store, clipboard);
        Self {
            controller: Mutex::new(controller),
            prompt_client: Mutex::new(GenerationClient::new(generator)),
        }
    }
}
