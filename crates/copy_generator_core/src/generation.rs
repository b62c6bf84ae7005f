//! crates/copy_generator_core/src/generation.rs
//!
//! The generation client: one request lifecycle around the external
//! text-generation service, reported as an explicit status.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::GenerationRequest;
use crate::ports::{CopyGenerationService, PortResult};

/// Lifecycle of the most recent call.
///
/// `Succeeded` and `Failed` are settled states; the client is ready for the
/// next call in either of them, just as in `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed { message: String },
}

/// Wraps a [`CopyGenerationService`] and tracks `loading`/`error` for the caller.
///
/// A call never raises: failures are recorded in the status and the call
/// returns `None`. Overlapping calls are not de-duplicated; the caller keeps at
/// most one in flight.
pub struct GenerationClient {
    service: Arc<dyn CopyGenerationService>,
    status: GenerationStatus,
    last_text: Option<String>,
}

impl GenerationClient {
    pub fn new(service: Arc<dyn CopyGenerationService>) -> Self {
        Self {
            service,
            status: GenerationStatus::Idle,
            last_text: None,
        }
    }

    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    pub fn loading(&self) -> bool {
        matches!(self.status, GenerationStatus::Pending)
    }

    /// The message of the last failed call, until the next call starts.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            GenerationStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Text returned by the last successful call.
    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    /// A handle to the underlying service, for callers that await the call
    /// themselves between [`begin`](Self::begin) and [`settle`](Self::settle).
    pub fn service(&self) -> Arc<dyn CopyGenerationService> {
        Arc::clone(&self.service)
    }

    /// Marks a call as started. Clears any previous error.
    pub fn begin(&mut self) {
        debug!("Generation call started.");
        self.status = GenerationStatus::Pending;
    }

    /// Records the outcome of a call started with [`begin`](Self::begin).
    pub fn settle(&mut self, outcome: PortResult<String>) -> Option<String> {
        match outcome {
            Ok(text) => {
                debug!("Generation call succeeded ({} chars).", text.len());
                self.status = GenerationStatus::Succeeded;
                self.last_text = Some(text.clone());
                Some(text)
            }
            Err(e) => {
                warn!("Generation call failed: {}", e);
                self.status = GenerationStatus::Failed {
                    message: e.user_message(),
                };
                None
            }
        }
    }

    /// Generates marketing copy for a structured request.
    pub async fn generate_copy(&mut self, request: &GenerationRequest) -> Option<String> {
        self.begin();
        let outcome = self.service.generate_copy(request).await;
        self.settle(outcome)
    }

    /// Generates text for a free-form prompt.
    pub async fn generate_text(&mut self, prompt: &str) -> Option<String> {
        self.begin();
        let outcome = self.service.generate_text(prompt).await;
        self.settle(outcome)
    }
}
