//! crates/copy_generator_core/src/ports.rs
//!
//! Defines the capability contracts (traits) the core consumes.
//! These traits form the boundary of the hexagonal architecture, keeping the core
//! independent of the HTTP client, the storage backend and the system clipboard.

use async_trait::async_trait;

use crate::domain::GenerationRequest;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// Fallback message when the service rejects a request without explaining why.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Fallback message when a failure carries no usable text at all.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (network, storage).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The service answered with a non-success status.
    #[error("Service rejected the request: {0}")]
    Rejected(String),
    #[error("Transport failure: {0}")]
    Transport(String),
    /// The service answered, but not with the expected body.
    #[error("Malformed service response: {0}")]
    Protocol(String),
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The human-readable text shown in the error region.
    pub fn user_message(&self) -> String {
        let message = match self {
            PortError::Rejected(m)
            | PortError::Transport(m)
            | PortError::Protocol(m)
            | PortError::NotFound(m)
            | PortError::Storage(m)
            | PortError::Unexpected(m) => m.trim(),
        };
        if message.is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message.to_string()
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CopyGenerationService: Send + Sync {
    /// Sends a structured product request and returns the generated description.
    async fn generate_copy(&self, request: &GenerationRequest) -> PortResult<String>;

    /// Sends a free-form prompt and returns the generated text.
    async fn generate_text(&self, prompt: &str) -> PortResult<String>;
}

/// String key/value storage, read and written synchronously.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PortResult<()>;
}

pub trait ClipboardService: Send + Sync {
    /// Places `text` on the clipboard.
    fn write_text(&self, text: &str) -> PortResult<()>;
}
