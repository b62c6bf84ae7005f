//! crates/copy_generator_core/src/controller.rs
//!
//! The application controller. It owns the form, the displayed result, the
//! generation client and the history, and applies user actions to them.
//!
//! Submitting is split in two halves, [`AppController::begin_submit`] and
//! [`AppController::finish_submit`], so a caller that shares the controller
//! behind a lock can release it while the service call is outstanding.
//! [`AppController::submit`] runs both halves for single-owner callers.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{FormState, GenerationRequest, HistoryEntry, HistoryId};
use crate::generation::{GenerationClient, GenerationStatus};
use crate::history::HistoryCache;
use crate::payload::build_payload;
use crate::ports::{
    ClipboardService, CopyGenerationService, KeyValueStore, PortError, PortResult,
};

/// A submission that has been started but not yet settled.
pub struct PendingSubmission {
    pub request: GenerationRequest,
    form: FormState,
    service: Arc<dyn CopyGenerationService>,
}

impl PendingSubmission {
    /// Performs the service call. Holds no reference to the controller.
    pub async fn call(&self) -> PortResult<String> {
        self.service.generate_copy(&self.request).await
    }
}

/// The displayed result, taken out of the controller for a clipboard write.
pub struct PendingCopy {
    text: String,
    clipboard: Arc<dyn ClipboardService>,
}

impl PendingCopy {
    /// Writes the text to the clipboard. Failures are logged and ignored.
    pub fn write(&self) {
        if let Err(e) = self.clipboard.write_text(&self.text) {
            warn!("Could not copy result to clipboard: {}", e);
        }
    }
}

pub struct AppController {
    form: FormState,
    result: Option<String>,
    client: GenerationClient,
    history: HistoryCache,
    clipboard: Arc<dyn ClipboardService>,
}

impl AppController {
    /// Builds a controller with a default form, loading history from `store`.
    pub fn new(
        service: Arc<dyn CopyGenerationService>,
        store: Arc<dyn KeyValueStore>,
        clipboard: Arc<dyn ClipboardService>,
    ) -> Self {
        Self {
            form: FormState::default(),
            result: None,
            client: GenerationClient::new(service),
            history: HistoryCache::load(store),
            clipboard,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Replaces every form field.
    pub fn set_form(&mut self, form: FormState) {
        self.form = form;
    }

    /// Edits the form in place.
    pub fn edit_form(&mut self, edit: impl FnOnce(&mut FormState)) {
        edit(&mut self.form);
    }

    /// The currently displayed result, if any.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn status(&self) -> &GenerationStatus {
        self.client.status()
    }

    pub fn loading(&self) -> bool {
        self.client.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.client.error()
    }

    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    /// True iff the name is non-blank and no call is pending.
    pub fn can_generate(&self) -> bool {
        self.form.has_name() && !self.client.loading()
    }

    /// First half of a submit: returns `None` (and changes nothing) when
    /// generation is not allowed.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if !self.can_generate() {
            return None;
        }
        let request = build_payload(&self.form);
        self.result = None;
        self.client.begin();
        info!("Submitting copy request for '{}'.", request.name);
        Some(PendingSubmission {
            request,
            form: self.form.clone(),
            service: self.client.service(),
        })
    }

    /// Second half of a submit: settles the client and, on success, shows the
    /// text and records it together with the form that was submitted.
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        outcome: PortResult<String>,
    ) -> Option<&str> {
        let text = self.client.settle(outcome)?;
        let id = self.history.record(pending.form, text.clone());
        info!("Recorded history entry {}.", id);
        self.result = Some(text);
        self.result.as_deref()
    }

    /// Runs a full submit. Returns `false` if generation was not allowed.
    pub async fn submit(&mut self) -> bool {
        let Some(pending) = self.begin_submit() else {
            return false;
        };
        let outcome = pending.call().await;
        self.finish_submit(pending, outcome);
        true
    }

    /// Clears the displayed result only.
    pub fn clear_result(&mut self) {
        self.result = None;
    }

    /// Restores the form and displayed result from a history entry.
    /// Performs no service call.
    pub fn restore(&mut self, id: HistoryId) -> PortResult<&HistoryEntry> {
        let entry = self
            .history
            .restore(id)
            .ok_or_else(|| PortError::NotFound(format!("History entry {} not found", id)))?;
        self.form = entry.form.clone();
        self.result = Some(entry.output.clone());
        Ok(entry)
    }

    /// Takes a copy of the displayed result for a later clipboard write, so
    /// callers can release the controller before touching the clipboard.
    pub fn begin_copy(&self) -> Option<PendingCopy> {
        let text = self.result.clone()?;
        Some(PendingCopy {
            text,
            clipboard: Arc::clone(&self.clipboard),
        })
    }

    /// Puts the displayed result on the clipboard. Returns `false` if there was
    /// nothing to copy. Clipboard failures are logged and ignored.
    pub fn copy_result(&self) -> bool {
        match self.begin_copy() {
            Some(copy) => {
                copy.write();
                true
            }
            None => false,
        }
    }
}
