//! services/api/src/adapters/clipboard.rs
//!
//! Clipboard adapters implementing the `ClipboardService` port.

use copy_generator_core::ports::{ClipboardService, PortResult};
#[cfg(feature = "clipboard")]
use copy_generator_core::ports::PortError;
use tracing::info;

/// Writes to the desktop clipboard of the machine the service runs on.
#[cfg(feature = "clipboard")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboardAdapter;

#[cfg(feature = "clipboard")]
impl ClipboardService for SystemClipboardAdapter {
    fn write_text(&self, text: &str) -> PortResult<()> {
        // A fresh handle per call; holding one open ties up the X11/Wayland selection.
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| PortError::Unexpected(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        info!("Copied {} chars to the clipboard.", text.len());
        Ok(())
    }
}

/// Used when the service is built without clipboard support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopClipboardAdapter;

impl ClipboardService for NoopClipboardAdapter {
    fn write_text(&self, text: &str) -> PortResult<()> {
        info!(
            "Clipboard support is disabled; dropping {} chars.",
            text.len()
        );
        Ok(())
    }
}
