//! Clipboard and default-browser bridges.
//!
//! Both are best-effort: failures are logged and never surfaced to the caller.

use crate::{AppError, AppResult};

use std::panic::Location;

use arboard::Clipboard;
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// System clipboard writer. Owned by the UI thread.
///
/// The platform clipboard is opened on first use; a failed open is retried on
/// the next copy.
#[derive(Default)]
pub struct ClipboardBridge {
    pub(crate) clipboard: Option<Clipboard>,
}

impl ClipboardBridge {
    /// Bridge with no clipboard handle yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard contents with `text`.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn copy(&mut self, text: &str) {
        if let Err(e) = self.try_copy(text) {
            warn!(error = ?e, "Clipboard copy failed");
        }
    }

    #[track_caller]
    fn try_copy(&mut self, text: &str) -> AppResult<()> {
        let mut clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(|e| AppError::ClipboardError {
                reason: format!("Failed to initialize clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?,
        };

        let result = clipboard
            .set_text(text)
            .map_err(|e| AppError::ClipboardError {
                reason: format!("Failed to set clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            });
        self.clipboard = Some(clipboard);
        result?;

        debug!(text_len = text.len(), "Text copied to clipboard");
        Ok(())
    }
}

/// Hand `url` to the platform's default handler without waiting for it.
#[instrument]
pub fn open_url(url: &str) {
    match open::that_detached(url) {
        Ok(()) => info!("URL handed to default handler"),
        Err(e) => warn!(error = %e, "Failed to open URL"),
    }
}
