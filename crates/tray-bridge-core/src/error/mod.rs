use error_location::ErrorLocation;
use thiserror::Error;

/// Bridge errors with source location tracking.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Null context, non-positive dimension, wrong buffer length.
    #[error("Invalid argument: {reason} {location}")]
    InvalidArgument {
        /// Description of the rejected argument.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The UI run loop has not started yet or has already been torn down.
    #[error("UI run loop not ready {location}")]
    NotReady {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Malformed menu description. Never partially applied.
    #[error("Menu description parse failure: {reason} {location}")]
    ParseFailure {
        /// Description of the parse failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Script evaluation requested with no settings window open.
    #[error("No active settings window {location}")]
    NoActiveWindow {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A UI-thread-only operation was attempted from another thread.
    #[error("Operation must run on the UI thread {location}")]
    OffUiThread {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The native toolkit rejected an operation.
    #[error("Native backend error: {reason} {location}")]
    Backend {
        /// Description of the native failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;
