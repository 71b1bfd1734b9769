use serde::Deserialize;

/// Messages the settings page posts through `window.ipc.postMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SettingsMessage {
    /// Put `text` on the system clipboard.
    CopyToClipboard {
        /// Text to copy.
        text: String,
    },
    /// Open `url` in the default browser.
    OpenUrl {
        /// Target URL.
        url: String,
    },
    /// Liveness check, answered by calling `onPong()` in the page.
    Ping,
    /// Close the settings window.
    Close,
}

impl SettingsMessage {
    /// Parse a raw page message. Unknown or malformed messages yield `None`.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
