use crate::config::{default_window_height, default_window_title, default_window_width};

use serde::{Deserialize, Serialize};

/// Settings window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsWindowConfig {
    /// Window title.
    #[serde(default = "default_window_title")]
    pub title: String,
    /// Initial inner width in logical pixels.
    #[serde(default = "default_window_width")]
    pub width: u32,
    /// Initial inner height in logical pixels.
    #[serde(default = "default_window_height")]
    pub height: u32,
}

impl Default for SettingsWindowConfig {
    fn default() -> Self {
        Self {
            title: default_window_title(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}
