use crate::config::default_tooltip;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Tray icon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrayConfig {
    /// Hover text shown over the tray icon.
    #[serde(default = "default_tooltip")]
    pub tooltip: String,
    /// PNG to use instead of the built-in glyph.
    #[serde(default)]
    pub icon_path: Option<PathBuf>,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            tooltip: default_tooltip(),
            icon_path: None,
        }
    }
}
