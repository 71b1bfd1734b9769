use crate::config::{default_project_url, default_status_interval_secs};

use serde::{Deserialize, Serialize};

/// Runtime-side behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Seconds between status menu refreshes.
    #[serde(default = "default_status_interval_secs")]
    pub status_interval_secs: u64,
    /// Page opened by the "Open project page" menu item.
    #[serde(default = "default_project_url")]
    pub project_url: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            status_interval_secs: default_status_interval_secs(),
            project_url: default_project_url(),
        }
    }
}
