#[allow(clippy::module_inception)]
mod config;
mod runtime_config;
mod settings_window_config;
mod tray_config;

pub(crate) use {
    config::Config, runtime_config::RuntimeConfig, settings_window_config::SettingsWindowConfig,
    tray_config::TrayConfig,
};

pub(crate) const DEFAULT_TOOLTIP: &str = "Tray Bridge";
pub(crate) const DEFAULT_WINDOW_TITLE: &str = "Tray Bridge Settings";
pub(crate) const DEFAULT_WINDOW_WIDTH: u32 = 720;
pub(crate) const DEFAULT_WINDOW_HEIGHT: u32 = 560;
pub(crate) const DEFAULT_STATUS_INTERVAL_SECS: u64 = 2;
pub(crate) const DEFAULT_PROJECT_URL: &str = "https://github.com/TonyMarkham/tray-bridge";

pub(crate) fn default_tooltip() -> String {
    DEFAULT_TOOLTIP.to_string()
}

pub(crate) fn default_window_title() -> String {
    DEFAULT_WINDOW_TITLE.to_string()
}

pub(crate) fn default_window_width() -> u32 {
    DEFAULT_WINDOW_WIDTH
}

pub(crate) fn default_window_height() -> u32 {
    DEFAULT_WINDOW_HEIGHT
}

pub(crate) fn default_status_interval_secs() -> u64 {
    DEFAULT_STATUS_INTERVAL_SECS
}

pub(crate) fn default_project_url() -> String {
    DEFAULT_PROJECT_URL.to_string()
}
