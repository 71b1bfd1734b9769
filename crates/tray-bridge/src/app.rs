use crate::{AppResult, SettingsMessage, UiState, config::Config, icon, utility};

use std::time::{Duration, Instant};

use serde_json::{Value, json};
use tracing::{debug, error, info, instrument, warn};
use tray_bridge_core::{EventReceiver, MainThread, RuntimeEvent};

/// Menu identifiers the runtime reacts to.
pub(crate) mod menu_ids {
    pub(crate) const STATUS: &str = "status";
    pub(crate) const TOOLS: &str = "tools";
    pub(crate) const COPY_UPTIME: &str = "copy_uptime";
    pub(crate) const OPEN_PROJECT: &str = "open_project";
    pub(crate) const SETTINGS: &str = "settings";
    pub(crate) const EXIT: &str = "exit";
}

const SETTINGS_PAGE: &str = include_str!("../resources/settings.html");

/// Managed-runtime side of the bridge.
///
/// Runs on the tokio thread and never touches native objects directly: every
/// UI mutation is a task handed to `main_thread`, and everything the UI
/// reports back arrives on `events`.
pub struct App {
    pub(crate) main_thread: MainThread<UiState>,
    pub(crate) events: EventReceiver,
    pub(crate) config: Config,
    pub(crate) started: Instant,
}

/// Menu payload for the given uptime.
pub(crate) fn status_menu(uptime: Duration) -> String {
    json!([
        { "type": "action", "id": menu_ids::STATUS, "label": uptime_label(uptime), "enabled": false },
        { "type": "separator" },
        {
            "type": "submenu",
            "id": menu_ids::TOOLS,
            "label": "Tools",
            "children": [
                { "type": "action", "id": menu_ids::COPY_UPTIME, "label": "Copy uptime" },
                { "type": "action", "id": menu_ids::OPEN_PROJECT, "label": "Open project page" }
            ]
        },
        { "type": "action", "id": menu_ids::SETTINGS, "label": "Settings..." },
        { "type": "separator" },
        { "type": "action", "id": menu_ids::EXIT, "label": "Exit" }
    ])
    .to_string()
}

pub(crate) fn uptime_label(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!(
        "Running for {:02}:{:02}:{:02}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60
    )
}

/// Script calling `onPong` with `label` as a JS string literal.
pub(crate) fn pong_script(label: &str) -> String {
    format!("onPong({})", Value::from(label))
}

impl App {
    /// Run until the UI reports termination.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Tray Bridge runtime starting");

        self.publish_initial_state()?;

        let mut status_tick = tokio::time::interval(self.config.status_interval());
        status_tick.tick().await;

        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(RuntimeEvent::Terminating) => {
                        info!("UI event loop terminated");
                        break;
                    }
                    Some(event) => self.handle_event(event),
                    None => {
                        info!("Runtime event channel closed, shutting down");
                        break;
                    }
                },

                _ = status_tick.tick() => {
                    if let Err(e) = self.publish_menu() {
                        warn!(error = ?e, "Status refresh not delivered");
                    }
                }
            }
        }

        info!(
            dropped = self.main_thread.dispatcher().dropped(),
            "Tray Bridge runtime stopped"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    pub(crate) fn publish_initial_state(&self) -> AppResult<()> {
        let image = match icon::tray_icon(self.config.tray.icon_path.as_deref()) {
            Ok(image) => image,
            Err(e) => {
                warn!(error = ?e, "Configured tray icon unusable, using built-in glyph");
                icon::relay_glyph()
            }
        };
        let tooltip = self.config.tray.tooltip.clone();

        self.main_thread.run_on_main(move |ui| {
            let (width, height) = image.dimensions();
            if let Err(e) = ui.tray.set_icon(image.into_raw(), width, height) {
                error!(error = ?e, "Failed to set tray icon");
            }
            if let Err(e) = ui.tray.set_tooltip(tooltip) {
                error!(error = ?e, "Failed to set tray tooltip");
            }
        })?;

        self.publish_menu()?;
        debug!("Initial tray state published");
        Ok(())
    }

    fn publish_menu(&self) -> AppResult<()> {
        let payload = status_menu(self.started.elapsed());
        self.main_thread.run_on_main(move |ui| {
            if let Err(e) = ui.tray.update_menu(&payload) {
                error!(error = ?e, "Failed to update tray menu");
            }
        })?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn handle_event(&self, event: RuntimeEvent) {
        let result = match event {
            RuntimeEvent::MenuActivated { id } => self.handle_menu(&id),
            RuntimeEvent::SettingsMessage { body } => self.handle_settings_message(&body),
            RuntimeEvent::SettingsClosed => {
                info!("Settings window closed by user");
                Ok(())
            }
            RuntimeEvent::Terminating => Ok(()),
        };

        if let Err(e) = result {
            error!(error = ?e, "Failed to handle runtime event");
        }
    }

    pub(crate) fn handle_menu(&self, id: &str) -> AppResult<()> {
        match id {
            menu_ids::SETTINGS => {
                self.main_thread.run_on_main(|ui| {
                    if let Err(e) = ui.settings.open(SETTINGS_PAGE) {
                        error!(error = ?e, "Failed to open settings window");
                    }
                })?;
            }
            menu_ids::EXIT => {
                info!("Exit requested from tray menu");
                self.main_thread.run_on_main(|ui| ui.request_exit())?;
            }
            menu_ids::COPY_UPTIME => {
                let label = uptime_label(self.started.elapsed());
                self.main_thread
                    .run_on_main(move |ui| ui.clipboard.copy(&label))?;
            }
            menu_ids::OPEN_PROJECT => utility::open_url(&self.config.runtime.project_url),
            other => debug!(id = other, "Unhandled menu item"),
        }
        Ok(())
    }

    pub(crate) fn handle_settings_message(&self, body: &str) -> AppResult<()> {
        let Some(message) = SettingsMessage::parse(body) else {
            warn!(body_len = body.len(), "Unrecognized settings message");
            return Ok(());
        };

        match message {
            SettingsMessage::CopyToClipboard { text } => {
                self.main_thread
                    .run_on_main(move |ui| ui.clipboard.copy(&text))?;
            }
            SettingsMessage::OpenUrl { url } => utility::open_url(&url),
            SettingsMessage::Ping => {
                let script = pong_script(&uptime_label(self.started.elapsed()));
                self.main_thread.run_on_main(move |ui| {
                    if let Err(e) = ui.settings.evaluate(&script) {
                        debug!(error = ?e, "Pong not delivered");
                    }
                })?;
            }
            SettingsMessage::Close => {
                self.main_thread.run_on_main(|ui| {
                    ui.settings.close();
                })?;
            }
        }
        Ok(())
    }
}
