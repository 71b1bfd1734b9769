use crate::{ClipboardBridge, NativeTray, WryHost};

use tray_bridge_core::{SettingsController, TrayController};

/// Everything the main thread owns. Only ever touched on the UI thread,
/// either directly by the event loop or by tasks sent through `MainThread`.
pub struct UiState {
    pub(crate) tray: TrayController<NativeTray>,
    pub(crate) settings: SettingsController<WryHost>,
    pub(crate) clipboard: ClipboardBridge,
    exit_requested: bool,
}

impl UiState {
    /// Collect the UI-thread controllers.
    pub fn new(
        tray: TrayController<NativeTray>,
        settings: SettingsController<WryHost>,
        clipboard: ClipboardBridge,
    ) -> Self {
        Self {
            tray,
            settings,
            clipboard,
            exit_requested: false,
        }
    }

    /// Ask the event loop to exit after the current batch.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Whether some task asked the event loop to exit.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
