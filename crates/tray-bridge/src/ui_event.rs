use tray_icon::menu::MenuEvent;
use uuid::Uuid;

/// Events posted into the main thread's event loop.
///
/// The main thread owns every native object (`TrayIcon` and the settings
/// window are `!Send`), so anything that wants them flows through this enum.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Dispatch requests are waiting in the queue.
    Dispatch,
    /// A tray menu item was clicked.
    Menu(MenuEvent),
    /// The settings page posted a message.
    SettingsMessage {
        /// Session of the window that posted it.
        session: Uuid,
        /// Raw message body.
        body: String,
    },
}
