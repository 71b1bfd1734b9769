use tokio::sync::mpsc;

/// Notifications flowing from the UI thread back to the managed runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// A leaf action item was clicked. One event per click.
    MenuActivated {
        /// Identifier from the menu description.
        id: String,
    },
    /// The settings page posted a message.
    SettingsMessage {
        /// Raw message body as posted by the page.
        body: String,
    },
    /// The user closed the settings window.
    SettingsClosed,
    /// The UI run loop is shutting down.
    Terminating,
}

/// Sending half used on the UI thread. Unbounded so notifying never blocks.
pub type EventSender = mpsc::UnboundedSender<RuntimeEvent>;

/// Receiving half owned by the runtime.
pub type EventReceiver = mpsc::UnboundedReceiver<RuntimeEvent>;

/// Create the runtime notification channel.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
