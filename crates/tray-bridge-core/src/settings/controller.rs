use crate::{
    BridgeError, CoreResult, EventSender, RuntimeEvent,
    settings::{SurfaceHost, WebSurface},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Lifecycle of the one settings window.
pub enum SettingsWindowState<S> {
    /// No window.
    Absent,
    /// A window is showing `content`.
    Open {
        /// Identifies this window instance. Stale native events carry an
        /// older session and are ignored.
        session: Uuid,
        /// Native surface.
        surface: S,
        /// Document currently rendered.
        content: String,
    },
}

/// Settings window controller. Enforces at most one live window.
pub struct SettingsController<H: SurfaceHost> {
    host: H,
    state: SettingsWindowState<H::Surface>,
    events: EventSender,
}

impl<H: SurfaceHost> SettingsController<H> {
    /// Controller with no window open.
    pub fn new(host: H, events: EventSender) -> Self {
        Self {
            host,
            state: SettingsWindowState::Absent,
            events,
        }
    }

    /// Show `content`, creating the window if needed or re-rendering the
    /// existing one in place. Returns the window's session.
    ///
    /// # Errors
    ///
    /// `Backend` when the toolkit fails. A failed re-render keeps the old
    /// document; a failed creation leaves no window.
    #[track_caller]
    #[instrument(skip(self, content), fields(len = content.len()))]
    pub fn open(&mut self, content: &str) -> CoreResult<Uuid> {
        match &mut self.state {
            SettingsWindowState::Open {
                session,
                surface,
                content: current,
            } => {
                surface.render(content)?;
                *current = content.to_string();
                debug!(session = %session, "Settings window re-rendered");
                Ok(*session)
            }
            SettingsWindowState::Absent => {
                let session = Uuid::new_v4();
                let surface = self.host.create_surface(session, content)?;
                self.state = SettingsWindowState::Open {
                    session,
                    surface,
                    content: content.to_string(),
                };
                info!(session = %session, "Settings window opened");
                Ok(session)
            }
        }
    }

    /// Run `script` in the open window.
    ///
    /// # Errors
    ///
    /// `NoActiveWindow` when nothing is open, `Backend` when the toolkit
    /// refuses the script.
    #[track_caller]
    pub fn evaluate(&self, script: &str) -> CoreResult<()> {
        match &self.state {
            SettingsWindowState::Open { surface, .. } => surface.evaluate(script),
            SettingsWindowState::Absent => {
                debug!("Script evaluation with no settings window");
                Err(BridgeError::NoActiveWindow {
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// Close the window from code. Returns whether one was open.
    #[instrument(skip(self))]
    pub fn close(&mut self) -> bool {
        match std::mem::replace(&mut self.state, SettingsWindowState::Absent) {
            SettingsWindowState::Open {
                session, surface, ..
            } => {
                self.host.release_surface(surface);
                info!(session = %session, "Settings window closed");
                true
            }
            SettingsWindowState::Absent => false,
        }
    }

    /// The user closed the window belonging to `session`.
    ///
    /// Tears the window down and notifies the runtime. Events for any other
    /// session are ignored.
    #[instrument(skip(self))]
    pub fn handle_user_close(&mut self, session: Uuid) -> bool {
        if self.session() != Some(session) {
            debug!("Close event for stale settings session ignored");
            return false;
        }

        self.close();
        if self.events.send(RuntimeEvent::SettingsClosed).is_err() {
            warn!("Runtime event receiver dropped, close notification lost");
        }
        true
    }

    /// Forward a message posted by the page of `session` to the runtime.
    #[instrument(skip(self, body))]
    pub fn handle_message(&self, session: Uuid, body: String) -> bool {
        if self.session() != Some(session) {
            debug!("Message from stale settings session ignored");
            return false;
        }

        if self
            .events
            .send(RuntimeEvent::SettingsMessage { body })
            .is_err()
        {
            warn!("Runtime event receiver dropped, settings message lost");
            return false;
        }
        true
    }

    /// Whether a window is open.
    pub fn is_open(&self) -> bool {
        matches!(self.state, SettingsWindowState::Open { .. })
    }

    /// Session of the open window.
    pub fn session(&self) -> Option<Uuid> {
        match &self.state {
            SettingsWindowState::Open { session, .. } => Some(*session),
            SettingsWindowState::Absent => None,
        }
    }

    /// Document rendered in the open window.
    pub fn content(&self) -> Option<&str> {
        match &self.state {
            SettingsWindowState::Open { content, .. } => Some(content),
            SettingsWindowState::Absent => None,
        }
    }

    /// The native host.
    pub fn host(&self) -> &H {
        &self.host
    }
}
