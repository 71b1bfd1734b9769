//! Owner of the single tray icon and its dropdown menu.
//!
//! The controller holds no locks. It must only be touched from the UI
//! thread; other threads route their requests through the dispatcher.

use crate::{
    CoreResult, EventSender, IconBitmap, MenuDescription, RuntimeEvent, tray::TrayBackend,
};

use tracing::{debug, info, instrument, warn};

/// What the tray currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrayState {
    /// Current icon, once one has been set.
    pub icon: Option<IconBitmap>,
    /// Current menu.
    pub menu: MenuDescription,
    /// Current hover text.
    pub tooltip: Option<String>,
}

/// Tray/menu controller over a native backend.
pub struct TrayController<B> {
    backend: B,
    state: TrayState,
    events: EventSender,
}

impl<B: TrayBackend> TrayController<B> {
    /// Create a controller with an empty tray.
    pub fn new(backend: B, events: EventSender) -> Self {
        Self {
            backend,
            state: TrayState::default(),
            events,
        }
    }

    /// Replace the tray icon.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for bad dimensions or buffer length, `Backend` when
    /// the toolkit rejects the icon. The previous icon stays in place.
    #[track_caller]
    #[instrument(skip(self, rgba), fields(len = rgba.len()))]
    pub fn set_icon(&mut self, rgba: Vec<u8>, width: u32, height: u32) -> CoreResult<()> {
        let icon = IconBitmap::new(rgba, width, height)?;
        self.backend.show_icon(&icon)?;
        self.state.icon = Some(icon);

        debug!(width, height, "Tray icon replaced");
        Ok(())
    }

    /// Parse `payload` and atomically replace the menu.
    ///
    /// # Errors
    ///
    /// `ParseFailure` for a malformed payload, `Backend` when the toolkit
    /// fails. Either way the previous menu stays in place.
    #[track_caller]
    #[instrument(skip(self, payload), fields(len = payload.len()))]
    pub fn update_menu(&mut self, payload: &str) -> CoreResult<()> {
        let menu = MenuDescription::parse(payload)?;
        self.replace_menu(menu)
    }

    /// Replace the menu with an already-validated description.
    #[track_caller]
    pub fn replace_menu(&mut self, menu: MenuDescription) -> CoreResult<()> {
        self.backend.show_menu(&menu)?;

        info!(items = menu.items().len(), "Tray menu replaced");
        self.state.menu = menu;
        Ok(())
    }

    /// Replace the hover text.
    #[track_caller]
    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) -> CoreResult<()> {
        let tooltip = tooltip.into();
        self.backend.show_tooltip(&tooltip)?;
        self.state.tooltip = Some(tooltip);
        Ok(())
    }

    /// Handle one native click on the item with identifier `id`.
    ///
    /// Emits exactly one [`RuntimeEvent::MenuActivated`] when `id` names an
    /// enabled leaf action in the current menu. Returns whether it did.
    #[instrument(skip(self))]
    pub fn activate(&self, id: &str) -> bool {
        let Some(item) = self.state.menu.find_action(id) else {
            debug!("Click on unknown or non-action item ignored");
            return false;
        };
        if !item.enabled {
            debug!("Click on disabled item ignored");
            return false;
        }

        if self
            .events
            .send(RuntimeEvent::MenuActivated { id: id.to_string() })
            .is_err()
        {
            warn!("Runtime event receiver dropped, activation lost");
            return false;
        }
        true
    }

    /// Current icon.
    pub fn icon(&self) -> Option<&IconBitmap> {
        self.state.icon.as_ref()
    }

    /// Current menu.
    pub fn menu(&self) -> &MenuDescription {
        &self.state.menu
    }

    /// Full current state.
    pub fn state(&self) -> &TrayState {
        &self.state
    }

    /// The native backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The native backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
