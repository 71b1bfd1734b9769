//! Native system tray backed by `tray-icon`.
//!
//! Native menu items are created with the description's identifiers as their
//! `MenuId`, so a click event maps straight back to the identifier.

use tray_bridge_core::{
    BridgeError, CoreResult, IconBitmap, MenuDescription, MenuItem, MenuItemKind, TrayBackend,
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{
    IsMenuItem, Menu, MenuId, MenuItem as NativeMenuItem, PredefinedMenuItem, Submenu,
};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// System tray icon manager.
///
/// The `TrayIcon` is created lazily on the first icon or menu update, which
/// always arrives on the main thread after the event loop has started.
pub struct NativeTray {
    tray_icon: Option<TrayIcon>,
    tooltip: String,
}

enum NativeItem {
    Action(NativeMenuItem),
    Separator(PredefinedMenuItem),
    Submenu(Submenu),
}

impl NativeItem {
    fn as_item(&self) -> &dyn IsMenuItem {
        match self {
            NativeItem::Action(item) => item,
            NativeItem::Separator(item) => item,
            NativeItem::Submenu(item) => item,
        }
    }
}

#[track_caller]
fn native_error(what: &str, e: impl std::fmt::Display) -> BridgeError {
    BridgeError::Backend {
        reason: format!("{}: {}", what, e),
        location: ErrorLocation::from(Location::caller()),
    }
}

impl NativeTray {
    /// Tray with `tooltip`; nothing is shown until the first update.
    pub fn new(tooltip: impl Into<String>) -> Self {
        Self {
            tray_icon: None,
            tooltip: tooltip.into(),
        }
    }

    #[track_caller]
    fn tray(&mut self) -> CoreResult<&TrayIcon> {
        if self.tray_icon.is_none() {
            let tray_icon = TrayIconBuilder::new()
                .with_tooltip(&self.tooltip)
                .build()
                .map_err(|e| native_error("Failed to create tray icon", e))?;
            info!("System tray icon initialized");
            self.tray_icon = Some(tray_icon);
        }

        self.tray_icon.as_ref().ok_or_else(|| BridgeError::Backend {
            reason: "Tray icon unavailable".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Build the complete native menu before anything is swapped in.
    #[track_caller]
    fn build_menu(description: &MenuDescription) -> CoreResult<Menu> {
        let menu = Menu::new();
        for item in description.items() {
            let native = Self::build_item(item)?;
            menu.append(native.as_item())
                .map_err(|e| native_error("Failed to add menu item", e))?;
        }
        Ok(menu)
    }

    #[track_caller]
    fn build_item(item: &MenuItem) -> CoreResult<NativeItem> {
        Ok(match item.kind {
            MenuItemKind::Separator => NativeItem::Separator(PredefinedMenuItem::separator()),
            MenuItemKind::Action => NativeItem::Action(NativeMenuItem::with_id(
                MenuId::new(&item.id),
                &item.label,
                item.enabled,
                None,
            )),
            MenuItemKind::Submenu => {
                let submenu = Submenu::with_id(MenuId::new(&item.id), &item.label, item.enabled);
                for child in &item.children {
                    let native = Self::build_item(child)?;
                    submenu
                        .append(native.as_item())
                        .map_err(|e| native_error("Failed to add submenu item", e))?;
                }
                NativeItem::Submenu(submenu)
            }
        })
    }
}

impl TrayBackend for NativeTray {
    #[instrument(skip(self, icon))]
    fn show_icon(&mut self, icon: &IconBitmap) -> CoreResult<()> {
        let native = Icon::from_rgba(icon.rgba().to_vec(), icon.width(), icon.height())
            .map_err(|e| native_error("Failed to create icon from RGBA", e))?;

        self.tray()?
            .set_icon(Some(native))
            .map_err(|e| native_error("Failed to update icon", e))?;

        debug!(width = icon.width(), height = icon.height(), "Native icon set");
        Ok(())
    }

    #[instrument(skip(self, menu))]
    fn show_menu(&mut self, menu: &MenuDescription) -> CoreResult<()> {
        let native = Self::build_menu(menu)?;
        self.tray()?.set_menu(Some(Box::new(native)));

        debug!(items = menu.items().len(), "Native menu swapped in");
        Ok(())
    }

    #[instrument(skip(self))]
    fn show_tooltip(&mut self, tooltip: &str) -> CoreResult<()> {
        self.tooltip = tooltip.to_string();
        self.tray()?
            .set_tooltip(Some(tooltip))
            .map_err(|e| native_error("Failed to update tooltip", e))
    }
}
