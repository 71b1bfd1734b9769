use crate::{CoreResult, IconBitmap, MenuDescription};

/// Native side of the tray. Only ever called on the UI thread.
///
/// Implementations must leave the previously shown icon or menu in place when
/// they return an error.
pub trait TrayBackend {
    /// Show `icon` in the status area.
    fn show_icon(&mut self, icon: &IconBitmap) -> CoreResult<()>;

    /// Replace the whole dropdown menu with `menu`.
    fn show_menu(&mut self, menu: &MenuDescription) -> CoreResult<()>;

    /// Replace the hover text.
    fn show_tooltip(&mut self, tooltip: &str) -> CoreResult<()>;
}
