//! Tray Bridge Core
//!
//! Main-thread dispatch bridge between a managed runtime and a native tray
//! shell. All UI state is mutated on one UI thread; every other thread asks
//! for work to be done there through a [`Dispatcher`].
//!
//! # Example
//!
//! ```no_run
//! use tray_bridge_core::{MainThread, UiWaker, dispatch_channel};
//!
//! struct Wake;
//! impl UiWaker for Wake {
//!     fn wake(&self) -> bool {
//!         true
//!     }
//! }
//!
//! let (dispatcher, mut receiver) = dispatch_channel(Wake);
//! let main_thread = MainThread::<Vec<&'static str>>::new(dispatcher);
//! let mut trampoline = main_thread.trampoline();
//!
//! receiver.start();
//! main_thread.run_on_main(|log| log.push("hello from the UI thread")).ok();
//!
//! let mut log = Vec::new();
//! receiver.run_pending(&mut trampoline, &mut log).ok();
//! assert_eq!(log, ["hello from the UI thread"]);
//! ```

mod dispatch;
mod error;
mod event;
pub mod ffi;
mod icon;
mod menu;
mod settings;
mod tray;

pub use {
    dispatch::{
        Context, DispatchReceiver, Dispatcher, LoopState, MainThread, TaskRegistry, Trampoline,
        UiTask, UiWaker, dispatch_channel,
    },
    error::{BridgeError, Result as CoreResult},
    event::{EventReceiver, EventSender, RuntimeEvent, event_channel},
    icon::{BYTES_PER_PIXEL, IconBitmap},
    menu::{MAX_MENU_DEPTH, MenuDescription, MenuItem, MenuItemKind},
    settings::{SettingsController, SettingsWindowState, SurfaceHost, WebSurface},
    tray::{TrayBackend, TrayController, TrayState},
};

#[cfg(test)]
mod tests;
