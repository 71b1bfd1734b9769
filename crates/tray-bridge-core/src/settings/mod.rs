mod controller;
mod surface;

pub use {
    controller::{SettingsController, SettingsWindowState},
    surface::{SurfaceHost, WebSurface},
};
