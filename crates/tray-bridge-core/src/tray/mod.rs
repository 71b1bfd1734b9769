mod backend;
mod controller;

pub use {
    backend::TrayBackend,
    controller::{TrayController, TrayState},
};
