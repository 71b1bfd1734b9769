//! Settings window backed by a tao window and a wry webview.
//!
//! One native window is created when the event loop starts and stays hidden
//! while no settings surface is open. Every surface gets its own webview,
//! dropped again when the surface is released.

use crate::{AppError, AppResult, UiEvent, UiProxy, config::SettingsWindowConfig};

use std::{cell::Cell, panic::Location, rc::Rc};

use error_location::ErrorLocation;
use tao::{
    dpi::LogicalSize,
    event_loop::EventLoopWindowTarget,
    window::{Window, WindowBuilder, WindowId},
};
use tracing::{debug, info, instrument, warn};
use tray_bridge_core::{BridgeError, CoreResult, SurfaceHost, WebSurface};
use uuid::Uuid;
use wry::{WebView, WebViewBuilder, http::Request};

/// Owns the settings window and hands out webview surfaces for it.
pub struct WryHost {
    window: Window,
    proxy: UiProxy,
    session: Rc<Cell<Option<Uuid>>>,
}

/// A webview currently showing a settings document.
pub struct WrySurface {
    webview: WebView,
}

#[track_caller]
fn webview_error(what: &str, e: wry::Error) -> BridgeError {
    BridgeError::Backend {
        reason: format!("{}: {}", what, e),
        location: ErrorLocation::from(Location::caller()),
    }
}

impl WryHost {
    /// Create the hidden settings window. Must run inside the event loop.
    #[track_caller]
    #[instrument(skip(target, proxy))]
    pub fn new(
        target: &EventLoopWindowTarget<UiEvent>,
        config: &SettingsWindowConfig,
        proxy: UiProxy,
    ) -> AppResult<Self> {
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_visible(false)
            .build(target)
            .map_err(|e| AppError::WindowError {
                reason: format!("Failed to create settings window: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!("Settings window created hidden");

        Ok(Self {
            window,
            proxy,
            session: Rc::new(Cell::new(None)),
        })
    }

    /// Native id of the settings window, for routing window events.
    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    #[track_caller]
    fn build_webview(&self, content: &str) -> CoreResult<WebView> {
        let proxy = self.proxy.clone();
        let session = Rc::clone(&self.session);

        let builder = WebViewBuilder::new()
            .with_html(content)
            .with_ipc_handler(move |request: Request<String>| {
                let Some(session) = session.get() else {
                    debug!("IPC message with no settings session dropped");
                    return;
                };
                let body = request.into_body();
                if !proxy.send(UiEvent::SettingsMessage { session, body }) {
                    warn!("Event loop closed, settings message dropped");
                }
            });

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;

            builder
                .build_gtk(self.window.gtk_window())
                .map_err(|e| webview_error("Failed to create webview", e))?
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder
            .build(&self.window)
            .map_err(|e| webview_error("Failed to create webview", e))?;

        Ok(webview)
    }
}

impl SurfaceHost for WryHost {
    type Surface = WrySurface;

    #[instrument(skip(self, content), fields(len = content.len()))]
    fn create_surface(&mut self, session: Uuid, content: &str) -> CoreResult<WrySurface> {
        let webview = self.build_webview(content)?;

        self.session.set(Some(session));
        self.window.set_visible(true);
        self.window.set_focus();

        info!(session = %session, "Settings surface shown");
        Ok(WrySurface { webview })
    }

    #[instrument(skip(self, surface))]
    fn release_surface(&mut self, surface: WrySurface) {
        self.session.set(None);
        self.window.set_visible(false);
        drop(surface);

        debug!("Settings surface released");
    }
}

impl WebSurface for WrySurface {
    fn render(&mut self, content: &str) -> CoreResult<()> {
        self.webview
            .load_html(content)
            .map_err(|e| webview_error("Failed to render settings document", e))
    }

    fn evaluate(&self, script: &str) -> CoreResult<()> {
        self.webview
            .evaluate_script(script)
            .map_err(|e| webview_error("Failed to evaluate script", e))
    }
}
