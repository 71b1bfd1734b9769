//! Tray Bridge: a native tray icon and settings window driven from a managed
//! runtime through the main-thread dispatcher.

mod app;
mod config;
mod error;
mod icon;
mod settings_message;
mod settings_window;
mod tray_manager;
mod ui_event;
mod ui_proxy;
mod ui_state;
mod utility;

pub(crate) use {
    app::App,
    error::{AppError, Result as AppResult},
    settings_message::SettingsMessage,
    settings_window::WryHost,
    tray_manager::NativeTray,
    ui_event::UiEvent,
    ui_proxy::UiProxy,
    ui_state::UiState,
    utility::ClipboardBridge,
};

use crate::config::Config;

use std::time::Instant;

use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tracing::{debug, error, info};
use tray_bridge_core::{
    MainThread, RuntimeEvent, SettingsController, TrayController, dispatch_channel, event_channel,
};
use tray_icon::menu::MenuEvent;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("tray_bridge=debug,tray_bridge_core=debug")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoopBuilder::<UiEvent>::with_user_event().build();
    let proxy = UiProxy::new(event_loop.create_proxy());

    // Menu clicks arrive on whatever thread the toolkit uses; bounce them
    // into the event loop so activation runs next to the tray state.
    let menu_proxy = proxy.clone();
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        menu_proxy.send(UiEvent::Menu(event));
    }));

    let (dispatcher, mut receiver) = dispatch_channel(proxy.clone());
    let main_thread = MainThread::<UiState>::new(dispatcher);
    let mut trampoline = main_thread.trampoline();
    let (event_tx, event_rx) = event_channel();

    // UI-thread state is built once the loop is running; the runtime half is
    // handed to the tokio thread at the same moment.
    let mut ui: Option<UiState> = None;
    let mut app = Some(App {
        main_thread,
        events: event_rx,
        config: config.clone(),
        started: Instant::now(),
    });

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                let host = match WryHost::new(target, &config.settings, proxy.clone()) {
                    Ok(host) => host,
                    Err(e) => {
                        error!("Failed to create settings window: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let tray = TrayController::new(
                    NativeTray::new(config.tray.tooltip.clone()),
                    event_tx.clone(),
                );
                let settings = SettingsController::new(host, event_tx.clone());
                ui = Some(UiState::new(tray, settings, ClipboardBridge::new()));

                receiver.start();

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let Some(app) = app.take() else {
                    return;
                };

                // Spawn tokio runtime on separate thread.
                // Every native object stays on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        if let Err(e) = app.run().await {
                            error!(error = ?e, "App error");
                        }
                    });
                });
            }
            Event::UserEvent(UiEvent::Dispatch) => {
                let Some(ui) = ui.as_mut() else {
                    return;
                };

                match receiver.run_pending(&mut trampoline, ui) {
                    Ok(delivered) => debug!(delivered, "Dispatch batch delivered"),
                    Err(e) => error!(error = ?e, "Failed to deliver dispatch batch"),
                }

                if ui.exit_requested() {
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            }
            Event::UserEvent(UiEvent::Menu(menu_event)) => {
                if let Some(ui) = ui.as_ref() {
                    ui.tray.activate(&menu_event.id.0);
                }
            }
            Event::UserEvent(UiEvent::SettingsMessage { session, body }) => {
                if let Some(ui) = ui.as_ref() {
                    ui.settings.handle_message(session, body);
                }
            }
            Event::WindowEvent {
                window_id,
                event: WindowEvent::CloseRequested,
                ..
            } => {
                let Some(ui) = ui.as_mut() else {
                    return;
                };

                if window_id == ui.settings.host().window_id()
                    && let Some(session) = ui.settings.session()
                {
                    ui.settings.handle_user_close(session);
                }
            }
            Event::LoopDestroyed => {
                let dropped = receiver.shutdown();
                drop(ui.take());

                if event_tx.send(RuntimeEvent::Terminating).is_err() {
                    debug!("Runtime already gone at termination");
                }
                info!(dropped, "Tray Bridge event loop destroyed");
            }
            _ => {}
        }
    });
}
