use crate::UiEvent;

use std::sync::{Arc, Mutex, PoisonError};

use tao::event_loop::EventLoopProxy;
use tracing::debug;
use tray_bridge_core::UiWaker;

/// Thread-safe handle for posting [`UiEvent`]s to the main thread.
#[derive(Clone)]
pub struct UiProxy {
    proxy: Arc<Mutex<EventLoopProxy<UiEvent>>>,
}

impl UiProxy {
    /// Wrap the event loop's proxy.
    pub fn new(proxy: EventLoopProxy<UiEvent>) -> Self {
        Self {
            proxy: Arc::new(Mutex::new(proxy)),
        }
    }

    /// Post `event`. Returns `false` once the event loop has exited.
    pub fn send(&self, event: UiEvent) -> bool {
        let proxy = self.proxy.lock().unwrap_or_else(PoisonError::into_inner);
        match proxy.send_event(event) {
            Ok(()) => true,
            Err(e) => {
                debug!(error = ?e, "Event loop closed, event discarded");
                false
            }
        }
    }
}

impl UiWaker for UiProxy {
    fn wake(&self) -> bool {
        self.send(UiEvent::Dispatch)
    }
}
