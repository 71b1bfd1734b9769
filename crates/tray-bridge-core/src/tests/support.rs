use crate::{
    BridgeError, CoreResult, IconBitmap, MenuDescription, SurfaceHost, TrayBackend, UiWaker,
    WebSurface,
};

use std::{
    cell::RefCell,
    panic::Location,
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use error_location::ErrorLocation;
use uuid::Uuid;

/// Waker that counts wake-ups and can be switched off to simulate a dead loop.
#[derive(Clone, Default)]
pub(crate) struct CountingWaker {
    pub(crate) wakes: Arc<AtomicUsize>,
    pub(crate) closed: Arc<AtomicBool>,
}

impl UiWaker for CountingWaker {
    fn wake(&self) -> bool {
        if self.closed.load(Ordering::SeqCst) {
            return false;
        }
        self.wakes.fetch_add(1, Ordering::SeqCst);
        true
    }
}

#[track_caller]
fn backend_error(reason: &str) -> BridgeError {
    BridgeError::Backend {
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Tray backend recording what was shown.
#[derive(Default)]
pub(crate) struct RecordingTray {
    pub(crate) icons: Vec<IconBitmap>,
    pub(crate) menus: Vec<MenuDescription>,
    pub(crate) tooltips: Vec<String>,
    pub(crate) fail_next: bool,
}

impl RecordingTray {
    fn check(&mut self) -> CoreResult<()> {
        if std::mem::take(&mut self.fail_next) {
            return Err(backend_error("native tray refused"));
        }
        Ok(())
    }
}

impl TrayBackend for RecordingTray {
    fn show_icon(&mut self, icon: &IconBitmap) -> CoreResult<()> {
        self.check()?;
        self.icons.push(icon.clone());
        Ok(())
    }

    fn show_menu(&mut self, menu: &MenuDescription) -> CoreResult<()> {
        self.check()?;
        self.menus.push(menu.clone());
        Ok(())
    }

    fn show_tooltip(&mut self, tooltip: &str) -> CoreResult<()> {
        self.check()?;
        self.tooltips.push(tooltip.to_string());
        Ok(())
    }
}

/// Everything the fake surfaces did, shared with the test body.
#[derive(Default)]
pub(crate) struct SurfaceLog {
    pub(crate) created: Vec<(Uuid, String)>,
    pub(crate) rendered: Vec<String>,
    pub(crate) scripts: Vec<String>,
    pub(crate) released: usize,
}

pub(crate) struct FakeHost {
    pub(crate) log: Rc<RefCell<SurfaceLog>>,
    pub(crate) fail_create: bool,
}

pub(crate) struct FakeSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl FakeHost {
    pub(crate) fn new() -> (Self, Rc<RefCell<SurfaceLog>>) {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        (
            Self {
                log: Rc::clone(&log),
                fail_create: false,
            },
            log,
        )
    }
}

impl SurfaceHost for FakeHost {
    type Surface = FakeSurface;

    fn create_surface(&mut self, session: Uuid, content: &str) -> CoreResult<FakeSurface> {
        if self.fail_create {
            return Err(backend_error("window creation refused"));
        }
        self.log
            .borrow_mut()
            .created
            .push((session, content.to_string()));
        Ok(FakeSurface {
            log: Rc::clone(&self.log),
        })
    }

    fn release_surface(&mut self, _surface: FakeSurface) {
        self.log.borrow_mut().released += 1;
    }
}

impl WebSurface for FakeSurface {
    fn render(&mut self, content: &str) -> CoreResult<()> {
        self.log.borrow_mut().rendered.push(content.to_string());
        Ok(())
    }

    fn evaluate(&self, script: &str) -> CoreResult<()> {
        self.log.borrow_mut().scripts.push(script.to_string());
        Ok(())
    }
}
