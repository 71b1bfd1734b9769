//! Many-producer, single-consumer hand-off of dispatch requests to the UI thread.
//!
//! Producers push a [`Context`] onto a shared FIFO and poke the native run
//! loop through a [`UiWaker`]. The UI thread drains the FIFO in batches from
//! its event handler, so a request is never delivered inline on the caller's
//! stack, even when the caller is the UI thread itself.

use crate::{BridgeError, Context, CoreResult, Trampoline};

use std::{
    collections::VecDeque,
    ffi::c_void,
    panic::Location,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU8, AtomicU64, Ordering},
    },
    thread::{self, ThreadId},
};

use error_location::ErrorLocation;
use tracing::{debug, instrument, trace, warn};

/// Wake-up signal into the native run loop.
///
/// Implementations post a message to the toolkit's event queue. The return
/// value is `false` once the run loop can no longer receive messages.
pub trait UiWaker: Send + Sync {
    /// Ask the run loop to call [`DispatchReceiver::run_pending`] soon.
    fn wake(&self) -> bool;
}

/// Lifecycle of the UI run loop as seen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// The receiver has not been started on the UI thread yet.
    NotStarted,
    /// Requests are accepted and delivered.
    Running,
    /// The run loop is gone. Requests are dropped.
    TornDown,
}

impl LoopState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LoopState::NotStarted,
            1 => LoopState::Running,
            _ => LoopState::TornDown,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            LoopState::NotStarted => 0,
            LoopState::Running => 1,
            LoopState::TornDown => 2,
        }
    }
}

struct Shared {
    queue: Mutex<VecDeque<Context>>,
    state: AtomicU8,
    dropped: AtomicU64,
    waker: Box<dyn UiWaker>,
}

impl Shared {
    // A poisoned queue only means a producer panicked mid-push; the deque
    // itself is still structurally valid.
    fn lock_queue(&self) -> MutexGuard<'_, VecDeque<Context>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> LoopState {
        LoopState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: LoopState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }

    /// Flip to `TornDown` and discard everything still queued.
    fn tear_down(&self) -> u64 {
        let mut queue = self.lock_queue();
        self.set_state(LoopState::TornDown);
        let discarded = queue.len() as u64;
        queue.clear();
        drop(queue);

        self.dropped.fetch_add(discarded, Ordering::Relaxed);
        discarded
    }
}

/// Producer half. Cheap to clone and safe to use from any thread.
#[derive(Clone)]
pub struct Dispatcher {
    shared: Arc<Shared>,
}

/// Consumer half. Owned by the UI thread for the lifetime of the run loop.
pub struct DispatchReceiver {
    shared: Arc<Shared>,
    ui_thread: Option<ThreadId>,
}

/// Create a connected dispatcher/receiver pair.
///
/// The pair starts in [`LoopState::NotStarted`]; every `dispatch` fails with
/// `NotReady` until [`DispatchReceiver::start`] runs on the UI thread.
pub fn dispatch_channel(waker: impl UiWaker + 'static) -> (Dispatcher, DispatchReceiver) {
    let shared = Arc::new(Shared {
        queue: Mutex::new(VecDeque::new()),
        state: AtomicU8::new(LoopState::NotStarted.as_u8()),
        dropped: AtomicU64::new(0),
        waker: Box::new(waker),
    });

    (
        Dispatcher {
            shared: Arc::clone(&shared),
        },
        DispatchReceiver {
            shared,
            ui_thread: None,
        },
    )
}

impl Dispatcher {
    /// Schedule `context` for delivery to the trampoline on the UI thread.
    ///
    /// Returns as soon as the request is queued; the callback has not run yet.
    /// Requests from one thread are delivered in submission order.
    ///
    /// # Errors
    ///
    /// `NotReady` when the run loop has not started or is gone. The request
    /// is dropped and counted in [`Dispatcher::dropped`].
    #[track_caller]
    pub fn dispatch(&self, context: Context) -> CoreResult<()> {
        let mut queue = self.shared.lock_queue();
        let state = self.shared.state();
        if state != LoopState::Running {
            drop(queue);
            let dropped = self.shared.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            warn!(?context, ?state, dropped, "Dispatch rejected, run loop not running");
            return Err(BridgeError::NotReady {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        queue.push_back(context);
        drop(queue);

        if !self.shared.waker.wake() {
            let discarded = self.shared.tear_down();
            warn!(?context, discarded, "Run loop stopped accepting wake-ups");
            return Err(BridgeError::NotReady {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        trace!(?context, "Dispatch queued");
        Ok(())
    }

    /// Raw-pointer entry point. Null is rejected before anything is queued.
    #[track_caller]
    pub fn dispatch_ptr(&self, ptr: *mut c_void) -> CoreResult<()> {
        let context = Context::from_ptr(ptr)?;
        self.dispatch(context)
    }

    /// Current run loop state.
    pub fn state(&self) -> LoopState {
        self.shared.state()
    }

    /// Number of requests dropped because the run loop was not running.
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }
}

impl DispatchReceiver {
    /// Bind the calling thread as the UI thread and begin accepting requests.
    ///
    /// A torn-down receiver stays torn down.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        if self.shared.state() == LoopState::TornDown {
            warn!("Start ignored, dispatch receiver already shut down");
            return;
        }
        let current = thread::current().id();
        self.ui_thread = Some(current);
        self.shared.set_state(LoopState::Running);
        debug!(ui_thread = ?current, "Dispatch receiver started");
    }

    /// Deliver every request queued before this call, in order.
    ///
    /// Requests submitted while the batch is being delivered, including ones
    /// submitted by the callbacks themselves, wait for the next wake-up.
    ///
    /// # Errors
    ///
    /// `OffUiThread` when called from a thread other than the one that called
    /// [`DispatchReceiver::start`]. Nothing is delivered in that case.
    #[track_caller]
    pub fn run_pending<U: ?Sized>(
        &self,
        trampoline: &mut Trampoline<U>,
        ui: &mut U,
    ) -> CoreResult<usize> {
        if self.ui_thread != Some(thread::current().id()) {
            return Err(BridgeError::OffUiThread {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let batch = std::mem::take(&mut *self.shared.lock_queue());
        let delivered = batch.len();
        for context in batch {
            trampoline.deliver(context, ui);
        }

        if delivered > 0 {
            trace!(delivered, "Dispatch batch delivered");
        }
        Ok(delivered)
    }

    /// Current run loop state.
    pub fn state(&self) -> LoopState {
        self.shared.state()
    }

    /// Tear down: drop anything still queued and reject future requests.
    ///
    /// Returns how many queued requests were discarded.
    #[instrument(skip(self))]
    pub fn shutdown(&mut self) -> u64 {
        if self.shared.state() == LoopState::TornDown {
            return 0;
        }
        let discarded = self.shared.tear_down();
        debug!(discarded, "Dispatch receiver shut down");
        discarded
    }
}

impl Drop for DispatchReceiver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
