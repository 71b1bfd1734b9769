use crate::{Context, CoreResult, Dispatcher, Trampoline};

use std::{
    collections::HashMap,
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{instrument, warn};

/// One-shot unit of UI work.
pub type UiTask<U> = Box<dyn FnOnce(&mut U) + Send>;

/// Runtime-side table from dispatch context to pending UI task.
pub struct TaskRegistry<U: ?Sized> {
    inner: Mutex<RegistryInner<U>>,
}

struct RegistryInner<U: ?Sized> {
    next: NonZeroUsize,
    tasks: HashMap<Context, UiTask<U>>,
}

impl<U: ?Sized> TaskRegistry<U> {
    /// Empty registry. The first context handed out is `1`.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                next: NonZeroUsize::MIN,
                tasks: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner<U>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a task under a fresh context.
    pub fn store(&self, task: UiTask<U>) -> Context {
        let mut inner = self.lock();
        let context = Context::from_token(inner.next);
        inner.next = inner.next.checked_add(1).unwrap_or(NonZeroUsize::MIN);
        inner.tasks.insert(context, task);
        context
    }

    /// Remove and return the task for `context`, if still pending.
    pub fn take(&self, context: Context) -> Option<UiTask<U>> {
        self.lock().tasks.remove(&context)
    }

    /// Number of tasks waiting for delivery.
    pub fn pending(&self) -> usize {
        self.lock().tasks.len()
    }
}

impl<U: ?Sized> Default for TaskRegistry<U> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle for running closures on the UI thread from anywhere.
///
/// Pairs a [`Dispatcher`] with a [`TaskRegistry`]: the closure is parked in
/// the registry and only its context crosses the thread boundary.
pub struct MainThread<U: ?Sized> {
    dispatcher: Dispatcher,
    registry: Arc<TaskRegistry<U>>,
}

impl<U: ?Sized> Clone for MainThread<U> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<U: ?Sized + 'static> MainThread<U> {
    /// Wrap a dispatcher with a fresh registry.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            registry: Arc::new(TaskRegistry::new()),
        }
    }

    /// Queue `task` to run on the UI thread with the UI state.
    ///
    /// # Errors
    ///
    /// Whatever [`Dispatcher::dispatch`] returns. The task is discarded
    /// without running.
    #[track_caller]
    pub fn run_on_main(&self, task: impl FnOnce(&mut U) + Send + 'static) -> CoreResult<()> {
        let context = self.registry.store(Box::new(task));
        if let Err(e) = self.dispatcher.dispatch(context) {
            self.registry.take(context);
            return Err(e);
        }
        Ok(())
    }

    /// Build the runtime callback that resolves contexts issued by this handle.
    #[instrument(skip(self))]
    pub fn trampoline(&self) -> Trampoline<U> {
        let registry = Arc::clone(&self.registry);
        Trampoline::new(move |context, ui| match registry.take(context) {
            Some(task) => task(ui),
            None => warn!(?context, "No pending task for delivered context"),
        })
    }

    /// The underlying dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Tasks queued but not yet delivered.
    pub fn pending(&self) -> usize {
        self.registry.pending()
    }
}
