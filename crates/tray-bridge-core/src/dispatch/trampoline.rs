use crate::{Context, ffi};

/// The single forwarding point between delivered requests and the runtime.
///
/// Holds exactly one registered callback and hands it every delivered
/// context unchanged, synchronously, on the UI thread. `U` is the UI-thread
/// state lent to the callback for the duration of the call.
pub struct Trampoline<U: ?Sized> {
    callback: Box<dyn FnMut(Context, &mut U)>,
}

impl<U: ?Sized> Trampoline<U> {
    /// Register the runtime callback.
    pub fn new(callback: impl FnMut(Context, &mut U) + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Route every delivery through the foreign entry point registered with
    /// [`ffi::tray_bridge_register_callback`].
    ///
    /// The UI state is not visible to foreign callbacks.
    pub fn foreign() -> Self {
        Self::new(|context, _ui| ffi::forward(context))
    }

    /// Forward one context to the callback and return when it returns.
    pub fn deliver(&mut self, context: Context, ui: &mut U) {
        (self.callback)(context, ui);
    }
}
