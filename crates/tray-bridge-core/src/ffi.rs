//! C ABI surface for runtimes that link the bridge as a foreign library.
//!
//! The runtime registers one callback. Every delivery reaches it through
//! [`tray_bridge_trampoline`], a uniquely named forwarder that lives in this
//! module only, so the runtime's own binding layer never has to export a
//! symbol the toolkit also binds.
//!
//! The native host that owns the run loop calls [`install_dispatcher`] once
//! and pumps its receiver with [`Trampoline::foreign`](crate::Trampoline::foreign).
//! The runtime then submits contexts with [`tray_bridge_dispatch`].

use crate::{BridgeError, Context, Dispatcher};

use std::{
    ffi::{c_int, c_void},
    sync::OnceLock,
};

use tracing::{debug, info, warn};

/// Call succeeded.
pub const TRAY_BRIDGE_OK: c_int = 0;
/// A callback was already registered; the first one stays in effect.
pub const TRAY_BRIDGE_ALREADY_REGISTERED: c_int = 1;
/// Null callback or null context.
pub const TRAY_BRIDGE_INVALID_ARGUMENT: c_int = -1;
/// No dispatcher installed, or the run loop is not running.
pub const TRAY_BRIDGE_NOT_READY: c_int = -2;

/// Signature of the runtime's dispatch callback.
pub type ForeignCallback = unsafe extern "C" fn(context: *mut c_void);

static CALLBACK: OnceLock<ForeignCallback> = OnceLock::new();
static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();

/// Make `dispatcher` the target of [`tray_bridge_dispatch`].
///
/// Returns `false` when a dispatcher is already installed; the first one
/// stays in effect.
pub fn install_dispatcher(dispatcher: Dispatcher) -> bool {
    match DISPATCHER.set(dispatcher) {
        Ok(()) => {
            info!("Foreign dispatch entry point installed");
            true
        }
        Err(_) => {
            warn!("Dispatcher already installed for foreign callers");
            false
        }
    }
}

/// Register the runtime's single dispatch callback.
///
/// Returns [`TRAY_BRIDGE_OK`], [`TRAY_BRIDGE_INVALID_ARGUMENT`] for a null
/// callback or [`TRAY_BRIDGE_ALREADY_REGISTERED`].
///
/// # Safety
///
/// `callback` must be safe to call on the UI thread with any context
/// pointer the runtime passes to the dispatcher.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tray_bridge_register_callback(callback: Option<ForeignCallback>) -> c_int {
    let Some(callback) = callback else {
        warn!("Rejected null dispatch callback");
        return TRAY_BRIDGE_INVALID_ARGUMENT;
    };

    match CALLBACK.set(callback) {
        Ok(()) => {
            info!("Foreign dispatch callback registered");
            TRAY_BRIDGE_OK
        }
        Err(_) => {
            warn!("Dispatch callback already registered");
            TRAY_BRIDGE_ALREADY_REGISTERED
        }
    }
}

/// Schedule `context` for delivery to the registered callback on the UI
/// thread. Returns before the callback runs.
///
/// Returns [`TRAY_BRIDGE_OK`], [`TRAY_BRIDGE_INVALID_ARGUMENT`] for null or
/// [`TRAY_BRIDGE_NOT_READY`] when no dispatcher is installed or the run loop
/// is not running.
#[unsafe(no_mangle)]
pub extern "C" fn tray_bridge_dispatch(context: *mut c_void) -> c_int {
    let Some(dispatcher) = DISPATCHER.get() else {
        debug!(?context, "Dispatch with no installed dispatcher");
        return TRAY_BRIDGE_NOT_READY;
    };

    match dispatcher.dispatch_ptr(context) {
        Ok(()) => TRAY_BRIDGE_OK,
        Err(BridgeError::InvalidArgument { .. }) => TRAY_BRIDGE_INVALID_ARGUMENT,
        Err(_) => TRAY_BRIDGE_NOT_READY,
    }
}

/// Forward `context` unchanged to the registered callback.
#[unsafe(no_mangle)]
pub extern "C" fn tray_bridge_trampoline(context: *mut c_void) {
    match CALLBACK.get() {
        // SAFETY: the registrar guaranteed the callback accepts any
        // submitted context on the UI thread.
        Some(callback) => unsafe { callback(context) },
        None => warn!(?context, "Delivery with no registered callback"),
    }
}

/// Whether `context` would be accepted by the dispatcher.
#[unsafe(no_mangle)]
pub extern "C" fn tray_bridge_context_is_valid(context: *mut c_void) -> bool {
    !context.is_null()
}

pub(crate) fn forward(context: Context) {
    tray_bridge_trampoline(context.as_ptr());
}
