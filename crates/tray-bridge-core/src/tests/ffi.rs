use crate::{
    Context, Trampoline, dispatch_channel,
    ffi::{
        TRAY_BRIDGE_ALREADY_REGISTERED, TRAY_BRIDGE_INVALID_ARGUMENT, TRAY_BRIDGE_NOT_READY,
        TRAY_BRIDGE_OK, install_dispatcher, tray_bridge_context_is_valid, tray_bridge_dispatch,
        tray_bridge_register_callback,
    },
    tests::support::CountingWaker,
};

use std::{
    ffi::c_void,
    num::NonZeroUsize,
    sync::atomic::{AtomicUsize, Ordering},
};

static LAST_CONTEXT: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn record(context: *mut c_void) {
    LAST_CONTEXT.store(context as usize, Ordering::SeqCst);
}

unsafe extern "C" fn other(_context: *mut c_void) {}

/// WHAT: The foreign trampoline forwards the context to the one registered callback
/// WHY: Foreign runtimes receive deliveries only through the stable entry point
#[test]
#[allow(clippy::unwrap_used)]
fn given_registered_foreign_callback_when_delivering_then_context_forwarded_unchanged() {
    // Given: A registered callback; later registrations are rejected
    // SAFETY: `record` accepts any pointer and never dereferences it.
    let first = unsafe { tray_bridge_register_callback(Some(record)) };
    // SAFETY: as above.
    let second = unsafe { tray_bridge_register_callback(Some(other)) };
    // SAFETY: null is rejected before anything is stored.
    let null = unsafe { tray_bridge_register_callback(None) };
    assert_eq!(first, TRAY_BRIDGE_OK);
    assert_eq!(second, TRAY_BRIDGE_ALREADY_REGISTERED);
    assert_eq!(null, TRAY_BRIDGE_INVALID_ARGUMENT);

    // When: Delivering through a foreign trampoline
    let mut trampoline = Trampoline::<()>::foreign();
    trampoline.deliver(Context::from_token(NonZeroUsize::new(0xBEEF).unwrap()), &mut ());

    // Then: The first callback saw the exact value
    assert_eq!(LAST_CONTEXT.load(Ordering::SeqCst), 0xBEEF);
}

/// WHAT: Context validity check mirrors dispatch's null rule
/// WHY: Foreign callers can pre-check without dispatching
#[test]
fn given_pointers_when_checking_validity_then_only_null_rejected() {
    let mut value = 0u8;
    assert!(!tray_bridge_context_is_valid(std::ptr::null_mut()));
    assert!(tray_bridge_context_is_valid(
        &mut value as *mut u8 as *mut c_void
    ));
}

/// WHAT: Foreign dispatch reports each failure kind and delivers accepted contexts
/// WHY: A foreign runtime has no other way to submit work to the UI thread
#[test]
#[allow(clippy::unwrap_used)]
fn given_installed_dispatcher_when_dispatching_from_c_then_codes_match_and_context_delivered() {
    let mut value = 7u8;
    let ptr = &mut value as *mut u8 as *mut c_void;

    // Given: No dispatcher installed yet
    // When/Then: Dispatch is not ready
    assert_eq!(tray_bridge_dispatch(ptr), TRAY_BRIDGE_NOT_READY);

    // Given: A dispatcher whose loop has not started
    let (dispatcher, mut receiver) = dispatch_channel(CountingWaker::default());
    assert!(install_dispatcher(dispatcher.clone()));
    assert!(!install_dispatcher(dispatcher));

    // When/Then: Dispatch is still not ready
    assert_eq!(tray_bridge_dispatch(ptr), TRAY_BRIDGE_NOT_READY);

    // Given: The loop is running
    receiver.start();

    // When: Dispatching null and then a real pointer
    let null = tray_bridge_dispatch(std::ptr::null_mut());
    let accepted = tray_bridge_dispatch(ptr);

    // Then: Null is rejected and the pointer arrives unchanged on the next pump
    assert_eq!(null, TRAY_BRIDGE_INVALID_ARGUMENT);
    assert_eq!(accepted, TRAY_BRIDGE_OK);
    let mut seen: Vec<*mut c_void> = Vec::new();
    let mut trampoline = Trampoline::new(|context: Context, seen: &mut Vec<*mut c_void>| {
        seen.push(context.as_ptr())
    });
    assert_eq!(receiver.run_pending(&mut trampoline, &mut seen).unwrap(), 1);
    assert_eq!(seen, vec![ptr]);

    // When: The loop shuts down
    receiver.shutdown();

    // Then: Foreign dispatch is refused again
    assert_eq!(tray_bridge_dispatch(ptr), TRAY_BRIDGE_NOT_READY);
}
