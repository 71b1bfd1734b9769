use crate::{
    BridgeError, Context, LoopState, Trampoline, dispatch_channel, tests::support::CountingWaker,
};

use std::{ffi::c_void, num::NonZeroUsize, sync::atomic::Ordering, thread};

#[allow(clippy::unwrap_used)]
fn ctx(token: usize) -> Context {
    Context::from_token(NonZeroUsize::new(token).unwrap())
}

fn recording_trampoline() -> Trampoline<Vec<usize>> {
    Trampoline::new(|context: Context, log: &mut Vec<usize>| log.push(context.token().get()))
}

/// WHAT: Two requests from one thread arrive in submission order
/// WHY: Per-submitter FIFO is the core ordering guarantee
#[test]
#[allow(clippy::unwrap_used)]
fn given_two_pointers_dispatched_before_pump_when_pumped_then_delivered_in_order() {
    // Given: A running receiver and two distinct context pointers
    let (dispatcher, mut receiver) = dispatch_channel(CountingWaker::default());
    receiver.start();
    let mut first = 1u8;
    let mut second = 2u8;
    let ptr1 = &mut first as *mut u8 as *mut c_void;
    let ptr2 = &mut second as *mut u8 as *mut c_void;

    // When: Both are dispatched before the loop processes either
    dispatcher.dispatch_ptr(ptr1).unwrap();
    dispatcher.dispatch_ptr(ptr2).unwrap();
    let mut seen: Vec<*mut c_void> = Vec::new();
    let mut trampoline = Trampoline::new(|context: Context, seen: &mut Vec<*mut c_void>| {
        seen.push(context.as_ptr())
    });

    // Then: Nothing ran inline, and the pump delivers ptr1 then ptr2 unchanged
    assert!(seen.is_empty());
    let delivered = receiver.run_pending(&mut trampoline, &mut seen).unwrap();
    assert_eq!(delivered, 2);
    assert_eq!(seen, vec![ptr1, ptr2]);
}

/// WHAT: Long single-thread sequences keep submission order
/// WHY: FIFO must hold for any sequence length, not just pairs
#[test]
#[allow(clippy::unwrap_used)]
fn given_many_dispatches_from_one_thread_when_pumped_then_order_preserved() {
    // Given: A running receiver
    let (dispatcher, mut receiver) = dispatch_channel(CountingWaker::default());
    receiver.start();

    // When: 500 requests are queued
    for token in 1..=500 {
        dispatcher.dispatch(ctx(token)).unwrap();
    }
    let mut log = Vec::new();
    receiver
        .run_pending(&mut recording_trampoline(), &mut log)
        .unwrap();

    // Then: They come out in the same order
    assert_eq!(log, (1..=500).collect::<Vec<_>>());
}

/// WHAT: Null context is rejected with InvalidArgument
/// WHY: Null must never reach the trampoline
#[test]
#[allow(clippy::unwrap_used)]
fn given_null_pointer_when_dispatching_then_invalid_argument_and_nothing_delivered() {
    // Given: A running receiver
    let waker = CountingWaker::default();
    let (dispatcher, mut receiver) = dispatch_channel(waker.clone());
    receiver.start();

    // When: Dispatching null
    let result = dispatcher.dispatch_ptr(std::ptr::null_mut());

    // Then: InvalidArgument, no wake-up, nothing delivered
    assert!(matches!(result, Err(BridgeError::InvalidArgument { .. })));
    assert_eq!(waker.wakes.load(Ordering::SeqCst), 0);
    let mut log = Vec::new();
    let delivered = receiver
        .run_pending(&mut recording_trampoline(), &mut log)
        .unwrap();
    assert_eq!(delivered, 0);
}

/// WHAT: Dispatch before the loop starts is dropped detectably
/// WHY: Degraded mode must be non-fatal but observable
#[test]
fn given_unstarted_receiver_when_dispatching_then_not_ready_and_counted() {
    // Given: A receiver that was never started
    let (dispatcher, _receiver) = dispatch_channel(CountingWaker::default());

    // When: Dispatching
    let result = dispatcher.dispatch(ctx(1));

    // Then: NotReady and the drop is counted
    assert!(matches!(result, Err(BridgeError::NotReady { .. })));
    assert_eq!(dispatcher.state(), LoopState::NotStarted);
    assert_eq!(dispatcher.dropped(), 1);
}

/// WHAT: Shutdown discards queued requests and rejects new ones
/// WHY: Nothing may be delivered after the run loop is torn down
#[test]
#[allow(clippy::unwrap_used)]
fn given_queued_requests_when_receiver_shut_down_then_discarded_and_new_rejected() {
    // Given: Two queued requests
    let (dispatcher, mut receiver) = dispatch_channel(CountingWaker::default());
    receiver.start();
    dispatcher.dispatch(ctx(1)).unwrap();
    dispatcher.dispatch(ctx(2)).unwrap();

    // When: The receiver shuts down
    let discarded = receiver.shutdown();

    // Then: Both were discarded and later dispatches fail
    assert_eq!(discarded, 2);
    assert_eq!(dispatcher.state(), LoopState::TornDown);
    assert!(matches!(
        dispatcher.dispatch(ctx(3)),
        Err(BridgeError::NotReady { .. })
    ));
    assert_eq!(dispatcher.dropped(), 3);
}

/// WHAT: Dropping the receiver tears the loop down
/// WHY: Destruction of the UI side must not leave a half-open queue
#[test]
fn given_dropped_receiver_when_dispatching_then_not_ready() {
    // Given: A started receiver that is then dropped
    let (dispatcher, mut receiver) = dispatch_channel(CountingWaker::default());
    receiver.start();
    drop(receiver);

    // When/Then: Dispatch fails with NotReady
    assert!(matches!(
        dispatcher.dispatch(ctx(1)),
        Err(BridgeError::NotReady { .. })
    ));
}

/// WHAT: A request dispatched from inside a callback waits for the next pump
/// WHY: No stack-recursive reentry into UI-mutating code
#[test]
#[allow(clippy::unwrap_used)]
fn given_dispatch_from_ui_callback_when_pumped_then_runs_on_next_pump() {
    // Given: A callback that dispatches token 2 when it sees token 1
    let (dispatcher, mut receiver) = dispatch_channel(CountingWaker::default());
    receiver.start();
    let inner = dispatcher.clone();
    let mut trampoline = Trampoline::new(move |context: Context, log: &mut Vec<usize>| {
        log.push(context.token().get());
        if context.token().get() == 1 {
            inner.dispatch(ctx(2)).unwrap();
        }
    });
    dispatcher.dispatch(ctx(1)).unwrap();

    // When: Pumping once
    let mut log = Vec::new();
    let first = receiver.run_pending(&mut trampoline, &mut log).unwrap();

    // Then: Only the original ran; the nested one runs on the next pump
    assert_eq!(first, 1);
    assert_eq!(log, vec![1]);
    let second = receiver.run_pending(&mut trampoline, &mut log).unwrap();
    assert_eq!(second, 1);
    assert_eq!(log, vec![1, 2]);
}

/// WHAT: The same context submitted twice is delivered twice, in order
/// WHY: Requests are never coalesced by identity
#[test]
#[allow(clippy::unwrap_used)]
fn given_same_context_twice_when_pumped_then_delivered_twice() {
    // Given: Token 7 then token 9 then token 7 again
    let (dispatcher, mut receiver) = dispatch_channel(CountingWaker::default());
    receiver.start();
    dispatcher.dispatch(ctx(7)).unwrap();
    dispatcher.dispatch(ctx(9)).unwrap();
    dispatcher.dispatch(ctx(7)).unwrap();

    // When: Pumping
    let mut log = Vec::new();
    receiver
        .run_pending(&mut recording_trampoline(), &mut log)
        .unwrap();

    // Then: All three arrive
    assert_eq!(log, vec![7, 9, 7]);
}

/// WHAT: Concurrent producers each keep their own order
/// WHY: Per-thread FIFO must hold under contention
#[test]
#[allow(clippy::unwrap_used)]
fn given_concurrent_producers_when_pumped_then_each_thread_order_preserved() {
    // Given: Four producer threads, 250 requests each
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: usize = 250;
    let (dispatcher, mut receiver) = dispatch_channel(CountingWaker::default());
    receiver.start();

    // When: All producers dispatch concurrently
    thread::scope(|scope| {
        for producer in 0..PRODUCERS {
            let dispatcher = dispatcher.clone();
            scope.spawn(move || {
                for seq in 0..PER_PRODUCER {
                    let token = (producer + 1) * 10_000 + seq;
                    dispatcher.dispatch(ctx(token)).unwrap();
                }
            });
        }
    });
    let mut log = Vec::new();
    receiver
        .run_pending(&mut recording_trampoline(), &mut log)
        .unwrap();

    // Then: Nothing lost, and each producer's subsequence is ascending
    assert_eq!(log.len(), PRODUCERS * PER_PRODUCER);
    for producer in 1..=PRODUCERS {
        let mine: Vec<usize> = log
            .iter()
            .copied()
            .filter(|token| token / 10_000 == producer)
            .map(|token| token % 10_000)
            .collect();
        assert_eq!(mine, (0..PER_PRODUCER).collect::<Vec<_>>());
    }
}

/// WHAT: Every accepted dispatch wakes the run loop
/// WHY: A queued request with no wake-up would sit undelivered
#[test]
#[allow(clippy::unwrap_used)]
fn given_running_receiver_when_dispatching_then_loop_woken_each_time() {
    // Given: A counting waker
    let waker = CountingWaker::default();
    let (dispatcher, mut receiver) = dispatch_channel(waker.clone());
    receiver.start();

    // When: Three dispatches
    for token in 1..=3 {
        dispatcher.dispatch(ctx(token)).unwrap();
    }

    // Then: Three wake-ups
    assert_eq!(waker.wakes.load(Ordering::SeqCst), 3);
}

/// WHAT: A dead run loop turns dispatch into NotReady and tears down
/// WHY: The toolkit refusing wake-ups means nothing will ever be delivered
#[test]
fn given_closed_run_loop_when_dispatching_then_not_ready_and_torn_down() {
    // Given: A waker whose loop has gone away
    let waker = CountingWaker::default();
    let (dispatcher, mut receiver) = dispatch_channel(waker.clone());
    receiver.start();
    waker.closed.store(true, Ordering::SeqCst);

    // When: Dispatching
    let result = dispatcher.dispatch(ctx(1));

    // Then: NotReady, torn down, request counted as dropped
    assert!(matches!(result, Err(BridgeError::NotReady { .. })));
    assert_eq!(dispatcher.state(), LoopState::TornDown);
    assert_eq!(dispatcher.dropped(), 1);
}

/// WHAT: Pumping from a non-UI thread delivers nothing
/// WHY: Callbacks must run strictly on the UI thread
#[test]
#[allow(clippy::unwrap_used)]
fn given_queued_request_when_pumped_off_ui_thread_then_off_ui_thread_error() {
    // Given: A request queued on a receiver bound to this thread
    let (dispatcher, mut receiver) = dispatch_channel(CountingWaker::default());
    receiver.start();
    dispatcher.dispatch(ctx(1)).unwrap();

    // When: Another thread tries to pump
    let result = thread::scope(|scope| {
        scope
            .spawn(|| {
                let mut log = Vec::new();
                receiver.run_pending(&mut recording_trampoline(), &mut log)
            })
            .join()
            .unwrap()
    });

    // Then: Rejected, and the request is still delivered on the UI thread
    assert!(matches!(result, Err(BridgeError::OffUiThread { .. })));
    let mut log = Vec::new();
    receiver
        .run_pending(&mut recording_trampoline(), &mut log)
        .unwrap();
    assert_eq!(log, vec![1]);
}

/// WHAT: A shut-down receiver cannot be started again
/// WHY: Once the run loop is gone, accepting requests would strand them
#[test]
fn given_shut_down_receiver_when_started_again_then_stays_torn_down() {
    // Given: A receiver that ran and was shut down
    let (dispatcher, mut receiver) = dispatch_channel(CountingWaker::default());
    receiver.start();
    receiver.shutdown();

    // When: Starting it again
    receiver.start();

    // Then: The loop stays torn down and dispatch is refused
    assert_eq!(receiver.state(), LoopState::TornDown);
    assert!(matches!(
        dispatcher.dispatch(ctx(1)),
        Err(BridgeError::NotReady { .. })
    ));
}
