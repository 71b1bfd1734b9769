mod context;
mod dispatcher;
mod registry;
mod trampoline;

pub use {
    context::Context,
    dispatcher::{DispatchReceiver, Dispatcher, LoopState, UiWaker, dispatch_channel},
    registry::{MainThread, TaskRegistry, UiTask},
    trampoline::Trampoline,
};
