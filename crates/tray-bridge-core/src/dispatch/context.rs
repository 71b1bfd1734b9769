use crate::{BridgeError, CoreResult};

use std::{ffi::c_void, fmt, num::NonZeroUsize, panic::Location};

use error_location::ErrorLocation;

/// Opaque identity carried by a dispatch request.
///
/// The bridge never interprets the value. It only guarantees the trampoline
/// sees the exact address the caller submitted.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context(NonZeroUsize);

impl Context {
    /// Wrap a raw context pointer, rejecting null.
    #[track_caller]
    pub fn from_ptr(ptr: *mut c_void) -> CoreResult<Self> {
        NonZeroUsize::new(ptr as usize)
            .map(Self)
            .ok_or_else(|| BridgeError::InvalidArgument {
                reason: "dispatch context must not be null".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Build a context from a non-zero token.
    pub fn from_token(token: NonZeroUsize) -> Self {
        Self(token)
    }

    /// The original pointer value, unchanged.
    pub fn as_ptr(self) -> *mut c_void {
        self.0.get() as *mut c_void
    }

    /// The context as an integer token.
    pub fn token(self) -> NonZeroUsize {
        self.0
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Context({:#x})", self.0)
    }
}
