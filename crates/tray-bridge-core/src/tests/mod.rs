mod dispatch;
mod ffi;
mod support;
