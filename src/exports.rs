//! Symbols exported to C and C++ callers.

use std::{ffi::c_int, io};

use crossthrow_macros::c_export;
use tracing::{error, warn};

use crate::{invoker::guarded_invoke, signal::raise};

/// Raises `i` as a signal (a C++ `int` exception). Never returns normally.
#[c_export(name = "throwFunc")]
pub extern "C-unwind" fn throw_func(i: c_int) -> ! {
    raise(i)
}

/// Calls `foo`, printing `C++: caught <value>` to stdout if it raises a signal.
///
/// Exceptions of any other C++ type, and Rust panics, propagate to the caller. A null `foo` is
/// ignored.
#[c_export(name = "tryFunc")]
pub extern "C-unwind" fn try_func(foo: Option<extern "C-unwind" fn()>) {
    let Some(foo) = foo else {
        warn!("tryFunc called with a null function pointer");
        return;
    };
    if let Err(err) = guarded_invoke(&mut io::stdout(), || foo()) {
        error!(%err, "cannot write caught signal to stdout");
    }
}
