//! Integer signals that unwind across the C ABI.
//!
//! [`throwFunc`](exports::throw_func) raises an integer, and [`tryFunc`](exports::try_func)
//! calls a C function pointer and catches any integer raised beneath it, even through foreign
//! frames, printing `C++: caught <value>`. Both are `extern "C-unwind"` and unmangled, declared
//! for C and C++ callers in `include/crossthrow.h`.
//!
//! A signal is a C++ `int` exception, so C++ code on either side of the boundary can throw or
//! catch it, and C++ exceptions of other types pass through `tryFunc` untouched. Rust callers
//! can use [`catch_signal`] and [`guarded_invoke`] directly. Signals can only cross Rust frames
//! when built with `panic = "unwind"`.
use once_cell::sync::OnceCell;

use crossthrow_macros::c_export;

pub mod exports;
pub mod header;
pub mod invoker;
pub mod logging;
pub mod signal;

pub use header::c_header;
pub use invoker::{guarded_invoke, CAUGHT_PREFIX};
pub use logging::LogConfig;
pub use signal::{catch_signal, raise};

static INITIALIZED: OnceCell<bool> = OnceCell::new();

/// Sets up logging from the environment. Only the first call in a process does anything.
///
/// Returns whether logging is active.
#[c_export(name = "crossthrow_initialize")]
pub extern "C-unwind" fn initialize() -> bool {
    *INITIALIZED.get_or_init(|| match logging::init(&LogConfig::from_env()) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("crossthrow: cannot initialize logging: {err:?}");
            false
        }
    })
}
