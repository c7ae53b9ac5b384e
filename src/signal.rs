//! Raising and intercepting integer signals.
//!
//! A signal is a C++ exception of type `int`, thrown and caught by the small shim in
//! `csrc/signal.cpp`. Because nothing here goes through [`std::panic::catch_unwind`], exceptions
//! of any other C++ type and Rust panics pass through [`catch_signal`] to whoever handles them,
//! and a C++ `throw 5;` is a signal just like [`raise`]`(5)`.

use std::{
    ffi::{c_int, c_void},
    ops::ControlFlow,
};

extern "C-unwind" {
    fn crossthrow_throw_int(value: c_int) -> !;
    fn crossthrow_catch_int(
        body: extern "C-unwind" fn(*mut c_void),
        data: *mut c_void,
        caught: *mut c_int,
    ) -> bool;
}

/// Raises `value` as a signal. Never returns.
pub fn raise(value: i32) -> ! {
    unsafe { crossthrow_throw_int(value) }
}

struct Frame<F, T> {
    func: Option<F>,
    ret: Option<T>,
}

extern "C-unwind" fn run_frame<F: FnOnce() -> T, T>(data: *mut c_void) {
    // data is the &mut Frame<F, T> handed to crossthrow_catch_int below
    let frame = unsafe { &mut *data.cast::<Frame<F, T>>() };
    if let Some(func) = frame.func.take() {
        frame.ret = Some(func());
    }
}

/// Runs `func`, intercepting any signal it raises.
///
/// Returns [`ControlFlow::Continue`] with the result of `func` if it returned normally, or
/// [`ControlFlow::Break`] with the signal value if it raised one. Every other unwind, Rust
/// panics included, is left to propagate.
pub fn catch_signal<F, T>(func: F) -> ControlFlow<i32, T>
where
    F: FnOnce() -> T,
{
    let mut frame = Frame {
        func: Some(func),
        ret: None,
    };
    let mut caught: c_int = 0;
    let raised = unsafe {
        crossthrow_catch_int(
            run_frame::<F, T>,
            (&mut frame as *mut Frame<F, T>).cast(),
            &mut caught,
        )
    };
    match frame.ret {
        Some(x) if !raised => ControlFlow::Continue(x),
        _ => ControlFlow::Break(caught),
    }
}
