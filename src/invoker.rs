use std::{
    io::{self, Write},
    ops::ControlFlow,
};

use tracing::debug;

use crate::signal::catch_signal;

/// Text written in front of every intercepted signal value.
pub const CAUGHT_PREFIX: &str = "C++: caught ";

/// Invokes `callable` once and reports any signal it raises to `out`.
///
/// A normal return writes nothing. An intercepted signal `v` writes the line `C++: caught v`
/// and is not propagated further, even if writing the line fails. Unwinds of any other C++
/// exception type, and Rust panics, pass straight through to the caller with nothing written.
pub fn guarded_invoke<W, F>(out: &mut W, callable: F) -> io::Result<ControlFlow<i32>>
where
    W: Write + ?Sized,
    F: FnOnce(),
{
    let flow = catch_signal(callable);
    if let ControlFlow::Break(value) = flow {
        debug!(value, "caught signal");
        // single write so concurrent callers never interleave within a line
        out.write_all(format!("{CAUGHT_PREFIX}{value}\n").as_bytes())?;
        out.flush()?;
    }
    Ok(flow)
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

    use super::*;
    use crate::signal::raise;

    fn invoke(callable: impl FnOnce()) -> (ControlFlow<i32>, String) {
        let mut out = Vec::new();
        let flow = guarded_invoke(&mut out, callable).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn scenarios() {
        assert_eq!(
            invoke(|| raise(42)),
            (ControlFlow::Break(42), "C++: caught 42\n".to_string())
        );
        assert_eq!(
            invoke(|| raise(-1)),
            (ControlFlow::Break(-1), "C++: caught -1\n".to_string())
        );
        assert_eq!(invoke(|| {}), (ControlFlow::Continue(()), String::new()));
    }

    #[test]
    fn repeated_calls_are_independent() {
        let mut out = Vec::new();
        for _ in 0..2 {
            let flow = guarded_invoke(&mut out, || raise(7)).unwrap();
            assert_eq!(flow, ControlFlow::Break(7));
        }
        assert_eq!(out, b"C++: caught 7\nC++: caught 7\n");
    }

    #[test]
    fn foreign_payload_writes_nothing() {
        let mut out = Vec::new();
        let ret = catch_unwind(AssertUnwindSafe(|| {
            guarded_invoke(&mut out, || resume_unwind(Box::new(String::from("nope"))))
        }));
        assert_eq!(*ret.unwrap_err().downcast::<String>().unwrap(), "nope");
        assert!(out.is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_reported_not_raised() {
        let err = guarded_invoke(&mut BrokenPipe, || raise(3)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
