use std::ops::ControlFlow;
use std::panic::{catch_unwind, panic_any, resume_unwind, AssertUnwindSafe};
use std::thread;

use crossthrow::exports::{throw_func, try_func};
use crossthrow::{catch_signal, guarded_invoke, raise, CAUGHT_PREFIX};

fn invoke(callable: impl FnOnce()) -> String {
    let mut out = Vec::new();
    let _flow = guarded_invoke(&mut out, callable).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn smoke() {
    assert_eq!(invoke(|| raise(42)), "C++: caught 42\n");
    assert_eq!(invoke(|| raise(-1)), "C++: caught -1\n");
    assert_eq!(invoke(|| {}), "");

    let capture = 13;
    assert_eq!(
        invoke(move || raise(capture * 100 + 42)),
        format!("{CAUGHT_PREFIX}1342\n")
    );
}

#[test]
fn every_value_round_trips() {
    for v in [i32::MIN, -1000, -1, 0, 1, 7, 1000, i32::MAX] {
        assert_eq!(invoke(|| throw_func(v)), format!("C++: caught {v}\n"));
    }
}

#[test]
fn deep_unwind() {
    #[inline(never)]
    fn nest(n: usize) {
        if n == 0 {
            raise(n as i32 + 5);
        }
        nest(n - 1);
    }

    assert_eq!(catch_signal(|| nest(20)), ControlFlow::Break(5));
}

#[test]
fn panic() {
    let mut out = Vec::new();
    let ret = catch_unwind(AssertUnwindSafe(|| {
        guarded_invoke(&mut out, || panic_any(42usize))
    }));
    assert_eq!(*ret.unwrap_err().downcast::<usize>().unwrap(), 42);

    let ret = catch_unwind(AssertUnwindSafe(|| {
        guarded_invoke(&mut out, || panic!("plain panic"))
    }));
    assert!(ret.is_err());
    assert!(out.is_empty());
}

#[test]
fn threads_are_isolated() {
    let handles = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let mut out = Vec::new();
                for _ in 0..100 {
                    let caught = guarded_invoke(&mut out, || raise(i)).unwrap();
                    assert_eq!(caught, ControlFlow::Break(i));
                    let returned = guarded_invoke(&mut out, || {}).unwrap();
                    assert_eq!(returned, ControlFlow::Continue(()));
                }
                (i, String::from_utf8(out).unwrap())
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let (i, out) = handle.join().unwrap();
        assert_eq!(out, format!("C++: caught {i}\n").repeat(100));
    }
}

extern "C-unwind" fn raise_99() {
    throw_func(99)
}

extern "C-unwind" fn raise_float() {
    resume_unwind(Box::new(1.5f64))
}

#[test]
fn exported_entry_points() {
    assert_eq!(
        catch_signal(|| try_func(Some(raise_99))),
        ControlFlow::Continue(())
    );

    let ret = catch_unwind(|| try_func(Some(raise_float)));
    assert_eq!(*ret.unwrap_err().downcast::<f64>().unwrap(), 1.5);
}

#[test]
fn initialize_once() {
    let first = crossthrow::initialize();
    assert_eq!(crossthrow::initialize(), first);
}
