use std::{env, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=csrc");
    println!("cargo:rerun-if-changed=include/crossthrow.h");

    if matches!(env::var("CARGO_CFG_PANIC"), Ok(v) if v == "abort") {
        println!("cargo:warning=crossthrow signals cannot pass Rust frames with panic=abort");
    }

    cc::Build::new()
        .cpp(true)
        .file("csrc/signal.cpp")
        .flag_if_supported("-fexceptions")
        .compile("crossthrow_signal");

    // Test-only frames: linked into integration tests, never into the library.
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let msvc = matches!(env::var("CARGO_CFG_TARGET_ENV"), Ok(v) if v == "msvc");
    for (name, file, cpp) in [
        ("crossthrow_harness", "csrc/harness.c", false),
        ("crossthrow_fixtures", "csrc/fixtures.cpp", true),
    ] {
        cc::Build::new()
            .cpp(cpp)
            .file(file)
            .flag_if_supported("-fexceptions")
            .cargo_metadata(false)
            .compile(name);
        let archive = if msvc {
            format!("{name}.lib")
        } else {
            format!("lib{name}.a")
        };
        println!(
            "cargo:rustc-link-arg-tests={}",
            out_dir.join(archive).display()
        );
    }
}
