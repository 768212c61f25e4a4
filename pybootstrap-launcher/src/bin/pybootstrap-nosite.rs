//! pybootstrap-nosite
//!
//! Like `pybootstrap`, but the interpreter starts without importing `site`,
//! so the snippet can adjust `sys.path` before running `site.main()` itself.

use std::process::ExitCode;

use pybootstrap_core::Variant;

fn main() -> ExitCode {
    pybootstrap_launcher::run(Variant::NoSite)
}
