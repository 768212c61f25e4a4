//! pybootstrap
//!
//! Embeds CPython, binds `sys.argv` to the process arguments and runs the
//! snippet compiled into this binary.

use std::process::ExitCode;

use pybootstrap_core::Variant;

fn main() -> ExitCode {
    pybootstrap_launcher::run(Variant::ListBinding)
}
