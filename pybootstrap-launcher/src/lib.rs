//! PyBootstrap Launcher
//!
//! Shared entry point of the `pybootstrap` and `pybootstrap-nosite`
//! binaries. The snippet and exit policy are fixed by `build.rs`; nothing on
//! the command line is interpreted here.

use std::io;
use std::process::ExitCode;

use pybootstrap_core::{launch, ArgVector, ExitPolicy, LaunchConfig, LaunchError, Snippet, Variant};
use tracing::{debug, Level};

mod embedded {
    use pybootstrap_core::ExitPolicy;

    include!(concat!(env!("OUT_DIR"), "/bootstrap.rs"));
}

/// Environment variable selecting the launcher's log level.
pub const LOG_ENV: &str = "PYBOOTSTRAP_LOG";

/// Snippet compiled into this launcher.
pub fn embedded_snippet() -> Snippet {
    Snippet::from_build(embedded::BOOTSTRAP_SOURCE)
}

pub fn embedded_exit_policy() -> ExitPolicy {
    embedded::EXIT_POLICY
}

/// Run the whole launch sequence and turn it into a process exit status.
pub fn run(variant: Variant) -> ExitCode {
    init_logging();

    let config =
        LaunchConfig::new(variant, embedded_snippet()).with_exit_policy(embedded_exit_policy());
    let argv = ArgVector::from_env();

    match launch(&config, &argv) {
        Ok(report) => {
            debug!("Snippet finished: {:?}, exiting with {}", report.outcome, report.exit_code);
            ExitCode::from(report.exit_code)
        }
        Err(err) => {
            debug!("Launch failed before the snippet ran: {:?}", err);
            ExitCode::from(report_startup_failure(&err))
        }
    }
}

/// Report a start-up failure the way the runtime would and pick the status.
fn report_startup_failure(err: &LaunchError) -> u8 {
    if !matches!(err, LaunchError::ExitRequested { .. }) {
        eprintln!("{}", err);
    }
    u8::try_from(err.exit_code()).unwrap_or(1)
}

fn init_logging() {
    // Logs go to stderr; stdout belongs to the snippet
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(log_level(std::env::var(LOG_ENV).ok().as_deref()))
        .init();
}

fn log_level(value: Option<&str>) -> Level {
    value
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(Level::WARN)
}
