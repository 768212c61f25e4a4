//! Launch sequence
//!
//! initialize → install argv → run snippet → finalize → exit status.

use log::{debug, info};

use crate::argv::ArgVector;
use crate::config::{LaunchConfig, SnippetOutcome, Variant};
use crate::error::LaunchError;
use crate::runtime::Runtime;

/// Result of a completed launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchReport {
    pub outcome: SnippetOutcome,
    /// Status the process should exit with, per the exit policy
    pub exit_code: u8,
}

/// Run `config.snippet` in a freshly initialized interpreter that sees `argv`
/// as `sys.argv`.
///
/// Errors are only returned for failures before the snippet starts. The
/// interpreter is finalized on every path once it has been brought up.
pub fn launch(config: &LaunchConfig, argv: &ArgVector) -> Result<LaunchReport, LaunchError> {
    debug!(
        "Launching {:?} with {} argument(s), exit policy {}",
        config.variant,
        argv.len(),
        config.exit_policy
    );

    let runtime = Runtime::initialize(config.variant, argv)?;
    if config.variant == Variant::ListBinding {
        runtime.bind_argv(argv)?;
    }

    let outcome = runtime.run(&config.snippet);
    drop(runtime);

    if outcome == SnippetOutcome::Raised {
        info!("Embedded snippet raised an unhandled exception");
    }

    Ok(LaunchReport {
        outcome,
        exit_code: config.exit_policy.exit_code(outcome),
    })
}
