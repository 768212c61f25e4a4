//! Launch configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;
use crate::snippet::Snippet;

/// How the launcher prepares the interpreter before running the snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Build `sys.argv` element by element after start-up; `site` runs as usual.
    #[default]
    ListBinding,
    /// Disable the automatic `site` import and install argv through the
    /// runtime configuration without touching `sys.path`.
    NoSite,
}

impl Variant {
    pub fn suppresses_site(self) -> bool {
        matches!(self, Variant::NoSite)
    }
}

/// Mapping from the snippet outcome to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitPolicy {
    /// Exit 0 whatever the snippet did.
    #[default]
    AlwaysSuccess,
    /// Exit 1 when the snippet raised.
    Propagate,
}

impl ExitPolicy {
    pub fn exit_code(self, outcome: SnippetOutcome) -> u8 {
        match (self, outcome) {
            (ExitPolicy::Propagate, SnippetOutcome::Raised) => 1,
            _ => 0,
        }
    }
}

impl FromStr for ExitPolicy {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "always-success" => Ok(ExitPolicy::AlwaysSuccess),
            "propagate" => Ok(ExitPolicy::Propagate),
            other => Err(ManifestError::InvalidExitPolicy {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitPolicy::AlwaysSuccess => f.write_str("always-success"),
            ExitPolicy::Propagate => f.write_str("propagate"),
        }
    }
}

/// Whether the snippet ran to completion or left an exception unhandled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetOutcome {
    Completed,
    Raised,
}

/// Everything the launch sequence needs besides the argument vector.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub variant: Variant,
    pub exit_policy: ExitPolicy,
    pub snippet: Snippet,
}

impl LaunchConfig {
    pub fn new(variant: Variant, snippet: Snippet) -> Self {
        Self {
            variant,
            exit_policy: ExitPolicy::default(),
            snippet,
        }
    }

    pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
        self.exit_policy = exit_policy;
        self
    }
}
