//! PyBootstrap Core Library
//!
//! Building blocks for native launchers that embed CPython:
//! - Argument vector capture
//! - Build-time snippet selection and generation
//! - Bootstrap manifest parsing (used by the launcher's build script)
//! - Runtime handle and launch sequence (pyo3, optional)

pub mod argv;
pub mod config;
pub mod error;
pub mod manifest;
pub mod snippet;

#[cfg(feature = "python")]
mod launch;
#[cfg(feature = "python")]
mod runtime;

pub use argv::ArgVector;
pub use config::{ExitPolicy, LaunchConfig, SnippetOutcome, Variant};
pub use error::{LaunchError, ManifestError};
pub use manifest::{BootstrapManifest, EmbeddedBootstrap};
pub use snippet::{Snippet, FALLBACK_SOURCE};

#[cfg(feature = "python")]
pub use launch::{launch, LaunchReport};
#[cfg(feature = "python")]
pub use runtime::Runtime;
