//! Launcher and manifest error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    // Runtime bring-up
    #[error("Fatal Python error: {func}: {message}")]
    Initialization { func: String, message: String },

    #[error("Python runtime requested exit with status {code}")]
    ExitRequested { code: i32 },

    #[error("Python runtime is already initialized in this process")]
    AlreadyInitialized,

    // Argument forwarding
    #[error("Argument {index} cannot be passed to the runtime (interior NUL byte or not encodable)")]
    InvalidArgument { index: usize },

    #[error("Python error: {0}")]
    Python(String),
}

impl LaunchError {
    pub fn initialization(func: impl Into<String>, message: impl Into<String>) -> Self {
        LaunchError::Initialization {
            func: func.into(),
            message: message.into(),
        }
    }

    /// Process exit status matching what the runtime itself would use.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::ExitRequested { code } => *code,
            _ => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Bootstrap requires exactly one of source, entrypoint or execfile")]
    MissingSource,

    #[error("Bootstrap requires exactly one of source, entrypoint or execfile (found {found})")]
    ConflictingSources { found: String },

    #[error("entrypoint must be \"package.module\" or \"package.module:function\" (got '{entrypoint}')")]
    InvalidEntrypoint { entrypoint: String },

    #[error("Unknown exit status policy '{value}', expected 'always-success' or 'propagate'")]
    InvalidExitPolicy { value: String },
}

impl ManifestError {
    pub fn invalid_entrypoint(entrypoint: impl Into<String>) -> Self {
        ManifestError::InvalidEntrypoint {
            entrypoint: entrypoint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_message_matches_runtime_format() {
        let err = LaunchError::initialization("init_fs_encoding", "failed to get the Python codec");
        assert_eq!(
            err.to_string(),
            "Fatal Python error: init_fs_encoding: failed to get the Python codec"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_request_keeps_code() {
        assert_eq!(LaunchError::ExitRequested { code: 2 }.exit_code(), 2);
    }
}
