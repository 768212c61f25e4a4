//! Argument vector
//!
//! The process command line, copied once at start-up and handed to the
//! interpreter unchanged.

use std::ffi::{CString, OsStr, OsString};

use crate::error::LaunchError;

/// Ordered list of command-line arguments, argument zero included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgVector {
    args: Vec<OsString>,
}

impl ArgVector {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Capture the current process arguments.
    pub fn from_env() -> Self {
        Self::new(std::env::args_os())
    }

    /// Argument zero, used as the interpreter's program name.
    pub fn program(&self) -> Option<&OsStr> {
        self.args.first().map(OsString::as_os_str)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(OsString::as_os_str)
    }

    /// Encode every argument as a C string for the runtime's bytes APIs.
    pub fn to_c_strings(&self) -> Result<Vec<CString>, LaunchError> {
        self.iter()
            .enumerate()
            .map(|(index, arg)| to_c_string(arg).ok_or(LaunchError::InvalidArgument { index }))
            .collect()
    }
}

/// Convert an OS string to a C string, keeping the raw bytes on unix.
///
/// Elsewhere the argument must be valid Unicode; an unencodable one is
/// rejected rather than replaced, so the runtime never sees a different
/// argument than the process received.
pub(crate) fn to_c_string(value: &OsStr) -> Option<CString> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        value.as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = value.to_str()?.as_bytes().to_vec();

    CString::new(bytes).ok()
}
