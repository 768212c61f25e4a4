//! Embedded CPython runtime
//!
//! Scoped handle over the process-wide interpreter. Creating a [`Runtime`]
//! brings the interpreter up; dropping it finalizes it.

use std::ffi::{c_char, CStr, OsStr};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use pyo3::ffi;
use pyo3::prelude::*;
use pyo3::types::PyList;

use crate::argv::{to_c_string, ArgVector};
use crate::config::{SnippetOutcome, Variant};
use crate::error::LaunchError;
use crate::snippet::Snippet;

/// Set once the interpreter has been brought up. It cannot be brought up a
/// second time in the same process.
static STARTED: AtomicBool = AtomicBool::new(false);

/// Owner of the initialized interpreter.
///
/// The thread that creates the handle keeps the GIL for the handle's whole
/// lifetime, so the handle is neither `Send` nor `Sync`.
pub struct Runtime {
    _not_send: PhantomData<*mut ()>,
}

impl Runtime {
    /// Bring the interpreter up for `variant`.
    ///
    /// The program name is taken from argument zero. For [`Variant::NoSite`]
    /// the automatic `site` import is disabled and `argv` is installed in
    /// bulk as part of the runtime configuration, without deriving a
    /// `sys.path` entry from it.
    ///
    /// Configuration errors are returned. A failure of the start-up itself is
    /// fatal and ends the process through the runtime's own reporting, the
    /// same as a plain `Py_Initialize`.
    pub fn initialize(variant: Variant, argv: &ArgVector) -> Result<Self, LaunchError> {
        if unsafe { ffi::Py_IsInitialized() } != 0 {
            return Err(LaunchError::AlreadyInitialized);
        }
        if STARTED.swap(true, Ordering::SeqCst) {
            return Err(LaunchError::AlreadyInitialized);
        }

        let result = Self::bring_up(variant, argv);
        if result.is_err() {
            STARTED.store(false, Ordering::SeqCst);
        }
        result
    }

    fn bring_up(variant: Variant, argv: &ArgVector) -> Result<Self, LaunchError> {
        let mut config = RuntimeConfig::new();
        config.disable_argv_parsing();
        if variant.suppresses_site() {
            config.disable_site_import();
        }
        if let Some(program) = argv.program() {
            config.set_program_name(program)?;
        }
        if variant == Variant::NoSite {
            config.set_argv(argv)?;
        }

        debug!("Initializing Python runtime ({:?})", variant);
        // SAFETY: the config was initialized by PyConfig_InitPythonConfig and
        // outlives the call.
        unsafe {
            let status = ffi::Py_InitializeFromConfig(config.as_ptr());
            // PyStatus is plain data; the bitwise copy leaves `status` usable.
            if ffi::PyStatus_Exception(ptr::read(&status)) != 0 {
                ffi::Py_ExitStatusException(status);
            }
        }

        Ok(Self {
            _not_send: PhantomData,
        })
    }

    /// Replace `sys.argv` with a list built from `argv`, one element at a time.
    pub fn bind_argv(&self, argv: &ArgVector) -> Result<(), LaunchError> {
        Python::with_gil(|py| -> PyResult<()> {
            let list = PyList::empty_bound(py);
            for arg in argv.iter() {
                list.append(arg)?;
            }
            py.import_bound("sys")?.setattr("argv", list)?;
            Ok(())
        })
        .map_err(|err| LaunchError::Python(err.to_string()))
    }

    /// Execute `snippet` in `__main__`, discarding its result.
    ///
    /// An unhandled exception is reported by the interpreter's default
    /// handler. `SystemExit` therefore ends the process the way it would in
    /// any other embedding.
    pub fn run(&self, snippet: &Snippet) -> SnippetOutcome {
        Python::with_gil(|py| match py.run_bound(snippet.source(), None, None) {
            Ok(()) => SnippetOutcome::Completed,
            Err(err) => {
                err.print(py);
                SnippetOutcome::Raised
            }
        })
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        debug!("Finalizing Python runtime");
        // SAFETY: the interpreter was initialized by this handle and the
        // current thread still holds the GIL.
        let status = unsafe { ffi::Py_FinalizeEx() };
        if status != 0 {
            warn!("Python runtime failed to flush buffered data while finalizing");
        }
    }
}

/// `PyConfig` that is cleared when dropped.
struct RuntimeConfig {
    config: ffi::PyConfig,
}

impl RuntimeConfig {
    fn new() -> Self {
        let mut config = MaybeUninit::<ffi::PyConfig>::uninit();
        // SAFETY: PyConfig_InitPythonConfig fully initializes the struct.
        unsafe {
            ffi::PyConfig_InitPythonConfig(config.as_mut_ptr());
            Self {
                config: config.assume_init(),
            }
        }
    }

    fn as_ptr(&self) -> *const ffi::PyConfig {
        &self.config
    }

    /// Forwarded arguments are never read as interpreter options.
    fn disable_argv_parsing(&mut self) {
        self.config.parse_argv = 0;
    }

    fn disable_site_import(&mut self) {
        self.config.site_import = 0;
    }

    fn set_program_name(&mut self, program: &OsStr) -> Result<(), LaunchError> {
        let name = to_c_string(program).ok_or(LaunchError::InvalidArgument { index: 0 })?;
        let config: *mut ffi::PyConfig = &mut self.config;
        // SAFETY: both pointers refer to the live config; the string is copied.
        check_status(unsafe {
            ffi::PyConfig_SetBytesString(
                config,
                ptr::addr_of_mut!((*config).program_name),
                name.as_ptr(),
            )
        })
    }

    fn set_argv(&mut self, argv: &ArgVector) -> Result<(), LaunchError> {
        let args = argv.to_c_strings()?;
        let mut pointers: Vec<*const c_char> = args.iter().map(|arg| arg.as_ptr()).collect();
        // SAFETY: `pointers` borrows from `args`, both alive for the call; the
        // runtime copies every string.
        check_status(unsafe {
            ffi::PyConfig_SetBytesArgv(
                &mut self.config,
                pointers.len() as ffi::Py_ssize_t,
                pointers.as_mut_ptr().cast(),
            )
        })
    }
}

impl Drop for RuntimeConfig {
    fn drop(&mut self) {
        unsafe { ffi::PyConfig_Clear(&mut self.config) }
    }
}

fn check_status(status: ffi::PyStatus) -> Result<(), LaunchError> {
    let func = status.func;
    let err_msg = status.err_msg;
    let exitcode = status.exitcode;

    if unsafe { ffi::PyStatus_Exception(status) } == 0 {
        return Ok(());
    }
    if err_msg.is_null() {
        return Err(LaunchError::ExitRequested { code: exitcode });
    }
    Err(LaunchError::initialization(lossy(func), lossy(err_msg)))
}

fn lossy(value: *const c_char) -> String {
    if value.is_null() {
        return String::from("<unknown>");
    }
    // SAFETY: PyStatus strings are static, NUL-terminated C strings.
    unsafe { CStr::from_ptr(value) }.to_string_lossy().into_owned()
}
