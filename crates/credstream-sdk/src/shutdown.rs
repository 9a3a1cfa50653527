//! Fatal-error signalling.
//!
//! A malformed credential message is an integration error the hosting process
//! must not survive. The handler reports it through a [`ShutdownHook`];
//! production code installs [`ProcessExit`], tests install a recorder.

/// Exit status requested when a credential message cannot be parsed.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Receives requests to terminate the owning process.
pub trait ShutdownHook: Send + Sync {
    /// Terminate with the given exit status.
    fn request_exit(&self, code: i32);
}

/// Terminates the process immediately via [`std::process::exit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl ShutdownHook for ProcessExit {
    fn request_exit(&self, code: i32) {
        tracing::error!(code, "terminating process");
        std::process::exit(code);
    }
}
