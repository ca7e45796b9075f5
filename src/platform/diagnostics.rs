// Platkit - platform/diagnostics.rs
//
// Dual-destination diagnostic writer and the single fatal-error exit path.
//
// State machine:
//   Normal --fatal--> ErrorInProgress --(hook returns | fatal again)--> Terminated
//
// The shutdown hook runs only on the Normal -> ErrorInProgress transition, so
// a fatal error raised from inside the hook can never re-enter it.
//
// Single-threaded: interior mutability is Cell/RefCell, so the type is !Sync.

use crate::util::constants::{EXIT_FAILURE, RECURSIVE_ERROR_MARKER};
use crate::util::error::{PlatkitError, Result};
use std::cell::{Cell, RefCell};
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::Path;

/// Application teardown invoked on the first fatal error.
pub type ShutdownHook = Box<dyn FnOnce(&Diagnostics)>;

/// Where the fatal path currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalState {
    /// No fatal error has been reported.
    Normal,
    /// The first fatal error is being handled (shutdown hook running).
    ErrorInProgress,
    /// The exit routine has been (or is being) called.
    Terminated,
}

/// Diagnostic context: the optional log file and the fatal-error state.
pub struct Diagnostics {
    log_file: RefCell<Option<LineWriter<File>>>,
    state: Cell<FatalState>,
    shutdown_hook: RefCell<Option<ShutdownHook>>,
    error_stream: RefCell<Box<dyn Write>>,
    exit: fn(i32) -> !,
}

impl Diagnostics {
    /// Context writing fatal messages to stderr and exiting the process.
    pub fn new() -> Self {
        Self {
            log_file: RefCell::new(None),
            state: Cell::new(FatalState::Normal),
            shutdown_hook: RefCell::new(None),
            error_stream: RefCell::new(Box::new(io::stderr())),
            exit: std::process::exit,
        }
    }

    /// Install the teardown routine run on the first fatal error.
    pub fn with_shutdown_hook(self, hook: impl FnOnce(&Diagnostics) + 'static) -> Self {
        *self.shutdown_hook.borrow_mut() = Some(Box::new(hook));
        self
    }

    /// Replace the error stream (stderr by default).
    pub fn with_error_stream(self, stream: impl Write + 'static) -> Self {
        *self.error_stream.borrow_mut() = Box::new(stream);
        self
    }

    /// Replace the routine that ends the process (`std::process::exit` by default).
    pub fn with_exit(mut self, exit: fn(i32) -> !) -> Self {
        self.exit = exit;
        self
    }

    pub fn state(&self) -> FatalState {
        self.state.get()
    }

    pub fn is_log_open(&self) -> bool {
        self.log_file.borrow().is_some()
    }

    /// Open `path` for appending, line-buffered. Any previously open log is
    /// flushed and closed first, so at most one log target is active.
    pub fn open_log(&self, path: &Path) -> Result<()> {
        self.close_log();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| PlatkitError::Io {
                path: path.to_path_buf(),
                operation: "open diagnostic log",
                source,
            })?;

        *self.log_file.borrow_mut() = Some(LineWriter::new(file));
        tracing::debug!(path = %path.display(), "Diagnostic log opened");
        Ok(())
    }

    /// Flush and close the log file. No-op when none is open.
    pub fn close_log(&self) {
        if let Some(mut writer) = self.log_file.borrow_mut().take() {
            if let Err(e) = writer.flush() {
                tracing::warn!(error = %e, "Failed to flush diagnostic log on close");
            }
            tracing::debug!("Diagnostic log closed");
        }
    }

    /// Append `message` verbatim to the log file, if one is open.
    ///
    /// Never fails and never writes to the error stream.
    pub fn log(&self, message: &str) {
        if let Some(writer) = self.log_file.borrow_mut().as_mut() {
            if let Err(e) = writer.write_all(message.as_bytes()) {
                tracing::warn!(error = %e, "Failed to write diagnostic log");
            }
        }
    }

    /// Report an unrecoverable error and end the process.
    ///
    /// The message goes to the error stream and, when open, the log file.
    /// On the first call the shutdown hook runs once; any later call (from
    /// inside the hook or otherwise) records the recursive-error marker and
    /// exits at once with `EXIT_FAILURE`.
    pub fn fatal(&self, message: &str) -> ! {
        self.write_error(message);
        self.log(message);

        match self.state.get() {
            FatalState::Normal => {
                self.state.set(FatalState::ErrorInProgress);
                // Released before the call: the hook may log or fail again.
                let hook = self.shutdown_hook.borrow_mut().take();
                if let Some(hook) = hook {
                    tracing::debug!("Fatal error: running shutdown hook");
                    hook(self);
                }
                self.terminate()
            }
            FatalState::ErrorInProgress | FatalState::Terminated => {
                self.log(RECURSIVE_ERROR_MARKER);
                self.terminate()
            }
        }
    }

    fn write_error(&self, message: &str) {
        let mut stream = self.error_stream.borrow_mut();
        // Nothing left to report to if the error stream itself fails.
        let _ = stream.write_all(message.as_bytes());
        let _ = stream.flush();
    }

    fn terminate(&self) -> ! {
        self.state.set(FatalState::Terminated);
        if let Some(writer) = self.log_file.borrow_mut().as_mut() {
            let _ = writer.flush();
        }
        (self.exit)(EXIT_FAILURE)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("state", &self.state.get())
            .field("log_open", &self.is_log_open())
            .field("hook_pending", &self.shutdown_hook.borrow().is_some())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_log_without_file_is_silent() {
        let (diag, err) = test_diagnostics();
        diag.log("nobody hears this\n");
        assert!(err.contents().is_empty());
        assert_eq!(diag.state(), FatalState::Normal);
    }

    #[test]
    fn test_log_appends_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diag.log");
        std::fs::write(&path, "existing\n").unwrap();

        let (diag, _) = test_diagnostics();
        diag.open_log(&path).unwrap();
        assert!(diag.is_log_open());
        diag.log("first line\n");
        diag.log("second ");
        diag.log("line\n");
        diag.close_log();
        assert!(!diag.is_log_open());
        diag.close_log();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing\nfirst line\nsecond line\n");
    }

    #[test]
    fn test_open_log_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (diag, _) = test_diagnostics();
        let result = diag.open_log(&dir.path().join("no/such/dir/diag.log"));
        assert!(matches!(result, Err(PlatkitError::Io { .. })));
        assert!(!diag.is_log_open());
    }

    #[test]
    fn test_fatal_without_hook_exits_with_failure() {
        let (diag, err) = test_diagnostics();
        let code = expect_exit(|| diag.fatal("boom\n"));
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(err.contents(), "boom\n");
        assert_eq!(diag.state(), FatalState::Terminated);
    }

    #[test]
    fn test_fatal_runs_hook_once() {
        let calls = Rc::new(Cell::new(0u32));
        let seen_state = Rc::new(Cell::new(FatalState::Normal));
        let (diag, _) = test_diagnostics();
        let diag = {
            let calls = Rc::clone(&calls);
            let seen_state = Rc::clone(&seen_state);
            diag.with_shutdown_hook(move |d| {
                calls.set(calls.get() + 1);
                seen_state.set(d.state());
            })
        };

        expect_exit(|| diag.fatal("first\n"));
        assert_eq!(calls.get(), 1);
        assert_eq!(seen_state.get(), FatalState::ErrorInProgress);

        // A later fatal call takes the recursive path; the hook is gone.
        expect_exit(|| diag.fatal("second\n"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_fatal_inside_hook_is_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diag.log");
        let calls = Rc::new(Cell::new(0u32));

        let (diag, err) = test_diagnostics();
        let diag = {
            let calls = Rc::clone(&calls);
            diag.with_shutdown_hook(move |d| {
                calls.set(calls.get() + 1);
                d.log("shutting down\n");
                d.fatal("teardown failed\n");
            })
        };
        diag.open_log(&path).unwrap();

        let code = expect_exit(|| diag.fatal("original failure\n"));
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(calls.get(), 1);
        assert_eq!(diag.state(), FatalState::Terminated);
        assert_eq!(err.contents(), "original failure\nteardown failed\n");

        diag.close_log();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            format!("original failure\nshutting down\nteardown failed\n{RECURSIVE_ERROR_MARKER}")
        );
    }
}
