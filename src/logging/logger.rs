//! Leveled logger with an optional append-only log file
//!
//! Every call formats and writes on the caller's thread. State lives behind a mutex so a
//! single logger can be shared; a poisoned lock turns calls into no-ops.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

use chrono::{DateTime, Utc};

use super::app_details::AppDetails;
use super::callsite::CallSite;
use super::error::LogFileError;
use super::file_writer::{normalize_target_path, FileSystem, LogSink, StdFileSystem};
use super::level::{should_emit, LogLevel};
use crate::config::{LoggerConfig, DEFAULT_MAX_FILE_BYTES};

/// UTC timestamp format, `yyyy-MM-dd HH:mm:ss.SSS`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static SHARED: OnceLock<Logger> = OnceLock::new();

struct LoggerState {
    base_level: Option<LogLevel>,
    echo_to_console: bool,
    target_path: Option<PathBuf>,
    max_file_bytes: u64,
    /// Open log file; only set while attached
    handle: Option<Box<dyn LogSink>>,
    console: Box<dyn Write + Send>,
}

/// Leveled logger writing to the console and/or one log file
pub struct Logger {
    state: Mutex<LoggerState>,
    fs: Box<dyn FileSystem>,
    app_details: AppDetails,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create an unconfigured logger
    ///
    /// Nothing is emitted until `configure` sets a base level.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LoggerState {
                base_level: None,
                echo_to_console: true,
                target_path: None,
                max_file_bytes: DEFAULT_MAX_FILE_BYTES,
                handle: None,
                console: Box::new(io::stdout()),
            }),
            fs: Box::new(StdFileSystem),
            app_details: AppDetails::from_process(),
        }
    }

    /// Use a different file system implementation
    pub fn with_file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    /// Send console output somewhere other than stdout
    pub fn with_console(mut self, console: impl Write + Send + 'static) -> Self {
        self.state_mut().console = Box::new(console);
        self
    }

    /// Details written at the top of each new or empty log file
    pub fn with_app_details(mut self, app_details: AppDetails) -> Self {
        self.app_details = app_details;
        self
    }

    /// Process-wide logger, configured by the first call
    ///
    /// Later calls return the same instance and ignore their configuration.
    pub fn shared(config: &LoggerConfig) -> &'static Logger {
        SHARED.get_or_init(|| {
            let logger = Logger::new();
            logger.configure(config);
            logger
        })
    }

    /// The shared logger, if `shared` has been called
    pub fn try_shared() -> Option<&'static Logger> {
        SHARED.get()
    }

    fn state_mut(&mut self) -> &mut LoggerState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a configuration
    ///
    /// Any open file is closed first. With a path the logger attaches to it, without
    /// one it stays console-only.
    pub fn configure(&self, config: &LoggerConfig) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        state.base_level = config.level;
        state.echo_to_console = config.echo_to_console;
        state.max_file_bytes = config.max_file_bytes;

        match &config.path {
            Some(path) => self.attach_locked(&mut state, path),
            None => Self::detach_locked(&mut state),
        }
    }

    /// Attach to a log file, closing any file currently open
    ///
    /// The extension of `path` is dropped. A missing or empty file gets the
    /// app-details line. Failures leave the logger detached and are logged at Error.
    pub fn attach(&self, path: &Path) {
        if let Ok(mut state) = self.state.lock() {
            self.attach_locked(&mut state, path);
        }
    }

    /// Close the log file and forget its path
    pub fn detach(&self) {
        if let Ok(mut state) = self.state.lock() {
            Self::detach_locked(&mut state);
        }
    }

    fn attach_locked(&self, state: &mut LoggerState, path: &Path) {
        Self::close_handle(state);

        let path = normalize_target_path(path);
        state.target_path = Some(path.clone());

        match self.open_target(&path) {
            Ok((handle, needs_banner)) => {
                tracing::debug!(path = %path.display(), needs_banner, "Attached log file");
                state.handle = Some(handle);
                if needs_banner {
                    let details = self.app_details.to_string();
                    Self::emit(state, LogLevel::Info, &details);
                }
            }
            Err(err) => {
                tracing::warn!(
                    path = %err.path().display(),
                    error = %err,
                    "Log file unavailable, continuing without it"
                );
                Self::emit(state, LogLevel::Error, &err.to_string());
            }
        }
    }

    /// Create the file if missing and open it for append
    ///
    /// Returns the handle and whether the app-details line is still owed: the file was
    /// created by this call, or it exists but nothing has been written to it yet.
    fn open_target(&self, path: &Path) -> Result<(Box<dyn LogSink>, bool), LogFileError> {
        let mut fresh = false;
        if !self.fs.exists(path) {
            match self.fs.create_empty(path) {
                Ok(()) => fresh = true,
                // Created by someone else since the exists check
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(source) => {
                    return Err(LogFileError::Create {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            }
        }

        let open_err = |source| LogFileError::Open {
            path: path.to_path_buf(),
            source,
        };
        let mut handle = self.fs.open_append(path).map_err(open_err)?;
        let offset = handle.seek_to_end().map_err(open_err)?;

        Ok((handle, fresh || offset == 0))
    }

    fn detach_locked(state: &mut LoggerState) {
        Self::close_handle(state);
        state.target_path = None;
    }

    fn close_handle(state: &mut LoggerState) {
        if let Some(mut handle) = state.handle.take() {
            let _ = handle.flush();
            tracing::debug!(path = ?state.target_path, "Closed log file");
        }
    }

    /// Log at Debug level
    pub fn debug(&self, site: &CallSite, args: &[&dyn Display]) {
        self.leveled(LogLevel::Debug, site, args);
    }

    /// Log at Info level
    pub fn info(&self, site: &CallSite, args: &[&dyn Display]) {
        self.leveled(LogLevel::Info, site, args);
    }

    /// Log at Warning level
    pub fn warning(&self, site: &CallSite, args: &[&dyn Display]) {
        self.leveled(LogLevel::Warning, site, args);
    }

    /// Log at Error level
    pub fn error(&self, site: &CallSite, args: &[&dyn Display]) {
        self.leveled(LogLevel::Error, site, args);
    }

    fn leveled(&self, level: LogLevel, site: &CallSite, args: &[&dyn Display]) {
        if self.enabled(level) {
            self.verbose_log(&join_args(args), level, site);
        }
    }

    /// Log a message prefixed with its call site
    pub fn verbose_log(&self, message: &str, level: LogLevel, site: &CallSite) {
        if self.enabled(level) {
            self.log(&site.format_message(message), level);
        }
    }

    /// Write a timestamped line to the console and the open log file
    pub fn log(&self, message: &str, level: LogLevel) {
        if let Ok(mut state) = self.state.lock() {
            Self::emit(&mut state, level, message);
        }
    }

    fn emit(state: &mut LoggerState, level: LogLevel, message: &str) {
        if !should_emit(level, state.base_level) {
            return;
        }

        let line = format_line(Utc::now(), level, message);

        if state.echo_to_console {
            let _ = state.console.write_all(line.as_bytes());
            let _ = state.console.flush();
        }

        if let Some(handle) = state.handle.as_mut() {
            if let Err(e) = handle
                .write_all(line.as_bytes())
                .and_then(|()| handle.flush())
            {
                tracing::warn!(error = %e, path = ?state.target_path, "Failed to write log line");
            }
        }
    }

    /// Whether a message at `level` would currently be emitted
    pub fn enabled(&self, level: LogLevel) -> bool {
        should_emit(level, self.base_level())
    }

    /// Remove the log file from disk
    ///
    /// The file is closed first. Failures are ignored; the next attach recreates the file.
    pub fn delete_log_file(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        Self::close_handle(&mut state);

        if let Some(path) = state.target_path.as_deref() {
            if self.fs.exists(path) {
                if let Err(source) = self.fs.remove(path) {
                    let err = LogFileError::Delete {
                        path: path.to_path_buf(),
                        source,
                    };
                    tracing::debug!(error = %err, "Ignoring log file delete failure");
                } else {
                    tracing::debug!(path = %path.display(), "Deleted log file");
                }
            }
        }
    }

    /// Check whether the attached log file is larger than `max_file_bytes`
    ///
    /// Returns false when detached or when the size cannot be read. Nothing rotates
    /// automatically; callers decide what to do when this returns true.
    pub fn is_over_size_limit(&self) -> bool {
        let Ok(state) = self.state.lock() else {
            return false;
        };
        if state.handle.is_none() {
            return false;
        }
        let Some(path) = state.target_path.as_deref() else {
            return false;
        };

        match self.fs.file_size(path) {
            Ok(size) => size > state.max_file_bytes,
            Err(source) => {
                let err = LogFileError::Stat {
                    path: path.to_path_buf(),
                    source,
                };
                tracing::debug!(error = %err, "Size check failed");
                false
            }
        }
    }

    /// Current base level, `None` when silenced or unconfigured
    pub fn base_level(&self) -> Option<LogLevel> {
        self.state.lock().ok().and_then(|s| s.base_level)
    }

    pub fn echo_to_console(&self) -> bool {
        self.state.lock().map(|s| s.echo_to_console).unwrap_or(false)
    }

    /// Path of the log file (extension already stripped)
    pub fn target_path(&self) -> Option<PathBuf> {
        self.state.lock().ok().and_then(|s| s.target_path.clone())
    }

    /// Whether a log file is currently open
    pub fn is_attached(&self) -> bool {
        self.state
            .lock()
            .map(|s| s.handle.is_some())
            .unwrap_or(false)
    }

    pub fn max_file_bytes(&self) -> u64 {
        self.state
            .lock()
            .map(|s| s.max_file_bytes)
            .unwrap_or(DEFAULT_MAX_FILE_BYTES)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        Self::close_handle(self.state_mut());
    }
}

/// Join arguments with single spaces
pub fn join_args(args: &[&dyn Display]) -> String {
    args.iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a complete log line, including the trailing newline
pub fn format_line(now: DateTime<Utc>, level: LogLevel, message: &str) -> String {
    format!("{}: [{}] {}\n", now.format(TIMESTAMP_FORMAT), level, message)
}
