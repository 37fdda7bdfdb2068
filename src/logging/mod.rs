//! Logging system for trail
//!
//! Provides a leveled logger that writes timestamped lines to the console and an
//! optional append-only log file, plus the call-site and process details that go
//! into those lines.

mod app_details;
mod callsite;
mod error;
mod file_writer;
mod level;
mod logger;

pub use app_details::AppDetails;
#[doc(hidden)]
pub use callsite::function_name;
pub use callsite::CallSite;
pub use error::LogFileError;
pub use file_writer::{normalize_target_path, FileSystem, LogSink, StdFileSystem};
pub use level::{should_emit, LogLevel, ParseLevelError};
pub use logger::{format_line, join_args, Logger, TIMESTAMP_FORMAT};
