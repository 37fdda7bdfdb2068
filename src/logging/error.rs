//! Log file failures
//!
//! None of these reach the caller. The logger turns create/open failures into an
//! Error-level line and drops stat/delete failures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogFileError {
    #[error("Failed to create file at path {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("Failed to open log file {} for writing: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Failed to read size of log file {}: {source}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("Failed to delete log file {}: {source}", path.display())]
    Delete { path: PathBuf, source: io::Error },
}

impl LogFileError {
    /// Path of the file the failed operation targeted
    pub fn path(&self) -> &PathBuf {
        match self {
            LogFileError::Create { path, .. }
            | LogFileError::Open { path, .. }
            | LogFileError::Stat { path, .. }
            | LogFileError::Delete { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_includes_path_and_cause() {
        let err = LogFileError::Create {
            path: PathBuf::from("/nope/app"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/app"));
        assert!(msg.contains("denied"));
        assert_eq!(err.path(), &PathBuf::from("/nope/app"));
    }
}
