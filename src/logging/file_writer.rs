//! File access for the logger
//!
//! The logger only needs a handful of file operations. They sit behind the
//! `FileSystem` trait so the attach/detach state machine can be exercised against
//! failing implementations in tests.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// An open, writable log file
pub trait LogSink: Write + Send {
    /// Move the write position to the end of the file, returning the new offset
    fn seek_to_end(&mut self) -> io::Result<u64>;
}

impl LogSink for File {
    fn seek_to_end(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::End(0))
    }
}

/// File operations used by the logger
///
/// # Object Safety
/// This trait is object-safe to allow `Box<dyn FileSystem>` usage.
pub trait FileSystem: Send + Sync {
    /// Check whether a file exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create an empty file, failing if it cannot be created
    fn create_empty(&self, path: &Path) -> io::Result<()>;

    /// Remove the file at `path`
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Size of the file in bytes
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Open an existing file for appending
    fn open_append(&self, path: &Path) -> io::Result<Box<dyn LogSink>>;
}

/// `FileSystem` backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_empty(&self, path: &Path) -> io::Result<()> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(path).map(|m| m.len())
    }

    fn open_append(&self, path: &Path) -> io::Result<Box<dyn LogSink>> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Box::new(file))
    }
}

/// Normalize a configured log path into the file actually written
///
/// Any extension is stripped, so `logs/app.log` writes to `logs/app`.
pub fn normalize_target_path(path: &Path) -> PathBuf {
    path.with_extension("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_strips_extension() {
        assert_eq!(
            normalize_target_path(Path::new("/tmp/app.log")),
            PathBuf::from("/tmp/app")
        );
        assert_eq!(
            normalize_target_path(Path::new("/tmp/app.tar.gz")),
            PathBuf::from("/tmp/app.tar")
        );
    }

    #[test]
    fn test_normalize_without_extension_is_unchanged() {
        assert_eq!(
            normalize_target_path(Path::new("/tmp/app")),
            PathBuf::from("/tmp/app")
        );
        assert_eq!(
            normalize_target_path(Path::new("/tmp/.hidden")),
            PathBuf::from("/tmp/.hidden")
        );
    }

    #[test]
    fn test_create_empty_and_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app");
        let fs = StdFileSystem;

        assert!(!fs.exists(&path));
        fs.create_empty(&path).unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.file_size(&path).unwrap(), 0);

        // A second create must not truncate or succeed silently
        assert!(fs.create_empty(&path).is_err());
    }

    #[test]
    fn test_open_append_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let fs = StdFileSystem;
        assert!(fs.open_append(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_open_append_writes_at_end() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app");
        std::fs::write(&path, b"first\n").unwrap();

        let fs = StdFileSystem;
        let mut sink = fs.open_append(&path).unwrap();
        assert_eq!(sink.seek_to_end().unwrap(), 6);
        sink.write_all(b"second\n").unwrap();
        drop(sink);

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app");
        let fs = StdFileSystem;
        fs.create_empty(&path).unwrap();
        fs.remove(&path).unwrap();
        assert!(!fs.exists(&path));
        assert!(fs.remove(&path).is_err());
    }
}
