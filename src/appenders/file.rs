//! File appender implementation

use crate::core::{Appender, LogLevel, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends rendered lines to a file.
///
/// Writes go straight to the file descriptor; there is no user-space buffer,
/// so a line is visible to readers as soon as `write` returns.
pub struct FileAppender {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileAppender {
    /// Open (or create) `path` in append mode, creating missing parent directories.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_layout_logger::appenders::FileAppender;
    ///
    /// let appender = FileAppender::new("/var/log/app.log").unwrap();
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let open_error = |source| LoggerError::FileOpen {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(open_error)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(open_error)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn write(&self, _level: LogLevel, bytes: &[u8]) -> Result<()> {
        let mut file = self.file.lock();
        file.write_all(bytes).map_err(|e| {
            LoggerError::transport(
                self.name(),
                format!("{}: {}", self.path.display(), e),
            )
        })
    }

    fn flush(&self) -> Result<()> {
        let mut file = self.file.lock();
        file.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file_appender"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = self.file.get_mut().sync_data();
    }
}
