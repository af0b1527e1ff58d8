//! Timestamped logging to a file and stdout.
//!
//! Lines look like `2024-05-01 12:00:00,123 - INFO - message`.

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::LabelError;

/// Default log file, created in the working directory.
pub const DEFAULT_LOG_FILE: &str = "label_generator.log";

/// Logger writing every record to both a file and stdout.
pub struct DualLogger {
    level: LevelFilter,
    file: Mutex<Box<dyn Write + Send>>,
    /// Set after the first failed file write has been reported on stderr.
    file_failed: AtomicBool,
}

impl DualLogger {
    pub fn new(path: &Path, level: LevelFilter) -> Result<Self, LabelError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(file, level))
    }

    /// Logger mirroring stdout into an arbitrary writer instead of a file.
    pub fn with_writer(writer: impl Write + Send + 'static, level: LevelFilter) -> Self {
        Self {
            level,
            file: Mutex::new(Box::new(writer)),
            file_failed: AtomicBool::new(false),
        }
    }

    fn report_file_error(&self, e: std::io::Error) {
        if !self.file_failed.swap(true, Ordering::Relaxed) {
            eprintln!("Warning: writing to the log file failed ({}), further errors suppressed", e);
        }
    }
}

/// Render a record the way it appears in the log.
pub fn format_line(record: &Record) -> String {
    format!(
        "{} - {} - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
        record.level(),
        record.args()
    )
}

impl Log for DualLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);
        println!("{}", line);
        if let Ok(mut file) = self.file.lock() {
            if let Err(e) = writeln!(file, "{}", line) {
                self.report_file_error(e);
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        if let Ok(mut file) = self.file.lock() {
            if let Err(e) = file.flush() {
                self.report_file_error(e);
            }
        }
    }
}

/// Install the global logger. Only the first call in a process takes effect.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), LabelError> {
    let logger = DualLogger::new(path, level)?;
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(level))
        .map_err(|e| LabelError::Io(std::io::Error::other(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_line_format() {
        let line = format_line(
            &Record::builder()
                .args(format_args!("Label composed"))
                .level(Level::Warn)
                .build(),
        );
        assert!(line.ends_with(" - WARN - Label composed"), "got {}", line);
        // "YYYY-MM-DD HH:MM:SS,mmm"
        assert_eq!(line.find(" - "), Some(23));
    }

    #[test]
    fn test_logger_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let logger = DualLogger::new(&path, LevelFilter::Info).unwrap();

        logger.log(
            &Record::builder()
                .args(format_args!("kept"))
                .level(Level::Info)
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("dropped"))
                .level(Level::Debug)
                .build(),
        );
        logger.flush();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("INFO - kept"));
        assert!(!text.contains("dropped"));
    }

    struct BrokenDisk;

    impl Write for BrokenDisk {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_file_write_failure_is_flagged_not_fatal() {
        let logger = DualLogger::with_writer(BrokenDisk, LevelFilter::Info);
        assert!(!logger.file_failed.load(Ordering::Relaxed));

        for _ in 0..3 {
            logger.log(
                &Record::builder()
                    .args(format_args!("still printed"))
                    .level(Level::Info)
                    .build(),
            );
        }
        assert!(logger.file_failed.load(Ordering::Relaxed));
    }
}
