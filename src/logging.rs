//! File-backed sink for the `log` facade
//!
//! The terminal belongs to the TUI, so records go to a file instead of stderr:
//! the configured path, or `spojen.log` in the system temp directory.
//! The level comes from [`LogConfig::level`] (overridable with `SPOJEN_LOG`).

use crate::config::LogConfig;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const DEFAULT_LOG_FILE: &str = "spojen.log";

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`), ignoring case
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Where records are written for this configuration
pub fn log_path(config: &LogConfig) -> PathBuf {
    config
        .file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE))
}

pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    /// Open (truncate) the log file and write a session header
    pub fn open(path: &Path, level: LevelFilter) -> io::Result<Self> {
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;
        writeln!(
            file,
            "{}\nspojen session started at {} (level={})\n{}",
            "=".repeat(80),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            "=".repeat(80)
        )?;
        Ok(FileLogger {
            level,
            file: Mutex::new(file),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut file = self.file.lock();
        // A failed write has nowhere better to go
        let _ = writeln!(
            file,
            "[{}] [{:<5}] [{}] {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

/// Install the file logger as the global `log` sink.
///
/// Returns the log path, or `None` when logging is off. An unknown level name falls
/// back to `info`. Calling this twice keeps the first logger.
pub fn init(config: &LogConfig) -> io::Result<Option<PathBuf>> {
    let level = parse_level(&config.level).unwrap_or(LevelFilter::Info);
    if level == LevelFilter::Off {
        return Ok(None);
    }

    let path = log_path(config);
    let logger = FileLogger::open(&path, level)?;
    if LOGGER.set(logger).is_err() {
        return Ok(Some(path));
    }
    if let Some(logger) = LOGGER.get() {
        if log::set_logger(logger).is_ok() {
            log::set_max_level(level);
        }
    }
    if parse_level(&config.level).is_none() {
        log::warn!("Unknown log level {:?}, using info", config.level);
    }
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_default_path_in_temp_dir() {
        let path = log_path(&LogConfig::default());
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.ends_with(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_file_logger_filters_by_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let logger = FileLogger::open(&path, LevelFilter::Warn).unwrap();

        logger.log(
            &Record::builder()
                .args(format_args!("kept"))
                .level(log::Level::Warn)
                .target("spojen::test")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("dropped"))
                .level(log::Level::Debug)
                .target("spojen::test")
                .build(),
        );
        logger.flush();

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert!(contents.contains("session started"));
        assert!(contents.contains("[WARN ] [spojen::test] kept"));
        assert!(!contents.contains("dropped"));
    }
}
