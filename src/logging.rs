//! File logger behind the `log` facade.
//!
//! The interactive view owns stdout/stderr, so records go to a file
//! (`<temp dir>/ascii-mirror.log` unless configured), truncated at the
//! start of each session.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::LogLevel;

/// Environment variable that overrides the configured log level
pub const LOG_ENV: &str = "ASCII_MIRROR_LOG";

/// Default log file location.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("ascii-mirror.log")
}

/// Pick the effective level: CLI flag, then `ASCII_MIRROR_LOG`, then config.
/// An unparseable environment value is ignored.
pub fn resolve_level(cli: Option<LogLevel>, env: Option<&str>, config: LogLevel) -> LogLevel {
    cli.or_else(|| env.and_then(LogLevel::parse)).unwrap_or(config)
}

/// `log::Log` implementation writing `[timestamp] [LEVEL] [target] message`
/// lines to a file.
pub struct FileLogger {
    level: log::LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    /// Create (or truncate) the log file at `path` and write a session header.
    pub fn create(path: &Path, level: log::LevelFilter) -> io::Result<Self> {
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;

        writeln!(
            file,
            "{}\nascii-mirror session started at {} (level={})\n{}",
            "=".repeat(80),
            timestamp(),
            level,
            "=".repeat(80)
        )?;

        Ok(Self {
            level,
            file: Mutex::new(file),
        })
    }

    pub fn level(&self) -> log::LevelFilter {
        self.level
    }

    /// Install as the global logger.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut file = self.file.lock();
        // Nowhere to report a failed log write
        let _ = writeln!(
            file,
            "[{}] [{:<5}] [{}] {}",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Open the log file and install the global logger. `LogLevel::Off` installs
/// nothing.
pub fn init(path: &Path, level: LogLevel) -> io::Result<()> {
    if level == LogLevel::Off {
        return Ok(());
    }
    let logger = FileLogger::create(path, level.to_filter())?;
    if let Err(e) = logger.install() {
        // A logger is already installed (tests, embedding); keep it
        eprintln!("Logger not installed: {}", e);
    }
    Ok(())
}
