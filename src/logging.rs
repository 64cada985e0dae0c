//! File logging bootstrap.
//!
//! Library code only emits records through the `log` facade. The binary
//! calls [`init_logging`] once, before any job runs, to route them to an
//! append-only log file.
//!
//! # Invariants
//! - Initialization is idempotent for the same file and level.
//! - Re-initialization with a different file or level is rejected.

use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Log file name used when none is configured.
pub const DEFAULT_LOG_FILE: &str = "evermark.log";

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_file: PathBuf,
    _logger: LoggerHandle,
}

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    InvalidLevel(String),

    #[error("log file path `{0}` has no file name")]
    InvalidPath(PathBuf),

    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start logger: {0}")]
    Start(#[from] flexi_logger::FlexiLoggerError),

    #[error("logging already initialized with {active}; refusing to switch to {requested}")]
    Conflict { active: String, requested: String },
}

/// Starts appending log records at `level` to `log_file`.
///
/// Records carry a timestamp, level and module path.
pub fn init_logging(level: &str, log_file: &Path) -> Result<(), LoggingError> {
    let level = normalize_level(level)?;
    let log_file = log_file.to_path_buf();

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, LoggingError> {
        let spec = file_spec(&log_file)?;
        let logger = Logger::try_with_str(level)?
            .log_to_file(spec)
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()?;

        info!(
            "Logging started: level={} file={} version={}",
            level,
            log_file.display(),
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level,
            log_file: log_file.clone(),
            _logger: logger,
        })
    })?;

    if state.log_file != log_file || state.level != level {
        return Err(LoggingError::Conflict {
            active: format!("{} at {}", state.level, state.log_file.display()),
            requested: format!("{} at {}", level, log_file.display()),
        });
    }

    Ok(())
}

/// Returns the active `(level, log_file)`, or `None` before initialization.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_file.clone()))
}

/// Maps a `-v` count to a level name.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::InvalidLevel(other.to_string())),
    }
}

fn file_spec(log_file: &Path) -> Result<FileSpec, LoggingError> {
    let basename = log_file
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_file.to_path_buf()))?;

    let mut spec = FileSpec::default().basename(basename).use_timestamp(false);
    if let Some(dir) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| LoggingError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        spec = spec.directory(dir);
    }
    if let Some(ext) = log_file.extension().and_then(|s| s.to_str()) {
        spec = spec.suffix(ext);
    }
    Ok(spec)
}
