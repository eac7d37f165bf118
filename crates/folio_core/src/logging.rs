//! Opt-in file logging for `folio` runs.
//!
//! A run is one batch: load a directory, ingest it, print a listing, exit.
//! When a log directory is given, ingestion events are appended to
//! `<dir>/folio_rCURRENT.log` with size-based rotation.
//!
//! # Invariants
//! - Events carry slugs, origins, counts and error kinds. Bodies are never logged.
//! - The first successful init fixes the settings for the rest of the process.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle,
    Naming,
};
use log::{info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "folio";
const ROTATE_AT_BYTES: u64 = 4 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 3;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Validated level and absolute directory for one logging session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    level: LevelFilter,
    dir: PathBuf,
}

impl LogSettings {
    /// Parses `level` and resolves `dir` against the working directory.
    ///
    /// # Errors
    /// - `UnknownLevel` when `level` is not a `log` level name.
    /// - `MissingDirectory` when `dir` is blank.
    /// - `Directory` when `dir` cannot be made absolute.
    pub fn new(level: &str, dir: impl AsRef<Path>) -> Result<Self, LoggingError> {
        let level = level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| LoggingError::UnknownLevel(level.trim().to_string()))?;

        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() || dir.to_string_lossy().trim().is_empty() {
            return Err(LoggingError::MissingDirectory);
        }
        let dir = std::path::absolute(dir).map_err(|source| LoggingError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;

        Ok(Self { level, dir })
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Failures of [`init_logging`].
#[derive(Debug)]
pub enum LoggingError {
    UnknownLevel(String),
    MissingDirectory,
    Directory { path: PathBuf, source: io::Error },
    Backend(FlexiLoggerError),
    /// Logging already runs with other settings.
    AlreadyActive { active: LogSettings },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(level) => write!(
                f,
                "unknown log level `{level}`; expected off|error|warn|info|debug|trace"
            ),
            Self::MissingDirectory => write!(f, "log directory must not be blank"),
            Self::Directory { path, source } => {
                write!(f, "log directory `{}` is unusable: {source}", path.display())
            }
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::AlreadyActive { active } => write!(
                f,
                "logging already active at level `{}` in `{}`",
                active.level,
                active.dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Directory { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Starts file logging for this run.
///
/// Calling again with equivalent settings is a no-op.
///
/// # Errors
/// - Any [`LogSettings::new`] failure.
/// - `Directory` when the directory cannot be created.
/// - `Backend` when the logger cannot start.
/// - `AlreadyActive` when an earlier call used different settings.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<(), LoggingError> {
    let requested = LogSettings::new(level, log_dir)?;
    let active = ACTIVE.get_or_try_init(|| start(requested.clone()))?;

    if active.settings != requested {
        return Err(LoggingError::AlreadyActive {
            active: active.settings.clone(),
        });
    }
    Ok(())
}

/// Level used when the caller does not pick one: `debug` in debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start(settings: LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.dir).map_err(|source| LoggingError::Directory {
        path: settings.dir.clone(),
        source,
    })?;

    let handle = Logger::with(LogSpecification::builder().default(settings.level).build())
        .log_to_file(
            FileSpec::default()
                .directory(settings.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    info!(
        "event=logging_init module=logging status=ok version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        settings.level,
        settings.dir.display()
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

/// Renders `value` as one log field: control characters become spaces and
/// anything past `max_chars` is cut and marked with `...`.
pub(crate) fn single_line_field(value: &str, max_chars: usize) -> String {
    let mut field = value
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .take(max_chars)
        .collect::<String>();
    if value.chars().nth(max_chars).is_some() {
        field.push_str("...");
    }
    field
}
