//! # Logger
//!
//! Installs the global `tracing` subscriber for kModel binaries.
//!
//! * Console output goes to **stderr**, so stdout stays free for program output such as
//!   exported model snapshots.
//! * An optional rolling log file is written through a non-blocking worker; keep the
//!   returned [`Logger`] alive until shutdown.
//! * Output is compact text, multi-line pretty text or JSON lines ([`LogFormat`]).
//! * [`LoggerBuilder::directive`] adds programmatic filter defaults such as
//!   `"kmodel=debug"`. A non-empty `RUST_LOG` replaces them.
//!
//! ## Example
//!
//! ```rust
//! use kmodel_logger::{LevelFilter, LogFormat, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("kmodel-inspect")
//!     .level(LevelFilter::DEBUG)
//!     .format(LogFormat::Compact)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

/// Line format shared by the console and the file output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    /// One JSON object per event.
    Json,
}

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    format: LogFormat,
    directives: Vec<String>,
    rotation: Rotation,
    max_files: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            directory: None,
            level: LevelFilter::INFO,
            format: LogFormat::default(),
            directives: Vec::new(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// Builder for the global subscriber.
///
/// A name is required before [`init`](LoggerBuilder::init) becomes available; file
/// options become available once a directory is set.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    config: LoggerConfig,
    name: N,
    file: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Sets the application name, also used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { config: self.config, name: WithName(name.into()), file: PhantomData }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    /// Number of rotated files to keep.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    /// Level applied to every target without a more specific directive.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds a filter directive such as `kmodel=trace`.
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.config.directives.push(directive.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn format(mut self, format: LogFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Writes a rolling log file into `directory`, creating it on init.
    pub fn directory(self, directory: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut config = self.config;
        config.directory = Some(directory.into());
        LoggerBuilder { config, name: self.name, file: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, `max_files == 0`, a bad
    ///   filter directive or when neither console nor file output is enabled.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log file cannot be set up.
    /// * [`LoggerError::Subscriber`] when a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { config, name: WithName(name), .. } = self;
        validate_config(&config, &name)?;

        let filter = build_env_filter(&config)?;
        let mut layers = Vec::new();

        if config.console {
            let console = layer().with_writer(std::io::stderr);
            layers.push(match config.format {
                LogFormat::Compact => console.compact().boxed(),
                LogFormat::Pretty => console.pretty().boxed(),
                LogFormat::Json => console.json().with_ansi(false).boxed(),
            });
        }

        let guard = match &config.directory {
            Some(directory) => {
                fs::create_dir_all(directory)
                    .context(format!("Creating {}", directory.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(config.rotation.clone())
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(config.max_files)
                    .build(directory)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                let file = layer().with_writer(writer).with_ansi(false);
                layers.push(match config.format {
                    LogFormat::Json => file.json().boxed(),
                    LogFormat::Compact | LogFormat::Pretty => file.boxed(),
                });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No output enabled. Enable the console or set a log directory.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(logger = %name, format = ?config.format, "Logger initialized");

        Ok(Logger { guard })
    }
}

/// Handle to the installed subscriber.
///
/// Holds the file writer's worker guard; dropping it flushes and stops file output.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName, file: PhantomData }
    }

    /// Whether a log file is being written.
    #[must_use]
    pub const fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.directory.is_some() && config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    let from_env =
        std::env::var_os(EnvFilter::DEFAULT_ENV).is_some_and(|value| !value.is_empty());
    if from_env {
        return Ok(builder.from_env_lossy());
    }

    let directives = config.directives.join(",");
    builder.parse(&directives).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid filter directive '{directives}': {e}").into(),
        context: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_builder_defaults() {
        let builder = Logger::builder().name("kmodel-test");

        assert!(builder.config.console);
        assert_eq!(builder.config.level, LevelFilter::INFO);
        assert_eq!(builder.config.format, LogFormat::Compact);
        assert!(builder.config.directives.is_empty());
        assert!(builder.config.directory.is_none());
    }

    #[test]
    fn test_builder_collects_settings() {
        let tmp_dir = tempdir().expect("temp dir");
        let log_dir = tmp_dir.path().join("logs");
        let builder = Logger::builder()
            .name("kmodel-test")
            .directive("kmodel=trace")
            .directive("kmodel_inspect=debug")
            .format(LogFormat::Json)
            .directory(&log_dir)
            .max_files(3)
            .level(LevelFilter::WARN);

        assert_eq!(builder.config.directives, ["kmodel=trace", "kmodel_inspect=debug"]);
        assert_eq!(builder.config.level, LevelFilter::WARN);
        assert_eq!(builder.config.max_files, 3);
        assert_eq!(builder.config.directory.as_deref(), Some(log_dir.as_path()));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = Logger::builder().name("  ").init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_no_output_is_rejected() {
        let err = Logger::builder().name("kmodel-test").console(false).init().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_zero_max_files_is_rejected() {
        let tmp_dir = tempdir().expect("temp dir");
        let err = Logger::builder()
            .name("kmodel-test")
            .directory(tmp_dir.path())
            .max_files(0)
            .init()
            .unwrap_err();

        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    #[serial]
    fn test_invalid_directive_is_rejected() {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            return;
        }
        let config = LoggerConfig { directives: vec!["kmodel=loud".to_owned()], ..Default::default() };

        let err = build_env_filter(&config).unwrap_err();
        assert!(err.to_string().contains("kmodel=loud"));
    }

    #[test]
    #[serial]
    fn test_directives_are_combined() {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            return;
        }
        let config = LoggerConfig {
            directives: vec!["kmodel=trace".to_owned(), "other=warn".to_owned()],
            ..Default::default()
        };

        let filter = build_env_filter(&config).unwrap().to_string();
        assert!(filter.contains("kmodel=trace"));
        assert!(filter.contains("other=warn"));
    }
}
