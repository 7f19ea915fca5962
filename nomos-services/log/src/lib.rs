pub mod panic;

// std
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
// crates
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{LevelFilter, ParseError},
    prelude::*,
    util::TryInitError,
    EnvFilter,
};
// internal

/// Keeps the non blocking writer flushing until dropped.
pub struct Logger {
    guard: Option<WorkerGuard>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("invalid filter directive: {0}")]
    Filter(#[from] ParseError),
    #[error("a global logger is already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoggerBackend {
    File {
        directory: PathBuf,
        prefix: Option<PathBuf>,
    },
    Stdout,
    Stderr,
    /// Leave the global subscriber untouched.
    Disabled,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoggerFormat {
    Json,
    Plain,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggerSettings {
    pub backend: LoggerBackend,
    pub format: LoggerFormat,
    #[serde(with = "serde_level")]
    pub level: Level,
    /// Per target levels, keyed by crate or module path.
    #[serde(default)]
    pub filters: HashMap<String, String>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            backend: LoggerBackend::Stdout,
            format: LoggerFormat::Json,
            level: Level::DEBUG,
            filters: HashMap::new(),
        }
    }
}

impl LoggerSettings {
    #[inline]
    pub fn new(backend: LoggerBackend, format: LoggerFormat, level: Level) -> Self {
        Self {
            backend,
            format,
            level,
            filters: HashMap::new(),
        }
    }

    fn env_filter(&self) -> Result<EnvFilter, ParseError> {
        let directives = self
            .filters
            .iter()
            .map(|(target, level)| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",");
        EnvFilter::builder()
            .with_default_directive(LevelFilter::from(self.level).into())
            .parse(directives)
    }
}

impl Logger {
    /// Install the global subscriber described by `settings`.
    pub fn init(settings: &LoggerSettings) -> Result<Self, LoggerError> {
        let filter = settings.env_filter()?;
        let guard = match &settings.backend {
            LoggerBackend::File { directory, prefix } => {
                let file_appender = tracing_appender::rolling::hourly(
                    directory,
                    prefix.clone().unwrap_or_else(|| PathBuf::from("nomos-da.log")),
                );
                Some(init_writer(file_appender, &settings.format, filter)?)
            }
            LoggerBackend::Stdout => Some(init_writer(std::io::stdout(), &settings.format, filter)?),
            LoggerBackend::Stderr => Some(init_writer(std::io::stderr(), &settings.format, filter)?),
            LoggerBackend::Disabled => None,
        };
        panic::install();
        Ok(Self { guard })
    }

    /// Whether events go through a background writer that flushes on drop.
    #[must_use]
    pub fn is_writing(&self) -> bool {
        self.guard.is_some()
    }
}

fn init_writer<W>(writer: W, format: &LoggerFormat, filter: EnvFilter) -> Result<WorkerGuard, LoggerError>
where
    W: Write + Send + 'static,
{
    let (non_blocking, guard) = tracing_appender::non_blocking(writer);
    let layer = tracing_subscriber::fmt::Layer::new()
        .with_level(true)
        .with_writer(non_blocking);
    match format {
        LoggerFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()?,
        LoggerFormat::Plain => tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()?,
    }
    Ok(guard)
}

mod serde_level {
    use super::Level;
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        <String>::deserialize(deserializer).and_then(|v| {
            v.parse()
                .map_err(|e| D::Error::custom(format!("invalid log level {e}")))
        })
    }

    pub fn serialize<S>(value: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.as_str().serialize(serializer)
    }
}
