//! Structured logging setup.
//!
//! The library only emits `tracing` events; binaries decide where they go.
//! [`LoggingConfig`] and [`init_logging`] wire up a `tracing-subscriber`
//! registry with an `EnvFilter` and a text or JSON formatter. `RUST_LOG`
//! overrides the configured filter when set.

use std::str::FromStr;
use tracing::Level;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected text or json)")),
        }
    }
}

/// Configuration for logging setup.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for everything outside this crate
    pub level: Level,
    /// Log level for drift-guard components
    pub drift_level: Level,
    /// Output format
    pub format: LogFormat,
    /// Environment filter override
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            drift_level: Level::INFO,
            format: LogFormat::Text,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// JSON output at INFO, for pipeline runners that ship logs.
    pub fn production() -> Self {
        Self {
            level: Level::WARN,
            drift_level: Level::INFO,
            format: LogFormat::Json,
            env_filter: None,
        }
    }

    /// Verbose text output.
    pub fn development() -> Self {
        Self {
            level: Level::INFO,
            drift_level: Level::DEBUG,
            format: LogFormat::Text,
            env_filter: None,
        }
    }

    /// Sets the log level for drift-guard components.
    pub fn with_drift_level(mut self, level: Level) -> Self {
        self.drift_level = level;
        self
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Builds the environment filter string.
    pub fn env_filter(&self) -> String {
        if let Some(ref filter) = self.env_filter {
            filter.clone()
        } else {
            let level = self.level.as_str().to_lowercase();
            let drift_level = self.drift_level.as_str().to_lowercase();
            format!("{level},drift_guard={drift_level},drift_check={drift_level}")
        }
    }
}

/// Installs the global subscriber. Fails if one is already installed.
///
/// ```rust,no_run
/// use drift_guard::logging::{init_logging, LogFormat, LoggingConfig};
///
/// init_logging(LoggingConfig::default().with_format(LogFormat::Json)).unwrap();
/// ```
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

    // Logs go to stderr so stdout stays reserved for the report.
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
