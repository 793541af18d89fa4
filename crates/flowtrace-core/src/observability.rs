//! Structured logging bootstrap.
//!
//! Provides a small configuration layer over `tracing-subscriber` so
//! embedding applications can initialize engine logging consistently.
//! The engine itself only emits `tracing` events; installing a subscriber
//! is the host's choice.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    Warn,
    /// Error level
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(EngineError::config(format!("invalid log level: {s}"))),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default log level.
    pub level: LogLevel,
    /// Emit JSON-structured output instead of human-readable lines.
    pub json: bool,
}

impl LogConfig {
    /// Development configuration: debug level, human-readable output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            json: false,
        }
    }

    /// Production configuration: info level, JSON output.
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            json: true,
        }
    }

    /// Install a global `tracing` subscriber from this configuration.
    ///
    /// Honors `RUST_LOG` when set, falling back to the configured level.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ConfigError` if a global subscriber is
    /// already installed.
    pub fn init(&self) -> Result<()> {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_string()));

        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let result = if self.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.map_err(|e| EngineError::config(format!("failed to install subscriber: {e}")))
    }
}
