//! Structured logging for AuraFlow plugins.
//!
//! Installs a `tracing` subscriber; `RUST_LOG` overrides the configured level.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    #[default]
    Info,
    /// Warning level
    Warn,
    /// Error level
    Error,
}

impl LogLevel {
    /// Filter directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_directive().to_uppercase())
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// Single-line output
    #[default]
    Compact,
    /// JSON lines
    Json,
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include event targets
    pub targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            targets: true,
        }
    }
}

impl LogConfig {
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.as_directive()))
    }
}

/// Install the global subscriber.
///
/// Returns false if a global subscriber was already set.
pub fn init_logging(config: &LogConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.filter());
    let result = match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_target(config.targets))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_target(config.targets))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(config.targets))
            .try_init(),
    };
    result.is_ok()
}
