//! VbApi Logging
//!
//! Structured logging for the VbApi service, configured from `VBAPI_*`
//! environment variables and installed as a global `tracing` subscriber.
//! The other crates log through the `tracing` macros re-exported here.
//!
//! # Usage
//!
//! ```rust
//! use vbapi_log::{Format, Level, LogConfig};
//!
//! let config = LogConfig::from_env()
//!     .level(Level::Debug)
//!     .format(Format::Compact);
//!
//! assert_eq!(config.level, Level::Debug);
//! assert_eq!(config.format, Format::Compact);
//! ```
//!
//! # Environment Variables
//!
//! - `VBAPI_DEBUG=1` - Force at least debug level
//! - `VBAPI_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `VBAPI_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `VBAPI_LOG_COLOR=1|0` - Enable/disable colors
//!
//! `RUST_LOG` wins over the configured level when it holds a valid filter.

use once_cell::sync::OnceCell;
use std::env;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing::{debug, error, info, trace, warn};

/// Set once the global subscriber has been installed.
static INSTALLED: OnceCell<Level> = OnceCell::new();

// ============================================================================
// Log Levels
// ============================================================================

/// Log level for VbApi logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Trace level (most verbose)
    Trace = 0,
    /// Debug level
    Debug = 1,
    /// Info level
    Info = 2,
    /// Warning level
    Warn = 3,
    /// Error level (least verbose)
    Error = 4,
    /// Off (no logging)
    Off = 5,
}

impl Level {
    /// Get level from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Directive understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line human readable output
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON format for structured logging
    Json,
}

impl Format {
    /// Get format from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Pretty => "pretty",
            Format::Compact => "compact",
            Format::Json => "json",
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether ANSI colors are enabled (ignored for JSON)
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            color: false,
        }
    }
}

impl LogConfig {
    /// Create config from the `VBAPI_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str| {
            lookup(key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        };

        let debug = flag("VBAPI_DEBUG").unwrap_or(false);

        let level = lookup("VBAPI_LOG_LEVEL")
            .and_then(|s| Level::from_str(&s))
            .unwrap_or(defaults.level);

        let format = lookup("VBAPI_LOG_FORMAT")
            .and_then(|s| Format::from_str(&s))
            .unwrap_or(defaults.format);

        let color = flag("VBAPI_LOG_COLOR")
            .unwrap_or_else(|| lookup("NO_COLOR").is_none() && lookup("TERM").is_some());

        Self {
            debug,
            level,
            format,
            color,
        }
    }

    /// Set the minimum level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable colors.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Enable or disable debug mode.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Level after applying the debug flag.
    pub fn effective_level(&self) -> Level {
        if self.debug && self.level > Level::Debug {
            Level::Debug
        } else {
            self.level
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.effective_level().as_str()))
    }

    /// Install the global subscriber writing to STDOUT.
    ///
    /// Returns the writer guard, which must be held for the lifetime of the
    /// process so buffered lines are flushed on exit. Returns `None` when a
    /// subscriber is already installed.
    pub fn init(&self) -> Option<WorkerGuard> {
        if INSTALLED.get().is_some() {
            return None;
        }

        let (writer, guard) = tracing_appender::non_blocking(io::stdout());
        let registry = tracing_subscriber::registry().with(self.filter());

        let installed = match self.format {
            Format::Json => registry
                .with(fmt::layer().json().with_writer(writer).with_current_span(false))
                .try_init(),
            Format::Pretty => registry
                .with(fmt::layer().pretty().with_writer(writer).with_ansi(self.color))
                .try_init(),
            Format::Compact => registry
                .with(fmt::layer().compact().with_writer(writer).with_ansi(self.color))
                .try_init(),
        };

        match installed {
            Ok(()) => {
                let _ = INSTALLED.set(self.effective_level());
                Some(guard)
            }
            Err(_) => None,
        }
    }
}

/// Level the installed subscriber was configured with, if any.
pub fn installed_level() -> Option<Level> {
    INSTALLED.get().copied()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!(Level::from_str("debug"), Some(Level::Debug));
        assert_eq!(Level::from_str("DEBUG"), Some(Level::Debug));
        assert_eq!(Level::from_str(" warning "), Some(Level::Warn));
        assert_eq!(Level::from_str("none"), Some(Level::Off));
        assert_eq!(Level::from_str("loud"), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(Format::from_str("pretty"), Some(Format::Pretty));
        assert_eq!(Format::from_str("Compact"), Some(Format::Compact));
        assert_eq!(Format::from_str("json"), Some(Format::Json));
        assert_eq!(Format::from_str("xml"), None);
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = LogConfig::from_lookup(lookup(&[]));
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.format, Format::Json);
        assert!(!config.debug);
        assert!(!config.color);
    }

    #[test]
    fn test_environment_overrides() {
        let config = LogConfig::from_lookup(lookup(&[
            ("VBAPI_LOG_LEVEL", "warn"),
            ("VBAPI_LOG_FORMAT", "compact"),
            ("VBAPI_LOG_COLOR", "true"),
        ]));
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.format, Format::Compact);
        assert!(config.color);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = LogConfig::from_lookup(lookup(&[
            ("VBAPI_LOG_LEVEL", "chatty"),
            ("VBAPI_LOG_FORMAT", "yaml"),
        ]));
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.format, Format::Json);
    }

    #[test]
    fn test_debug_lowers_effective_level() {
        let config = LogConfig::from_lookup(lookup(&[("VBAPI_DEBUG", "1")]));
        assert!(config.debug);
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.effective_level(), Level::Debug);

        let trace = config.level(Level::Trace);
        assert_eq!(trace.effective_level(), Level::Trace);
    }

    #[test]
    fn test_no_color_disables_terminal_detection() {
        let config = LogConfig::from_lookup(lookup(&[("TERM", "xterm"), ("NO_COLOR", "1")]));
        assert!(!config.color);

        let config = LogConfig::from_lookup(lookup(&[("TERM", "xterm")]));
        assert!(config.color);
    }

    #[test]
    fn test_builder_overrides() {
        let config = LogConfig::default()
            .level(Level::Error)
            .format(Format::Pretty)
            .color(true)
            .debug(false);
        assert_eq!(config.level, Level::Error);
        assert_eq!(config.format, Format::Pretty);
        assert!(config.color);
    }
}
