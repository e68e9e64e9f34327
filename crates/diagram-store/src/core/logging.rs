//! Logging setup for applications embedding the store
//!
//! The store itself only emits `tracing` events: `trace!` when an operation
//! starts and `debug!` with collection sizes once it has changed something.
//! Hosts that want to see them install a subscriber, either their own or the
//! one built by [`init_logging`].
//!
//! # Usage
//!
//! ```rust
//! use diagram_store::core::logging::init_logging;
//!
//! // Level from DIAGRAM_STORE_LOG_LEVEL / RUST_LOG, compact output
//! let _ = init_logging(None, None);
//! ```
//!
//! # Environment Variables
//!
//! - `DIAGRAM_STORE_LOG_LEVEL`: log level (trace|debug|info|warn|error|off)
//! - `DIAGRAM_STORE_LOG_FORMAT`: output format (compact|pretty|json)
//! - `RUST_LOG`: standard `tracing-subscriber` filter, e.g.
//!   `RUST_LOG="info,diagram_store::store=trace"`

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Initialize the global tracing subscriber
///
/// * `level` - log level or filter directive. Falls back to
///   `DIAGRAM_STORE_LOG_LEVEL`, then `RUST_LOG`, then `info`.
/// * `format` - `compact`, `pretty` or `json`. Falls back to
///   `DIAGRAM_STORE_LOG_FORMAT`, then `compact`.
///
/// Returns an error for an unknown format or when a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("DIAGRAM_STORE_LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    let log_format = format
        .map(|s| s.to_string())
        .or_else(|| std::env::var("DIAGRAM_STORE_LOG_FORMAT").ok())
        .unwrap_or_else(|| "compact".to_string());

    let filter = if log_level == "off" {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let format =
        LogFormat::from_str(&log_format).map_err(|e| format!("Invalid log format: {}", e))?;

    match format {
        LogFormat::Compact => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_level(true)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .pretty(),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            Registry::default()
                .with(filter)
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .json(),
                )
                .try_init()?;
        }
    }

    Ok(())
}
