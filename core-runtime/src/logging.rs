//! # Logging & Tracing Infrastructure
//!
//! Provides structured logging with `tracing` crate, supporting:
//! - JSON, compact and pretty-print output formats
//! - Module-level filtering
//! - Span contexts around network operations
//! - Redaction helpers for secrets in ad-hoc fields
//!
//! ## Overview
//!
//! This module configures the `tracing-subscriber` infrastructure. Library
//! crates only emit events through `tracing` macros; binaries call
//! [`init_logging`] once at startup.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = LoggingConfig::default()
//!         .with_format(LogFormat::Pretty)
//!         .with_level(LogLevel::Debug);
//!
//!     init_logging(config).expect("Failed to initialize logging");
//!
//!     tracing::info!("Application started");
//! }
//! ```

use crate::error::{Error, Result};

use std::io;

use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Compact;
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum log level
    pub level: LogLevel,
    /// Custom filter string (e.g., "provider_onedrive=debug,core_auth=trace")
    pub filter: Option<String>,
    /// Enable span contexts
    pub enable_spans: bool,
    /// Display target module in logs
    pub display_target: bool,
    /// Display thread info
    pub display_thread_info: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::Info,
            filter: None,
            enable_spans: true,
            display_target: true,
            display_thread_info: false,
        }
    }
}

impl LoggingConfig {
    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set minimum log level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set custom filter string
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Enable or disable span contexts
    pub fn with_spans(mut self, enable: bool) -> Self {
        self.enable_spans = enable;
        self
    }

    /// Enable or disable target display
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }

    /// Enable or disable thread info
    pub fn with_thread_info(mut self, display: bool) -> Self {
        self.display_thread_info = display;
        self
    }
}

/// Initialize the logging system
///
/// This should be called once during application startup. Subsequent calls
/// will return an error.
///
/// When no explicit filter is configured, `RUST_LOG` takes precedence over
/// the built-in per-crate defaults.
///
/// # Errors
///
/// Returns an error if:
/// - Logging is already initialized
/// - The filter string is invalid
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;

    match config.format {
        LogFormat::Pretty => init_pretty_logging(&config, filter),
        LogFormat::Json => init_json_logging(&config, filter),
        LogFormat::Compact => init_compact_logging(&config, filter),
    }
}

fn default_filter(level: LogLevel) -> String {
    let level = level.as_filter_directive();
    // Our crates at the requested level, chatty dependencies at warn.
    [
        "drive_server",
        "core_service",
        "core_runtime",
        "core_auth",
        "provider_onedrive",
        "bridge_desktop",
        "msgraph_drive",
        "tower_http",
    ]
    .iter()
    .map(|target| format!("{}={}", target, level))
    .chain(["h2=warn", "hyper=warn", "reqwest=warn", "rustls=warn"].map(String::from))
    .collect::<Vec<_>>()
    .join(",")
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Some(custom_filter) = &config.filter {
        return EnvFilter::try_new(custom_filter)
            .map_err(|e| Error::Config(format!("Invalid log filter: {}", e)));
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(default_filter(config.level))
        .map_err(|e| Error::Config(format!("Invalid log filter: {}", e)))
}

fn init_pretty_logging(config: &LoggingConfig, filter: EnvFilter) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(config.display_target)
        .with_thread_ids(config.display_thread_info)
        .with_thread_names(config.display_thread_info)
        .with_span_events(if config.enable_spans {
            tracing_subscriber::fmt::format::FmtSpan::CLOSE
        } else {
            tracing_subscriber::fmt::format::FmtSpan::NONE
        })
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

fn init_json_logging(config: &LoggingConfig, filter: EnvFilter) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(config.enable_spans)
        .with_span_list(config.enable_spans)
        .with_target(config.display_target)
        .with_thread_ids(config.display_thread_info)
        .with_thread_names(config.display_thread_info)
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

fn init_compact_logging(config: &LoggingConfig, filter: EnvFilter) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(config.display_target)
        .with_thread_ids(config.display_thread_info)
        .with_thread_names(config.display_thread_info)
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

/// Helper function to redact sensitive field values
///
/// ```ignore
/// use tracing::info;
/// use core_runtime::logging::redact_if_sensitive;
///
/// info!(secret = %redact_if_sensitive("client_secret", secret), "Loaded credentials");
/// ```
pub fn redact_if_sensitive(field_name: &str, value: &str) -> String {
    const SENSITIVE_FIELDS: &[&str] = &[
        "token",
        "access_token",
        "password",
        "secret",
        "authorization",
        "bearer",
    ];

    let field_lower = field_name.to_lowercase();
    if SENSITIVE_FIELDS.iter().any(|&f| field_lower.contains(f)) {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Json)
            .with_level(LogLevel::Debug)
            .with_filter("provider_onedrive=trace")
            .with_spans(false)
            .with_target(true)
            .with_thread_info(true);

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.filter, Some("provider_onedrive=trace".to_string()));
        assert!(!config.enable_spans);
        assert!(config.display_target);
        assert!(config.display_thread_info);
    }

    #[test]
    fn test_redact_if_sensitive() {
        assert_eq!(
            redact_if_sensitive("access_token", "secret123"),
            "[REDACTED]"
        );
        assert_eq!(redact_if_sensitive("client_secret", "abc"), "[REDACTED]");
        assert_eq!(redact_if_sensitive("Authorization", "Bearer x"), "[REDACTED]");

        assert_eq!(redact_if_sensitive("drive_id", "b!xaErFv"), "b!xaErFv");
        assert_eq!(redact_if_sensitive("path", "/Music/a.mp3"), "/Music/a.mp3");
    }

    #[test]
    fn test_default_format() {
        #[cfg(debug_assertions)]
        assert_eq!(LogFormat::default(), LogFormat::Pretty);

        #[cfg(not(debug_assertions))]
        assert_eq!(LogFormat::default(), LogFormat::Compact);
    }

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        let filter = default_filter(LogLevel::Debug);
        assert!(filter.contains("provider_onedrive=debug"));
        assert!(filter.contains("core_auth=debug"));
        assert!(filter.contains("reqwest=warn"));
    }

    #[test]
    fn test_build_custom_filter() {
        let config = LoggingConfig::default().with_filter("core_auth=trace,provider_onedrive=debug");
        let filter = build_filter(&config).unwrap();
        assert!(filter.to_string().contains("core_auth=trace"));
    }
}
