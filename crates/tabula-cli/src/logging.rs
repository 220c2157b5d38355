//! Logging setup for the `tabula` binary
//!
//! Installs a `tracing` subscriber writing to stderr, so rendered SQL on
//! stdout stays clean. `RUST_LOG` overrides the configured filter.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::LoggingSettings;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human readable output
    pub json: bool,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Default log level filter
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggingConfig {
    /// Quiet output: library warnings are surfaced as diagnostics instead
    pub fn production() -> Self {
        Self {
            json: false,
            include_location: false,
            default_filter: "error,tabula_cli=warn".to_string(),
        }
    }

    /// Verbose output, including every schema and row mutation
    pub fn development() -> Self {
        Self {
            json: false,
            include_location: true,
            default_filter: "info,tabula_schema=debug,tabula_query=debug,tabula_cli=debug"
                .to_string(),
        }
    }

    /// Pick a preset from the verbosity flag, then apply settings file overrides
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        let mut config = if verbose {
            Self::development()
        } else {
            Self::production()
        };
        if let Some(ref filter) = settings.filter {
            config.default_filter = filter.clone();
        }
        config.json = settings.json;
        config
    }
}

/// Initialize the logging system with the given configuration
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let layer = if config.json {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .json()
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry().with(layer).try_init()?;

    tracing::debug!(
        json = config.json,
        filter = %config.default_filter,
        "Logging system initialized"
    );

    Ok(())
}
