//! Logging setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging settings.
#[derive(Debug, Clone)]
pub(crate) struct LoggingConfig {
    /// Filter directives, in `RUST_LOG` syntax.
    pub log_level: String,
}

impl LoggingConfig {
    /// Read the filter from `RUST_LOG`, defaulting to `info`.
    ///
    /// `verbose` raises the default to `debug`; an explicit `RUST_LOG` wins.
    pub(crate) fn from_env(verbose: bool) -> Self {
        let fallback = if verbose { "debug" } else { "info" };
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| fallback.to_string()),
        }
    }
}

/// Install the console subscriber. Logs go to stderr.
pub(crate) fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level)?)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
