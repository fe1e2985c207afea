//! Tracing subscriber setup.
//!
//! Logs go to stderr so that JSON and CSV output on stdout stays clean.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging options taken from the command line.
#[derive(Debug, Clone)]
pub(crate) struct LogConfig {
    /// Filter directive, e.g. `warn` or `dalal=debug`
    pub(crate) level: String,
    /// Emit one JSON object per event
    pub(crate) json: bool,
}

impl LogConfig {
    pub(crate) fn new(level: impl Into<String>, json: bool) -> Self {
        Self {
            level: level.into(),
            json,
        }
    }

    /// Filter to install. `RUST_LOG` wins over the configured level.
    fn filter(&self) -> Result<EnvFilter, Box<dyn std::error::Error>> {
        Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.level))?)
    }
}

/// Install the global subscriber.
pub(crate) fn init_logging(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = config.filter()?;

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    tracing::debug!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}
