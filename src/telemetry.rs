//! `tracing` subscriber setup.

use crate::config::LogFormat;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive is malformed.
    #[error("invalid log filter '{directive}': {source}")]
    Filter {
        /// Directive as configured.
        directive: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// Installs the global subscriber writing to stderr.
///
/// `directive` uses `EnvFilter` syntax, e.g. `info,kanban=debug`.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the directive does not parse or a
/// subscriber is already installed.
pub fn init(directive: &str, format: LogFormat) -> Result<(), TelemetryError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::builder()
        .parse(directive)
        .map_err(|source| TelemetryError::Filter {
            directive: directive.to_owned(),
            source,
        })?;
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init()?,
    }
    Ok(())
}
