//! Tracing subscriber setup.
//!
//! Call [`Telemetry::init`] once at startup; library code only ever emits
//! events through the `tracing` macros and never installs a subscriber
//! itself.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

/// Subscriber configuration, built with a fluent API.
#[derive(Debug, Clone)]
pub struct Telemetry {
    level: Level,
    format: TracingFormat,
    env_filter: Option<String>,
    span_events: bool,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl Telemetry {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Installs the tracing subscriber.
    ///
    /// Safe to call more than once; later calls are no-ops if a subscriber
    /// is already installed.
    pub fn init(self) {
        let env_filter = match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        };

        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        match self.format {
            TracingFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
            TracingFormat::Compact => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
            TracingFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_span_events(span_events),
                    )
                    .try_init()
                    .ok();
            }
        }

        tracing::debug!(
            level = %self.level,
            format = ?self.format,
            "telemetry initialized"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let telemetry = Telemetry::new()
            .with_level(Level::DEBUG)
            .with_format(TracingFormat::Json)
            .with_env_filter("fridon=debug,hyper=warn")
            .with_span_events(true);

        assert_eq!(telemetry.level, Level::DEBUG);
        assert_eq!(telemetry.format, TracingFormat::Json);
        assert_eq!(telemetry.env_filter.as_deref(), Some("fridon=debug,hyper=warn"));
        assert!(telemetry.span_events);
    }

    #[test]
    fn init_is_idempotent() {
        Telemetry::new().with_format(TracingFormat::Compact).init();
        Telemetry::new().init();
    }
}
