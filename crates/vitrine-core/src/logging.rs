#![forbid(unsafe_code)]

//! Structured logging setup.
//!
//! All Vitrine crates emit `tracing` events unconditionally; nothing is
//! printed until a subscriber is installed. Native hosts and tests can call
//! [`init`] (feature `tracing-json`) to install a formatter filtered by the
//! `VITRINE_LOG` environment variable (falling back to `RUST_LOG`, then
//! `info`).

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "VITRINE_LOG";

/// Output format for [`init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Pretty,
    /// One JSON object per event, for log collectors.
    Json,
}

impl LogFormat {
    /// Parse a format name (`"json"` or anything else for pretty).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Error returned when a global subscriber is already installed.
#[derive(Debug, Clone)]
pub struct LoggingError(String);

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install tracing subscriber: {}", self.0)
    }
}

impl std::error::Error for LoggingError {}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns [`LoggingError`] if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init(format: LogFormat) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|err| LoggingError(err.to_string()))
}
