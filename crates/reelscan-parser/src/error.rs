//! Configuration errors.
//!
//! Parsing itself never fails. Everything that can go wrong happens while a
//! [`ScannerConfig`](crate::config::ScannerConfig) is compiled into a
//! [`PatternRegistry`](crate::registry::PatternRegistry).

/// Error raised when a scanner configuration cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A keyword or user supplied expression produced an invalid pattern.
    #[error("invalid {kind} pattern `{pattern}`: {source}")]
    InvalidPattern {
        kind: &'static str,
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// A language definition has no identifier.
    #[error("language definition has an empty identifier")]
    EmptyLanguageId,

    /// A video source entry has no label.
    #[error("video source entry has an empty label")]
    EmptySourceLabel,
}

impl ConfigError {
    pub(crate) fn invalid_pattern(
        kind: &'static str,
        pattern: impl Into<String>,
        source: fancy_regex::Error,
    ) -> Self {
        Self::InvalidPattern {
            kind,
            pattern: pattern.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
