//! Configuration errors

/// Invalid client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The base URL does not parse.
    #[error("Invalid base URL {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// The base URL parses but cannot carry request paths.
    #[error("Base URL {0:?} must be http or https")]
    UnsupportedScheme(String),

    /// The timeout is not a whole number of seconds.
    #[error("Invalid timeout {0:?}, expected whole seconds")]
    InvalidTimeout(String),
}
