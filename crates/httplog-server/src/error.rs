use httplog_core::HttplogError;
use thiserror::Error;

/// Errors raised while loading settings and building the server.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or the merged values did not deserialize.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was present but unusable.
    #[error("invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },

    /// The configured log sink could not be opened.
    #[error("failed to open log sink: {0}")]
    Sink(#[from] HttplogError),
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
