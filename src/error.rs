//! Error types for voucher generation

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A form field is missing or does not hold an acceptable value
    #[error("Invalid value for `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A date field could not be read as a calendar date
    #[error("Cannot parse `{field}` as a date: {value:?}")]
    DateFormat { field: &'static str, value: String },

    /// The print window could not be created
    #[error("Print window unavailable: {0}")]
    ExportUnavailable(String),

    /// Session action requested on a screen that does not offer it
    #[error("`{action}` is not available on the {screen} screen")]
    InvalidTransition {
        action: &'static str,
        screen: &'static str,
    },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }
}
