use thiserror::Error;

/// Errors from the chat platform adapter.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("platform request failed: {0}")]
    Request(String),

    #[error("missing permission: {0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),
}

/// Errors decoding an inbound interaction's custom id or values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InteractionError {
    #[error("interaction carried no selected value")]
    MissingValue,

    #[error("invalid interaction value: '{0}'")]
    InvalidValue(String),

    #[error("invalid page in custom id: '{0}'")]
    InvalidPage(String),
}

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}
