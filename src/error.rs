use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Unsupported intent '{intent}'. Supported intents: {}.", valid.join(", "))]
    UnknownIntent { intent: String, valid: Vec<String> },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid candidate pool: {0}")]
    InvalidPool(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
