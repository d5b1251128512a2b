use thiserror::Error;

#[derive(Error, Debug)]
pub enum HullError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session expired. Please log in again.")]
    SessionExpired,

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Shell completion error: {0}")]
    ShellCompletion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HullError>;
