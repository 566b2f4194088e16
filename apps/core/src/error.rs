use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// The intents catalog could not be found at the configured location.
    #[error("Intents file not found. Please upload it to the correct location. ({0})")]
    IntentsNotFound(String),

    /// The intents catalog exists but is not a valid JSON intent list.
    #[error("Error decoding the intents JSON file. Please check its format. ({0})")]
    IntentsFormat(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents data validation errors (e.g., an intent without responses).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., an unparsable environment variable).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The classifier could not be trained on the given catalog.
    #[error("Training error: {0}")]
    Training(String),

    /// A translation call failed.
    #[error("Translation error: {0}")]
    #[allow(dead_code)]
    Translation(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::IntentsNotFound(s) => AppError::IntentsNotFound(s.clone()),
            AppError::IntentsFormat(s) => AppError::IntentsFormat(s.clone()),
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Training(s) => AppError::Training(s.clone()),
            AppError::Translation(s) => AppError::Translation(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::IntentsFormat(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
