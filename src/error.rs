//! Error types for matheval

use thiserror::Error;

/// Main error type for matheval
#[derive(Error, Debug)]
pub enum MathEvalError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Dataset error: {0}")]
    DatasetError(String),

    #[error("Unknown aggregation method: {0}. Available methods: {1}")]
    UnknownAggMethod(String, String),
}

/// Result type alias for matheval
pub type Result<T> = std::result::Result<T, MathEvalError>;
