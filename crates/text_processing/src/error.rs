//! Error types for text processing

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextProcessingError>;

#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Model artifact not found: {0}")]
    ModelNotFound(String),

    #[error("Malformed model artifact: {0}")]
    InvalidModel(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Invalid training data: {0}")]
    TrainingData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<TextProcessingError> for krishi_core::Error {
    fn from(err: TextProcessingError) -> Self {
        match err {
            TextProcessingError::Io(e) => krishi_core::Error::Io(e),
            other => krishi_core::Error::Model(other.to_string()),
        }
    }
}
