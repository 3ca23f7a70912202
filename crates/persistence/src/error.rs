//! Persistence error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for PersistenceError {
    fn from(err: tokio::task::JoinError) -> Self {
        PersistenceError::Task(err.to_string())
    }
}

impl From<PersistenceError> for krishi_core::Error {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Io(e) => krishi_core::Error::Io(e),
            other => krishi_core::Error::Storage(other.to_string()),
        }
    }
}
