use thiserror::Error;

use crate::domain::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unreadable submission: {0}")]
    Input(String),

    #[error("View update failed: {0}")]
    View(#[from] ViewError),
}

/// Failure reported by a [`super::LedgerView`] implementation.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
