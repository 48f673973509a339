//! Error handling for the foldplot core transforms

use thiserror::Error;

/// Errors that abort the pipeline for the current dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("Schema error: {message}")]
    Schema { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Empty dataset: no alignment records after normalization")]
    EmptyDataset,

    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },
}

impl PlotError {
    pub fn schema<S: Into<String>>(message: S) -> Self {
        Self::Schema { message: message.into() }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn invalid_record<S: Into<String>>(row: usize, message: S) -> Self {
        Self::InvalidRecord {
            row,
            message: message.into(),
        }
    }
}

/// Result type for core operations
pub type PlotResult<T> = Result<T, PlotError>;
