//! Error types for workbook inspection

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while inspecting a batch of workbooks
#[derive(Debug, Error)]
pub enum InspectError {
    /// The path does not exist. The batch runner reports it and moves on.
    #[error("File not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// The file exists but is not a readable workbook. Fatal for the run.
    #[error("Failed to read workbook {}", path.display())]
    UnreadableWorkbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// The report could not be written
    #[error("Failed to write report")]
    Io(#[from] std::io::Error),
}

impl InspectError {
    /// Whether the batch can continue with the next file
    pub fn is_recoverable(&self) -> bool {
        matches!(self, InspectError::MissingFile { .. })
    }
}

pub type Result<T> = std::result::Result<T, InspectError>;
