//! Error types for the export pipeline.

use thiserror::Error;

use stockfolio_connect::ApiError;

/// Type alias for Result using our ExportError type.
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Errors produced while exporting a report.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The report HTML could not be fetched. Terminal: with no document
    /// there is nothing to rasterize and nothing to fall back to.
    #[error("Failed to fetch report: {0}")]
    Fetch(#[from] ApiError),

    /// The rendering/rasterization stage failed; the pipeline degrades to
    /// the HTML fallback when this occurs.
    #[error("Rasterization failed: {0}")]
    Rasterization(String),

    /// Writing the exported file failed.
    #[error("Failed to write report file: {0}")]
    Io(#[from] std::io::Error),
}
