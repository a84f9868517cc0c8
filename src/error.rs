//! Error types for source aggregation and chart output.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for algoplot operations.
pub type Result<T> = std::result::Result<T, AlgoPlotError>;

/// Errors that can occur while reading sources or writing the chart.
#[derive(Debug, Error)]
pub enum AlgoPlotError {
    /// A source file could not be opened or read
    #[error("Failed to read source {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The chart could not be rendered
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing an output artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlgoPlotError {
    /// Whether the error is confined to a single source and may be skipped.
    pub fn is_source_error(&self) -> bool {
        matches!(self, AlgoPlotError::SourceUnreadable { .. })
    }
}
