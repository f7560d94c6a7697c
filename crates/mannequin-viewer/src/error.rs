//! Error types for the viewer.

use mannequin_spec::BackendError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for viewer operations.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Errors raised while setting up a viewer session.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Config file could not be read.
    #[error("Failed to read viewer config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`crate::ViewerConfig`].
    #[error("Failed to parse viewer config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl BackendError for ViewerError {
    fn code(&self) -> &'static str {
        match self {
            ViewerError::ConfigRead { .. } => "VIEWER_001",
            ViewerError::ConfigParse { .. } => "VIEWER_002",
        }
    }

    fn category(&self) -> &'static str {
        "viewer"
    }
}
