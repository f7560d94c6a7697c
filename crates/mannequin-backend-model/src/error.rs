//! Error and warning types for the external model backend.

use mannequin_spec::BackendError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for model backend operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while loading an external model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// File extension is not one of gltf, glb, fbx.
    #[error("Unsupported file format '{extension}' for {path}. Expected one of: gltf, glb, fbx")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The asset could not be read or decoded.
    #[error("Failed to load model {path}: {cause}")]
    AssetLoad { path: PathBuf, cause: String },

    /// The background load task was cancelled or panicked.
    #[error("Model load task for {path} did not complete: {cause}")]
    LoadAborted { path: PathBuf, cause: String },
}

impl ModelError {
    /// Creates a new asset load error.
    pub fn asset_load(path: impl Into<PathBuf>, cause: impl ToString) -> Self {
        Self::AssetLoad {
            path: path.into(),
            cause: cause.to_string(),
        }
    }

    /// Path of the asset the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ModelError::UnsupportedFormat { path, .. }
            | ModelError::AssetLoad { path, .. }
            | ModelError::LoadAborted { path, .. } => path,
        }
    }
}

impl BackendError for ModelError {
    fn code(&self) -> &'static str {
        match self {
            ModelError::UnsupportedFormat { .. } => "MODEL_001",
            ModelError::AssetLoad { .. } => "MODEL_002",
            ModelError::LoadAborted { .. } => "MODEL_003",
        }
    }

    fn category(&self) -> &'static str {
        "model"
    }
}

/// Non-fatal conditions found while normalizing a model.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizeWarning {
    /// The asset's bounding box has (near) zero size; the scale falls back to
    /// identity.
    DegenerateGeometry { max_extent: f32 },
    /// The asset has no mesh geometry at all; recentering is skipped.
    EmptyBounds,
}

impl NormalizeWarning {
    pub fn code(&self) -> &'static str {
        match self {
            NormalizeWarning::DegenerateGeometry { .. } => "W_MODEL_001",
            NormalizeWarning::EmptyBounds => "W_MODEL_002",
        }
    }
}

impl std::fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeWarning::DegenerateGeometry { max_extent } => write!(
                f,
                "{}: degenerate bounding box (max extent {}), using identity scale",
                self.code(),
                max_extent
            ),
            NormalizeWarning::EmptyBounds => {
                write!(f, "{}: model has no geometry, not recentered", self.code())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::UnsupportedFormat {
            path: PathBuf::from("model.obj"),
            extension: "obj".into(),
        };
        assert!(err.to_string().contains("Unsupported file format 'obj'"));
        assert_eq!(err.code(), "MODEL_001");
        assert_eq!(err.category(), "model");

        let err = ModelError::asset_load("male.glb", "file not found");
        assert!(err.to_string().contains("file not found"));
        assert_eq!(err.path(), std::path::Path::new("male.glb"));
    }

    #[test]
    fn test_warning_display() {
        let w = NormalizeWarning::DegenerateGeometry { max_extent: 0.0 };
        assert!(w.to_string().starts_with("W_MODEL_001"));
    }
}
