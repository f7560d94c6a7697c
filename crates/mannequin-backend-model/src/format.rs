//! Model format detection from file extensions.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ModelError, ModelResult};

/// Supported external model container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// glTF JSON with external or embedded buffers.
    Gltf,
    /// Binary glTF.
    Glb,
    /// Autodesk FBX.
    Fbx,
}

impl ModelFormat {
    pub const ALL: [ModelFormat; 3] = [ModelFormat::Gltf, ModelFormat::Glb, ModelFormat::Fbx];

    pub fn extension(&self) -> &'static str {
        match self {
            ModelFormat::Gltf => "gltf",
            ModelFormat::Glb => "glb",
            ModelFormat::Fbx => "fbx",
        }
    }

    /// Whether the format belongs to the glTF family (skeletons and embedded
    /// clips supported).
    pub fn is_gltf_family(&self) -> bool {
        matches!(self, ModelFormat::Gltf | ModelFormat::Glb)
    }

    /// Matches an extension case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let lower = ext.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.extension() == lower)
    }
}

impl std::fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Detects the format of a model path from its extension.
///
/// Fails with [`ModelError::UnsupportedFormat`] without touching the file.
pub fn detect_format(path: &Path) -> ModelResult<ModelFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    ModelFormat::from_extension(extension).ok_or_else(|| ModelError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: extension.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("a/male.glb")).unwrap(), ModelFormat::Glb);
        assert_eq!(detect_format(Path::new("F.GLTF")).unwrap(), ModelFormat::Gltf);
        assert_eq!(detect_format(Path::new("x.Fbx")).unwrap(), ModelFormat::Fbx);
    }

    #[test]
    fn test_unsupported() {
        let err = detect_format(Path::new("model.obj")).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedFormat { ref extension, .. } if extension == "obj"));
        assert!(detect_format(Path::new("noext")).is_err());
    }

    #[test]
    fn test_family() {
        assert!(ModelFormat::Glb.is_gltf_family());
        assert!(!ModelFormat::Fbx.is_gltf_family());
    }
}
