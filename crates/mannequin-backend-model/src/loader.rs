//! Asynchronous model loading.

use std::path::{Path, PathBuf};

use crate::asset::ExternalModelAsset;
use crate::error::{ModelError, ModelResult};
use crate::format::{detect_format, ModelFormat};
use crate::gltf_loader::read_gltf;

/// Loads a model from disk without blocking the calling task.
///
/// The format is checked first; an unsupported extension fails before any
/// file access. glTF-family files are decoded on the blocking thread pool.
/// FBX is recognized but has no built-in decoder, so it fails with
/// [`ModelError::AssetLoad`]; supply a custom loader to handle it.
pub async fn load_model(path: impl AsRef<Path>) -> ModelResult<ExternalModelAsset> {
    let path = path.as_ref().to_path_buf();
    let format = detect_format(&path)?;
    load_model_as(path, format).await
}

/// Loads a model whose format has already been determined.
pub async fn load_model_as(path: PathBuf, format: ModelFormat) -> ModelResult<ExternalModelAsset> {
    if !format.is_gltf_family() {
        return Err(ModelError::asset_load(
            &path,
            format!("no built-in decoder for {} files", format),
        ));
    }

    tracing::info!(path = %path.display(), %format, "loading model");
    let task_path = path.clone();
    let result = tokio::task::spawn_blocking(move || read_gltf(&task_path, format))
        .await
        .map_err(|e| ModelError::LoadAborted {
            path: path.clone(),
            cause: e.to_string(),
        })?;

    match &result {
        Ok(asset) => tracing::info!(
            path = %path.display(),
            parts = asset.hierarchy().part_count(),
            clips = asset.clips().len(),
            "model loaded"
        ),
        Err(e) => tracing::error!(path = %path.display(), error = %e, "model load failed"),
    }
    result
}
