//! Asset-loading collaborator.

use futures_util::future::{BoxFuture, FutureExt};
use mannequin_backend_model::{load_model_as, ExternalModelAsset, ModelFormat, ModelResult};
use std::path::PathBuf;

/// Loads a model of an already-detected format.
///
/// The returned future runs on the async runtime, off the frame loop.
pub trait ModelLoader: Send + Sync + 'static {
    fn load(&self, path: PathBuf, format: ModelFormat)
        -> BoxFuture<'static, ModelResult<ExternalModelAsset>>;
}

/// Loads glTF-family files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsModelLoader;

impl ModelLoader for FsModelLoader {
    fn load(
        &self,
        path: PathBuf,
        format: ModelFormat,
    ) -> BoxFuture<'static, ModelResult<ExternalModelAsset>> {
        load_model_as(path, format).boxed()
    }
}
