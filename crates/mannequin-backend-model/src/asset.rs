//! Loaded external model assets.

use mannequin_spec::{Aabb, PartHierarchy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::format::ModelFormat;

/// A named animation clip embedded in a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub duration_secs: f32,
}

/// An externally authored model, as loaded from disk.
///
/// The asset is immutable once loaded and may be shared between cycles;
/// every generation cycle works on its own [`instantiate`](Self::instantiate)
/// copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalModelAsset {
    path: PathBuf,
    format: ModelFormat,
    hierarchy: PartHierarchy,
    clips: Vec<AnimationClip>,
    skin_count: usize,
    natural_bounds: Aabb,
}

impl ExternalModelAsset {
    /// Wraps a loaded hierarchy. The natural bounds are computed here, from
    /// the unmodified rest pose.
    pub fn new(
        path: impl Into<PathBuf>,
        format: ModelFormat,
        hierarchy: PartHierarchy,
        clips: Vec<AnimationClip>,
    ) -> Self {
        let natural_bounds = hierarchy.world_bounds();
        Self {
            path: path.into(),
            format,
            hierarchy,
            clips,
            skin_count: 0,
            natural_bounds,
        }
    }

    pub fn with_skin_count(mut self, skin_count: usize) -> Self {
        self.skin_count = skin_count;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ModelFormat {
        self.format
    }

    /// The pristine hierarchy. Never mutated after load.
    pub fn hierarchy(&self) -> &PartHierarchy {
        &self.hierarchy
    }

    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }

    pub fn has_clips(&self) -> bool {
        !self.clips.is_empty()
    }

    /// Number of skeletons (skins) in the asset.
    pub fn skin_count(&self) -> usize {
        self.skin_count
    }

    /// World bounds of the unmodified asset.
    pub fn natural_bounds(&self) -> Aabb {
        self.natural_bounds
    }

    /// A fresh copy of the hierarchy for one generation cycle.
    pub fn instantiate(&self) -> PartHierarchy {
        self.hierarchy.clone()
    }
}
