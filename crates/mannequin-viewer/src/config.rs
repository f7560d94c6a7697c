//! Viewer configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config and
//! yields the procedural viewer with the stock camera and lights.

use glam::Vec3;
use mannequin_backend_model::ScaleStrategy;
use mannequin_spec::{Gender, Rgb};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ViewerError, ViewerResult};

/// Default yaw added to the avatar each frame when no clip is playing.
pub const IDLE_ROTATION_PER_FRAME: f32 = 0.005;

/// Top-level viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// External model per gender. A gender without a path uses the
    /// procedural generator.
    pub models: ModelPaths,
    pub scale_strategy: ScaleStrategy,
    /// Radians of yaw per frame while idle.
    pub idle_rotation_per_frame: f32,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub ground: GroundConfig,
    pub background: Rgb,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            models: ModelPaths::default(),
            scale_strategy: ScaleStrategy::default(),
            idle_rotation_per_frame: IDLE_ROTATION_PER_FRAME,
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            ground: GroundConfig::default(),
            background: Rgb::from_hex(0x1E1B4B),
        }
    }
}

impl ViewerConfig {
    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a config file.
    pub fn from_file(path: &Path) -> ViewerResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ViewerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ViewerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builder-style model path assignment.
    pub fn with_model(mut self, gender: Gender, path: impl Into<PathBuf>) -> Self {
        self.models.set(gender, Some(path.into()));
        self
    }
}

/// Optional external model path per gender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPaths {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub male: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub female: Option<PathBuf>,
}

impl ModelPaths {
    pub fn get(&self, gender: Gender) -> Option<&Path> {
        match gender {
            Gender::Male => self.male.as_deref(),
            Gender::Female => self.female.as_deref(),
        }
    }

    pub fn set(&mut self, gender: Gender, path: Option<PathBuf>) {
        match gender {
            Gender::Male => self.male = path,
            Gender::Female => self.female = path,
        }
    }
}

/// Perspective camera settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub look_at: Vec3,
    /// Re-frame the camera around each loaded external model.
    pub auto_frame: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 1.2, 3.5),
            look_at: Vec3::new(0.0, 1.0, 0.0),
            auto_frame: true,
        }
    }
}

/// Ambient plus one shadow-casting directional light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: Rgb,
    pub ambient_intensity: f32,
    pub directional_color: Rgb,
    pub directional_intensity: f32,
    pub directional_position: Vec3,
    pub shadow_map_size: u32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: Rgb::WHITE,
            ambient_intensity: 0.6,
            directional_color: Rgb::WHITE,
            directional_intensity: 0.8,
            directional_position: Vec3::new(5.0, 10.0, 5.0),
            shadow_map_size: 2048,
        }
    }
}

/// Shadow-receiving ground plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub size: f32,
    pub color: Rgb,
    pub y: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            color: Rgb::from_hex(0xCCCCCC),
            y: 0.0,
        }
    }
}
