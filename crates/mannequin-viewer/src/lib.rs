//! Mannequin Viewer
//!
//! Drives one avatar on a scene root: picks the procedural or external-model
//! generator per gender, loads models asynchronously with a cache per path,
//! discards loads that finish after a newer request, swaps hierarchies so
//! exactly one is attached, and spins the avatar while idle.
//!
//! Rendering is delegated to a [`RenderBackend`]; model decoding to a
//! [`ModelLoader`].

pub mod config;
pub mod error;
pub mod loader;
pub mod render;
pub mod scene_root;
pub mod session;

pub use config::{
    CameraConfig, GroundConfig, LightingConfig, ModelPaths, ViewerConfig, IDLE_ROTATION_PER_FRAME,
};
pub use error::{ViewerError, ViewerResult};
pub use loader::{FsModelLoader, ModelLoader};
pub use render::{Camera, RecordingBackend, RenderBackend};
pub use scene_root::{AttachedAvatar, AvatarSource, SceneRoot};
pub use session::{AvatarSession, SessionEvent};
