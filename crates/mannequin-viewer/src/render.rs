//! Render collaborator interface.
//!
//! The viewer never draws anything itself. A [`RenderBackend`] receives the
//! scene root's attach/detach/dispose notifications, the camera and lights,
//! and one `render` call per frame.

use glam::Vec3;
use mannequin_spec::{PartHierarchy, ResourceCount, Rgb};

use crate::config::{CameraConfig, GroundConfig, LightingConfig};
use crate::scene_root::SceneRoot;

/// Perspective camera pose and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Camera {
    /// The configured default pose.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            fov_deg: config.fov_deg,
            near: config.near,
            far: config.far,
            position: config.position,
            target: config.look_at,
        }
    }

    /// Frames a grounded model of the given height.
    ///
    /// The eye sits at 60% of the model height, at a distance of 2.5 model
    /// heights (never closer than 3 units), looking at 30% of the height.
    pub fn framing(&self, model_height: f32) -> Self {
        let distance = (model_height * 2.5).max(3.0);
        Self {
            position: Vec3::new(0.0, model_height * 0.6, distance),
            target: Vec3::new(0.0, model_height * 0.3, 0.0),
            ..*self
        }
    }
}

/// Scene-graph renderer consumed by the viewer.
pub trait RenderBackend {
    /// Sets up lights, ground and background once per session.
    fn configure(&mut self, lighting: &LightingConfig, ground: &GroundConfig, background: Rgb);

    fn set_camera(&mut self, camera: &Camera);

    /// A hierarchy was added under the scene root.
    fn add_child(&mut self, hierarchy: &PartHierarchy);

    /// A hierarchy was removed from the scene root.
    fn remove_child(&mut self, hierarchy: &PartHierarchy);

    /// Releases the geometry and material resources of a removed hierarchy.
    fn dispose(&mut self, resources: ResourceCount);

    /// Draws one frame.
    fn render(&mut self, root: &SceneRoot);
}

/// Backend that records calls instead of drawing. Used by the CLI session
/// command and by tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    /// Hierarchies currently attached.
    pub attached: usize,
    /// Resources uploaded and not yet disposed.
    pub live: ResourceCount,
    pub adds: usize,
    pub removes: usize,
    pub disposals: usize,
    pub frames: usize,
    pub camera: Option<Camera>,
    pub configured: bool,
    /// Avatar yaw seen by the last rendered frame.
    pub last_yaw: f32,
}

impl RenderBackend for RecordingBackend {
    fn configure(&mut self, _lighting: &LightingConfig, _ground: &GroundConfig, _background: Rgb) {
        self.configured = true;
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.camera = Some(*camera);
    }

    fn add_child(&mut self, hierarchy: &PartHierarchy) {
        self.attached += 1;
        self.live = self.live + hierarchy.resources();
        self.adds += 1;
    }

    fn remove_child(&mut self, _hierarchy: &PartHierarchy) {
        self.attached = self.attached.saturating_sub(1);
        self.removes += 1;
    }

    fn dispose(&mut self, resources: ResourceCount) {
        self.live.geometries = self.live.geometries.saturating_sub(resources.geometries);
        self.live.materials = self.live.materials.saturating_sub(resources.materials);
        self.disposals += 1;
    }

    fn render(&mut self, root: &SceneRoot) {
        self.frames += 1;
        self.last_yaw = root.yaw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_minimum_distance() {
        let base = Camera::from_config(&CameraConfig::default());
        let small = base.framing(1.0);
        assert_eq!(small.position, Vec3::new(0.0, 0.6, 3.0));
        assert_eq!(small.target, Vec3::new(0.0, 0.3, 0.0));
        assert_eq!(small.fov_deg, 50.0);

        let tall = base.framing(2.0);
        assert_eq!(tall.position.z, 5.0);
    }
}
