//! The scene root: the single attachment point for the active avatar.

use mannequin_backend_model::AnimationPlayer;
use mannequin_spec::PartHierarchy;
use std::path::PathBuf;

use crate::render::RenderBackend;

/// Which generator produced the attached avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarSource {
    Procedural,
    Model(PathBuf),
}

impl std::fmt::Display for AvatarSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvatarSource::Procedural => f.write_str("procedural"),
            AvatarSource::Model(path) => write!(f, "model:{}", path.display()),
        }
    }
}

/// An avatar hierarchy owned by the scene root.
#[derive(Debug, Clone)]
pub struct AttachedAvatar {
    pub source: AvatarSource,
    pub hierarchy: PartHierarchy,
    /// Clip playback bound to this hierarchy, if it has clips.
    pub player: Option<AnimationPlayer>,
}

impl AttachedAvatar {
    pub fn procedural(hierarchy: PartHierarchy) -> Self {
        Self {
            source: AvatarSource::Procedural,
            hierarchy,
            player: None,
        }
    }
}

/// Holds at most one avatar plus the idle-rotation yaw.
///
/// The yaw belongs to the root, not to the avatar, so a rebuild does not
/// reset the rotation.
#[derive(Debug, Default)]
pub struct SceneRoot {
    current: Option<AttachedAvatar>,
    yaw: f32,
}

impl SceneRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&AttachedAvatar> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut AttachedAvatar> {
        self.current.as_mut()
    }

    /// Number of attached hierarchies; never more than one.
    pub fn child_count(&self) -> usize {
        usize::from(self.current.is_some())
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Adds `radians` of yaw to the avatar anchor.
    pub fn rotate(&mut self, radians: f32) {
        self.yaw = (self.yaw + radians) % std::f32::consts::TAU;
    }

    /// Attaches `next` and releases the previous avatar in the same step.
    ///
    /// The new hierarchy is fully built before this is called; the old one
    /// is detached, its playback stopped and its resources disposed before
    /// returning.
    pub fn swap(&mut self, next: AttachedAvatar, backend: &mut dyn RenderBackend) {
        backend.add_child(&next.hierarchy);
        if let Some(old) = self.current.replace(next) {
            release(old, backend);
        }
    }

    /// Detaches and disposes the current avatar, if any.
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(old) = self.current.take() {
            release(old, backend);
        }
    }
}

fn release(mut old: AttachedAvatar, backend: &mut dyn RenderBackend) {
    if let Some(player) = old.player.as_mut() {
        player.stop_all();
    }
    backend.remove_child(&old.hierarchy);
    backend.dispose(old.hierarchy.resources());
    tracing::debug!(source = %old.source, "released avatar");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingBackend;
    use glam::Vec3;
    use mannequin_spec::{Geometry, MeshPart, Part, Rgb};

    fn avatar(meshes: usize) -> AttachedAvatar {
        let mut root = Part::group("avatar");
        for i in 0..meshes {
            root.push(Part::mesh(
                format!("p{}", i),
                MeshPart::new(Geometry::sphere(1.0), Rgb::WHITE),
                Vec3::ZERO,
            ));
        }
        AttachedAvatar::procedural(PartHierarchy::new(root))
    }

    #[test]
    fn test_swap_keeps_one_child_and_disposes() {
        let mut backend = RecordingBackend::default();
        let mut root = SceneRoot::new();

        root.swap(avatar(3), &mut backend);
        root.swap(avatar(5), &mut backend);
        root.swap(avatar(2), &mut backend);

        assert_eq!(root.child_count(), 1);
        assert_eq!(backend.attached, 1);
        assert_eq!(backend.live.geometries, 2);
        assert_eq!(backend.disposals, 2);

        root.clear(&mut backend);
        assert_eq!(root.child_count(), 0);
        assert_eq!(backend.live.geometries, 0);
    }

    #[test]
    fn test_yaw_survives_swap() {
        let mut backend = RecordingBackend::default();
        let mut root = SceneRoot::new();
        root.swap(avatar(1), &mut backend);
        root.rotate(0.5);
        root.swap(avatar(1), &mut backend);
        assert_eq!(root.yaw(), 0.5);
    }
}
