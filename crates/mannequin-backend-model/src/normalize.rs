//! Bounding-box normalization: rescale, recenter and ground a model copy.

use glam::Vec3;
use mannequin_spec::{Aabb, PartHierarchy, Transform};
use serde::{Deserialize, Serialize};

use crate::error::NormalizeWarning;

/// Height, in scene units, of a reference-height (170 cm) model.
pub const REFERENCE_HEIGHT_UNITS: f32 = 1.7;
/// Fixed scale for assets authored in very large units.
pub const FIXED_MICRO_SCALE: f32 = 0.0005;
/// Largest dimension below which a bounding box counts as degenerate.
pub const DEGENERATE_EXTENT: f32 = 1e-6;

/// How the base scale of an external model is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleStrategy {
    /// Largest dimension maps to [`REFERENCE_HEIGHT_UNITS`].
    #[default]
    ReferenceHeight,
    /// Constant [`FIXED_MICRO_SCALE`] regardless of asset size.
    FixedMicro,
}

impl ScaleStrategy {
    /// Base scale for an asset with the given natural bounds, before the
    /// height scale is applied. `None` when the bounds are degenerate.
    pub fn base_scale(&self, natural: &Aabb) -> Option<f32> {
        let extent = natural.max_extent();
        if natural.is_empty() || !extent.is_finite() || extent < DEGENERATE_EXTENT {
            return None;
        }
        Some(match self {
            ScaleStrategy::ReferenceHeight => REFERENCE_HEIGHT_UNITS / extent,
            ScaleStrategy::FixedMicro => FIXED_MICRO_SCALE,
        })
    }
}

/// What normalization did to a model copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizeReport {
    /// Bounds of the unmodified asset.
    pub natural_bounds: Aabb,
    /// Uniform scale applied to the root.
    pub scale: f32,
    /// Translation applied to the root after scaling.
    pub translation: Vec3,
    /// Bounds after normalization.
    pub final_bounds: Aabb,
    pub warnings: Vec<NormalizeWarning>,
}

/// Normalizes a model copy in place.
///
/// The root keeps its authored rotation and scale; the scale is multiplied
/// by the uniform factor `base * height_scale`. The root translation is
/// replaced by one that centers the model on X/Z and puts its lowest point on
/// `y = 0`. The recentering uses bounds recomputed after scaling. Every mesh
/// part is set to cast and receive shadows.
///
/// # Arguments
/// * `hierarchy` - The per-cycle copy to modify
/// * `natural_bounds` - Bounds of the unmodified asset
/// * `height_scale` - `height_cm / 170`
/// * `strategy` - Base scale strategy
pub fn normalize(
    hierarchy: &mut PartHierarchy,
    natural_bounds: &Aabb,
    height_scale: f64,
    strategy: ScaleStrategy,
) -> NormalizeReport {
    let mut warnings = Vec::new();

    let scale = match strategy.base_scale(natural_bounds) {
        Some(base) => base * height_scale as f32,
        None => {
            let warning = if natural_bounds.is_empty() {
                NormalizeWarning::EmptyBounds
            } else {
                NormalizeWarning::DegenerateGeometry {
                    max_extent: natural_bounds.max_extent(),
                }
            };
            tracing::warn!(%warning, "model normalization fallback");
            warnings.push(warning);
            1.0
        }
    };

    let authored = hierarchy.root.transform;
    hierarchy.root.transform = Transform::IDENTITY
        .with_rotation(authored.rotation)
        .with_scale(authored.scale * scale);

    let scaled = hierarchy.world_bounds();
    let translation = if scaled.is_empty() {
        Vec3::ZERO
    } else {
        let center = scaled.center();
        Vec3::new(-center.x, -scaled.min.y, -center.z)
    };
    hierarchy.root.transform.translation = translation;

    hierarchy.walk_mut(|part| {
        if let Some(mesh) = part.mesh.as_mut() {
            mesh.casts_shadow = true;
            mesh.receives_shadow = true;
        }
    });

    let final_bounds = hierarchy.world_bounds();
    tracing::debug!(scale, ?translation, "normalized model");

    NormalizeReport {
        natural_bounds: *natural_bounds,
        scale,
        translation,
        final_bounds,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mannequin_spec::{Geometry, MeshPart, Part, Rgb};

    fn model(min: Vec3, max: Vec3) -> PartHierarchy {
        PartHierarchy::new(Part::group("model").with_child(Part::mesh(
            "Body",
            MeshPart {
                geometry: Geometry::Mesh {
                    bounds: Aabb::new(min, max),
                    vertex_count: 8,
                    triangle_count: 12,
                },
                ..MeshPart::new(Geometry::sphere(1.0), Rgb::WHITE)
            },
            Vec3::ZERO,
        )))
    }

    #[test]
    fn test_reference_height_scaling() {
        let mut h = model(Vec3::new(10.0, 5.0, -3.0), Vec3::new(50.0, 345.0, 17.0));
        let natural = h.world_bounds();
        let report = normalize(&mut h, &natural, 1.0, ScaleStrategy::ReferenceHeight);

        assert!((report.scale - 1.7 / 340.0).abs() < 1e-9);
        let b = report.final_bounds;
        assert!((b.size().y - 1.7).abs() < 1e-4);
        assert!(b.min.y.abs() < 1e-5);
        assert!(b.center().x.abs() < 1e-5);
        assert!(b.center().z.abs() < 1e-5);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_authored_root_scale_is_kept() {
        let mut h = model(Vec3::ZERO, Vec3::new(40.0, 18000.0, 30.0));
        h.root.transform = h.root.transform.with_scale(Vec3::splat(0.01));
        let natural = h.world_bounds();
        assert!((natural.size().y - 180.0).abs() < 1e-3);

        let report = normalize(&mut h, &natural, 1.0, ScaleStrategy::ReferenceHeight);
        assert!((report.scale - 1.7 / 180.0).abs() < 1e-7);
        assert!((h.root.transform.scale.y - 0.01 * report.scale).abs() < 1e-9);
        assert!((report.final_bounds.size().y - 1.7).abs() < 1e-4);
        assert!(report.final_bounds.min.y.abs() < 1e-5);
    }

    #[test]
    fn test_height_scale_multiplies() {
        let mut h = model(Vec3::ZERO, Vec3::new(1.0, 2.0, 1.0));
        let natural = h.world_bounds();
        let report = normalize(&mut h, &natural, 200.0 / 170.0, ScaleStrategy::ReferenceHeight);
        assert!((report.final_bounds.size().y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_fixed_micro() {
        let mut h = model(Vec3::ZERO, Vec3::new(1000.0, 3400.0, 500.0));
        let natural = h.world_bounds();
        let report = normalize(&mut h, &natural, 1.0, ScaleStrategy::FixedMicro);
        assert_eq!(report.scale, FIXED_MICRO_SCALE);
        assert!((report.final_bounds.size().y - 1.7).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_uses_identity() {
        let mut h = model(Vec3::ONE, Vec3::ONE);
        let natural = h.world_bounds();
        let report = normalize(&mut h, &natural, 1.0, ScaleStrategy::ReferenceHeight);
        assert_eq!(report.scale, 1.0);
        assert!(matches!(
            report.warnings[0],
            NormalizeWarning::DegenerateGeometry { .. }
        ));
        assert!(report.final_bounds.min.y.abs() < 1e-6);
    }

    #[test]
    fn test_empty_model_not_recentered() {
        let mut h = PartHierarchy::new(Part::group("empty"));
        let natural = h.world_bounds();
        let report = normalize(&mut h, &natural, 1.0, ScaleStrategy::ReferenceHeight);
        assert_eq!(report.translation, Vec3::ZERO);
        assert_eq!(report.warnings, vec![NormalizeWarning::EmptyBounds]);
    }

    #[test]
    fn test_shadows_enabled() {
        let mut h = model(Vec3::ZERO, Vec3::ONE);
        let natural = h.world_bounds();
        normalize(&mut h, &natural, 1.0, ScaleStrategy::ReferenceHeight);
        let mesh = h.find("Body").unwrap().mesh.unwrap();
        assert!(mesh.casts_shadow && mesh.receives_shadow);
    }
}
