//! Hair style dispatch.

use glam::{DVec3, Vec3};
use mannequin_spec::{Geometry, HairType, MeshPart, Part, Transform};
use std::f64::consts::TAU;

use crate::dims::*;
use crate::rig::{length, scaled};

/// Name of the hair branch in the hierarchy.
pub const HAIR_PART: &str = "hair";

/// Vertical squash of the short-hair sphere.
pub const SHORT_HAIR_SQUASH: f32 = 0.75;

/// Builds the hair branch for a style, centered on the head.
///
/// Returns `None` for bald. Every other style yields exactly one part named
/// [`HAIR_PART`]: a single mesh, or for curly a group of curls.
pub fn hair_part(hair_type: HairType, height_scale: f64) -> Option<Part> {
    let color = hair_type.color();
    let cylinder = |height: f64| Geometry::Cylinder {
        radius_top: length(HAIR_RADIUS, height_scale),
        radius_bottom: length(HAIR_BOTTOM_RADIUS, height_scale),
        height: length(height, height_scale),
    };

    let part = match hair_type {
        HairType::Bald => return None,
        HairType::Short => Part::mesh(
            HAIR_PART,
            MeshPart::new(Geometry::sphere(length(HAIR_RADIUS, height_scale)), color),
            Vec3::ZERO,
        )
        .with_transform(
            Transform::IDENTITY.with_scale(Vec3::new(1.0, SHORT_HAIR_SQUASH, 1.0)),
        ),
        HairType::Medium => Part::mesh(
            HAIR_PART,
            MeshPart::new(cylinder(MEDIUM_HAIR_LENGTH), color),
            Vec3::ZERO,
        ),
        HairType::Long => Part::mesh(
            HAIR_PART,
            MeshPart::new(cylinder(LONG_HAIR_LENGTH), color),
            Vec3::ZERO,
        ),
        HairType::Curly => {
            let mut group = Part::group(HAIR_PART);
            for i in 0..CURL_COUNT {
                let angle = i as f64 / CURL_COUNT as f64 * TAU;
                let offset = DVec3::new(
                    angle.cos() * CURL_RING_RADIUS,
                    CURL_RING_HEIGHT,
                    angle.sin() * CURL_RING_RADIUS,
                );
                group.push(Part::mesh(
                    format!("hair_curl_{:02}", i),
                    MeshPart::new(Geometry::sphere(length(CURL_RADIUS, height_scale)), color),
                    scaled(offset, height_scale),
                ));
            }
            group
        }
    };
    Some(part)
}
