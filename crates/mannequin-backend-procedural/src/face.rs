//! Eyes, pupils and mouth, placed relative to the head center.

use glam::{DVec3, Quat};
use mannequin_spec::{Geometry, MeshPart, Part, Rgb};
use std::f32::consts::PI;

use crate::chain::Side;
use crate::dims::*;
use crate::rig::{length, scaled};

/// Builds the face parts for a head of the given height scale.
pub fn face_parts(height_scale: f64) -> Vec<Part> {
    let mut parts = Vec::with_capacity(5);

    for side in Side::BOTH {
        let eye = DVec3::new(side.sign() * EYE_OFFSET[0], EYE_OFFSET[1], EYE_OFFSET[2]);
        parts.push(Part::mesh(
            format!("eye_{}", side.suffix()),
            MeshPart::new(
                Geometry::sphere(length(EYE_RADIUS, height_scale)),
                Rgb::WHITE,
            )
            .without_shadow(),
            scaled(eye, height_scale),
        ));

        let pupil = DVec3::new(
            side.sign() * PUPIL_OFFSET[0],
            PUPIL_OFFSET[1],
            PUPIL_OFFSET[2],
        );
        parts.push(Part::mesh(
            format!("pupil_{}", side.suffix()),
            MeshPart::new(
                Geometry::sphere(length(PUPIL_RADIUS, height_scale)),
                Rgb::BLACK,
            )
            .without_shadow(),
            scaled(pupil, height_scale),
        ));
    }

    // Half torus flipped about X so the arc opens upward into a smile.
    let mouth = Part::mesh(
        "mouth",
        MeshPart::new(
            Geometry::Torus {
                radius: length(MOUTH_RADIUS, height_scale),
                tube: length(MOUTH_TUBE, height_scale),
                arc: PI,
            },
            MOUTH_COLOR,
        )
        .without_shadow(),
        scaled(DVec3::from_array(MOUTH_OFFSET), height_scale),
    )
    .with_rotation(Quat::from_rotation_x(PI));
    parts.push(mouth);

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn find<'a>(parts: &'a [Part], name: &str) -> &'a Part {
        parts.iter().find(|p| p.name == name).unwrap()
    }

    fn offset(base: [f64; 3], x_sign: f64, hs: f64) -> Vec3 {
        DVec3::new(x_sign * base[0], base[1], base[2]).as_vec3() * hs as f32
    }

    #[test]
    fn test_features_offset_from_head_center() {
        for hs in [0.8, 1.0, 200.0 / 170.0] {
            let parts = face_parts(hs);
            assert_eq!(parts.len(), 5);
            for (side, sign) in [("l", -1.0), ("r", 1.0)] {
                let eye = find(&parts, &format!("eye_{}", side));
                let pupil = find(&parts, &format!("pupil_{}", side));
                assert!(eye.transform.translation.abs_diff_eq(offset(EYE_OFFSET, sign, hs), 1e-6));
                assert!(pupil
                    .transform
                    .translation
                    .abs_diff_eq(offset(PUPIL_OFFSET, sign, hs), 1e-6));
                assert_eq!(
                    eye.mesh.unwrap().geometry,
                    Geometry::sphere(length(EYE_RADIUS, hs))
                );
            }
            let mouth = find(&parts, "mouth");
            assert!(mouth
                .transform
                .translation
                .abs_diff_eq(offset(MOUTH_OFFSET, 1.0, hs), 1e-6));
        }
    }

    #[test]
    fn test_pupils_sit_in_front_of_eyes() {
        let parts = face_parts(1.0);
        let eye = find(&parts, "eye_r").transform.translation;
        let pupil = find(&parts, "pupil_r").transform.translation;
        assert!(pupil.z > eye.z);
        assert_eq!(find(&parts, "pupil_r").mesh.unwrap().material.color, Rgb::BLACK);
    }

    #[test]
    fn test_mouth_flipped_half_torus() {
        let parts = face_parts(1.0);
        let mouth = find(&parts, "mouth");
        assert!(mouth
            .transform
            .rotation
            .abs_diff_eq(Quat::from_rotation_x(PI), 1e-6));
        let mesh = mouth.mesh.unwrap();
        assert_eq!(mesh.material.color, MOUTH_COLOR);
        assert!(matches!(mesh.geometry, Geometry::Torus { arc, .. } if arc == PI));
        assert!(!mesh.casts_shadow);
    }
}
