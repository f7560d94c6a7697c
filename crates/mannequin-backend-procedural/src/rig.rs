//! Procedural rig builder.
//!
//! Layout of the generated hierarchy:
//!
//! ```text
//! avatar                 (group, lifted so the soles rest on y = 0)
//! ├── torso, neck
//! ├── head               (face parts and hair are children)
//! ├── arm_l / arm_r      (group at the shoulder joint)
//! │   └── shoulder, upper_arm, lower_arm, hand
//! └── leg_l / leg_r      (group at the hip joint)
//!     └── upper_leg, lower_leg, foot
//! ```

use glam::{DVec3, Vec3};
use mannequin_spec::{
    CustomizationParams, DerivedProportions, Geometry, MeshPart, Part, PartHierarchy, Rgb,
    Transform,
};

use crate::chain::{Segment, Side};
use crate::dims::*;
use crate::face::face_parts;
use crate::hair::hair_part;

/// Name of the hierarchy root.
pub const AVATAR_ROOT: &str = "avatar";

/// Scales a base-unit position by the height scale.
pub(crate) fn scaled(base: DVec3, height_scale: f64) -> Vec3 {
    (base * height_scale).as_vec3()
}

/// Scales a base-unit length by the height scale.
pub(crate) fn length(base: f64, height_scale: f64) -> f32 {
    (base * height_scale) as f32
}

/// Builds the procedural avatar for a parameter set.
///
/// Every linear size and offset is `base * height_scale`. The torso radii and
/// the shoulder spacing additionally follow `body_width_factor`; limbs keep
/// their radii at any BMI.
///
/// # Arguments
/// * `params` - Clamped customization parameters (skin color, hair type)
/// * `proportions` - Proportions derived from the same parameters
///
/// # Returns
/// * A fresh hierarchy rooted at [`AVATAR_ROOT`]
pub fn build_procedural_avatar(
    params: &CustomizationParams,
    proportions: &DerivedProportions,
) -> PartHierarchy {
    let hs = proportions.height_scale;
    let bw = proportions.body_width_factor;
    let skin = params.skin_color;

    let mut root = Part::group(AVATAR_ROOT).with_transform(Transform::from_translation(
        Vec3::new(0.0, length(GROUND_LIFT, hs), 0.0),
    ));

    root.push(Part::mesh(
        "torso",
        MeshPart::new(
            Geometry::Cylinder {
                radius_top: length(bw * TORSO_TOP_RADIUS, hs),
                radius_bottom: length(bw * TORSO_BOTTOM_RADIUS, hs),
                height: length(TORSO_HEIGHT, hs),
            },
            skin,
        ),
        scaled(DVec3::new(0.0, TORSO_Y, 0.0), hs),
    ));

    root.push(Part::mesh(
        "neck",
        MeshPart::new(
            Geometry::Cylinder {
                radius_top: length(NECK_RADIUS, hs),
                radius_bottom: length(NECK_RADIUS, hs),
                height: length(NECK_HEIGHT, hs),
            },
            skin,
        ),
        scaled(DVec3::new(0.0, NECK_Y, 0.0), hs),
    ));

    let mut head = Part::mesh(
        "head",
        MeshPart::new(Geometry::sphere(length(HEAD_RADIUS, hs)), skin),
        scaled(DVec3::new(0.0, HEAD_Y, 0.0), hs),
    );
    for part in face_parts(hs) {
        head.push(part);
    }
    if let Some(hair) = hair_part(params.hair_type, hs) {
        head.push(hair);
    }
    root.push(head);

    let shoulder_y = TORSO_Y + TORSO_HEIGHT / 2.0;
    let shoulder_x = bw * SHOULDER_WIDTH_RATIO + SHOULDER_OFFSET;
    for side in Side::BOTH {
        let shoulder = DVec3::new(side.sign() * shoulder_x, shoulder_y, 0.0);
        root.push(build_arm(side, shoulder, hs, skin));
    }

    for side in Side::BOTH {
        let hip = DVec3::new(side.sign() * HIP_X, HIP_Y, 0.0);
        root.push(build_leg(side, hip, hs, skin));
    }

    let hierarchy = PartHierarchy::new(root);
    tracing::debug!(
        parts = hierarchy.part_count(),
        height_scale = hs,
        body_width = bw,
        hair = %params.hair_type,
        "built procedural avatar"
    );
    hierarchy
}

/// Arm group anchored at the shoulder joint; segment positions are relative
/// to the shoulder.
fn build_arm(side: Side, shoulder: DVec3, hs: f64, skin: Rgb) -> Part {
    let s = side.suffix();
    let upper = Segment::hanging(DVec3::ZERO, UPPER_ARM_LENGTH, UPPER_ARM_ANGLE, side);
    let fore = upper.then(FOREARM_LENGTH, FOREARM_ANGLE, side);

    Part::group(format!("arm_{s}"))
        .with_transform(Transform::from_translation(scaled(shoulder, hs)))
        .with_child(Part::mesh(
            format!("shoulder_{s}"),
            MeshPart::new(Geometry::sphere(length(SHOULDER_RADIUS, hs)), skin),
            Vec3::ZERO,
        ))
        .with_child(segment_part(
            format!("upper_arm_{s}"),
            &upper,
            UPPER_ARM_RADIUS,
            UPPER_ARM_RADIUS,
            hs,
            skin,
        ))
        .with_child(segment_part(
            format!("lower_arm_{s}"),
            &fore,
            FOREARM_RADIUS_TOP,
            FOREARM_RADIUS_BOTTOM,
            hs,
            skin,
        ))
        .with_child(Part::mesh(
            format!("hand_{s}"),
            MeshPart::new(Geometry::sphere(length(HAND_RADIUS, hs)), skin),
            scaled(fore.end, hs),
        ))
}

/// Leg group anchored at the hip joint.
fn build_leg(side: Side, hip: DVec3, hs: f64, skin: Rgb) -> Part {
    let s = side.suffix();
    let upper = Segment::hanging(DVec3::ZERO, UPPER_LEG_LENGTH, 0.0, side);
    let lower = upper.then(LOWER_LEG_LENGTH, 0.0, side);
    let foot = lower.end + DVec3::new(0.0, -FOOT_HEIGHT / 2.0, FOOT_FORWARD);

    Part::group(format!("leg_{s}"))
        .with_transform(Transform::from_translation(scaled(hip, hs)))
        .with_child(segment_part(
            format!("upper_leg_{s}"),
            &upper,
            UPPER_LEG_RADIUS_TOP,
            UPPER_LEG_RADIUS_BOTTOM,
            hs,
            skin,
        ))
        .with_child(segment_part(
            format!("lower_leg_{s}"),
            &lower,
            LOWER_LEG_RADIUS_TOP,
            LOWER_LEG_RADIUS_BOTTOM,
            hs,
            skin,
        ))
        .with_child(Part::mesh(
            format!("foot_{s}"),
            MeshPart::new(
                Geometry::Box {
                    width: length(FOOT_WIDTH, hs),
                    height: length(FOOT_HEIGHT, hs),
                    depth: length(FOOT_DEPTH, hs),
                },
                FOOT_COLOR,
            ),
            scaled(foot, hs),
        ))
}

/// Cylinder spanning a segment, centered on its midpoint.
fn segment_part(
    name: String,
    segment: &Segment,
    radius_top: f64,
    radius_bottom: f64,
    hs: f64,
    color: Rgb,
) -> Part {
    Part::mesh(
        name,
        MeshPart::new(
            Geometry::Cylinder {
                radius_top: length(radius_top, hs),
                radius_bottom: length(radius_bottom, hs),
                height: length(segment.length, hs),
            },
            color,
        ),
        scaled(segment.midpoint(), hs),
    )
    .with_rotation(segment.rotation())
}
