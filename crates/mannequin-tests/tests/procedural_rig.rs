//! Integration tests for the procedural avatar generator.

use glam::Vec3;
use pretty_assertions::assert_eq;

use mannequin_backend_procedural::dims::{
    FOREARM_LENGTH, LOWER_LEG_LENGTH, UPPER_ARM_LENGTH, UPPER_LEG_LENGTH,
};
use mannequin_backend_procedural::{build_procedural_avatar, AVATAR_ROOT, HAIR_PART};
use mannequin_spec::{
    derive_proportions, hierarchy_fingerprint, CustomizationParams, DerivedProportions, Geometry,
    HairType, PartHierarchy, CURLY_HAIR_COLOR, HAIR_COLOR,
};

fn build(params: &CustomizationParams) -> PartHierarchy {
    build_procedural_avatar(params, &derive_proportions(params))
}

fn world_position(h: &PartHierarchy, name: &str) -> Vec3 {
    h.world_matrix(name)
        .unwrap_or_else(|| panic!("missing part {}", name))
        .transform_point3(Vec3::ZERO)
}

/// World position of a point on a part's local Y axis.
fn along_axis(h: &PartHierarchy, name: &str, local_y: f32) -> Vec3 {
    h.world_matrix(name)
        .unwrap_or_else(|| panic!("missing part {}", name))
        .transform_point3(Vec3::new(0.0, local_y, 0.0))
}

fn assert_close(a: Vec3, b: Vec3, what: &str) {
    assert!(a.abs_diff_eq(b, 1e-5), "{}: {:?} vs {:?}", what, a, b);
}

// ============================================================================
// Height scaling
// ============================================================================

#[test]
fn test_every_dimension_scales_with_height() {
    let params = CustomizationParams::default();
    let full = build_procedural_avatar(&params, &DerivedProportions::reference());
    let half = build_procedural_avatar(
        &params,
        &DerivedProportions::reference().with_height_scale(0.5),
    );

    let mut names = Vec::new();
    full.walk(|part, _, _| {
        if part.mesh.is_some() {
            names.push(part.name.clone());
        }
    });
    assert!(names.len() > 20);

    for name in &names {
        let a = full.find(name).unwrap().mesh.unwrap().geometry.linear_dimensions();
        let b = half.find(name).unwrap().mesh.unwrap().geometry.linear_dimensions();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert!((x * 0.5 - y).abs() < 1e-6, "{}: {} vs {}", name, x, y);
        }

        let pa = world_position(&full, name);
        let pb = world_position(&half, name);
        assert_close(pa * 0.5, pb, name);
    }
}

#[test]
fn test_overall_height_tracks_parameter() {
    let short = build(&CustomizationParams::default().with_height(140.0)).world_bounds();
    let tall = build(&CustomizationParams::default().with_height(200.0)).world_bounds();
    let ratio = tall.size().y / short.size().y;
    assert!((ratio - 200.0 / 140.0).abs() < 1e-4, "ratio {}", ratio);
    assert!(short.min.y.abs() < 1e-5);
    assert!(tall.min.y.abs() < 1e-5);
}

// ============================================================================
// Joint continuity
// ============================================================================

#[test]
fn test_limb_segments_meet_at_joints() {
    for height in [140.0, 170.0, 200.0] {
        let params = CustomizationParams::default().with_height(height);
        let hs = derive_proportions(&params).height_scale as f32;
        let h = build(&params);

        for s in ["l", "r"] {
            let upper_arm = UPPER_ARM_LENGTH as f32 * hs / 2.0;
            let forearm = FOREARM_LENGTH as f32 * hs / 2.0;
            assert_close(
                along_axis(&h, &format!("upper_arm_{s}"), upper_arm),
                world_position(&h, &format!("shoulder_{s}")),
                "shoulder",
            );
            assert_close(
                along_axis(&h, &format!("upper_arm_{s}"), -upper_arm),
                along_axis(&h, &format!("lower_arm_{s}"), forearm),
                "elbow",
            );
            assert_close(
                along_axis(&h, &format!("lower_arm_{s}"), -forearm),
                world_position(&h, &format!("hand_{s}")),
                "wrist",
            );

            let thigh = UPPER_LEG_LENGTH as f32 * hs / 2.0;
            let shin = LOWER_LEG_LENGTH as f32 * hs / 2.0;
            assert_close(
                along_axis(&h, &format!("upper_leg_{s}"), -thigh),
                along_axis(&h, &format!("lower_leg_{s}"), shin),
                "knee",
            );
        }
    }
}

#[test]
fn test_left_side_is_negative_x() {
    let h = build(&CustomizationParams::default());
    assert!(world_position(&h, "hand_l").x < 0.0);
    assert!(world_position(&h, "hand_r").x > 0.0);
    assert!(world_position(&h, "foot_l").x < 0.0);
}

// ============================================================================
// Hair dispatch
// ============================================================================

#[test]
fn test_hair_dispatch() {
    for hair in HairType::ALL {
        let h = build(&CustomizationParams::default().with_hair(hair));
        let part = h.find(HAIR_PART);
        match hair {
            HairType::Bald => assert!(part.is_none()),
            HairType::Curly => {
                let part = part.unwrap();
                assert!(part.mesh.is_none());
                assert_eq!(part.children.len(), 12);
                for curl in &part.children {
                    assert_eq!(curl.mesh.unwrap().material.color, CURLY_HAIR_COLOR);
                }
            }
            _ => {
                let mesh = part.unwrap().mesh.unwrap();
                assert_eq!(mesh.material.color, HAIR_COLOR);
            }
        }
    }
}

#[test]
fn test_long_hair_reaches_below_medium() {
    let bottom = |hair: HairType| {
        let h = build(&CustomizationParams::default().with_hair(hair));
        let m = h.world_matrix(HAIR_PART).unwrap();
        let mesh = h.find(HAIR_PART).unwrap().mesh.unwrap();
        mesh.geometry.local_bounds().transformed(&m).min.y
    };
    assert!(bottom(HairType::Long) < bottom(HairType::Medium));
}

#[test]
fn test_medium_and_long_are_cylinders() {
    for hair in [HairType::Medium, HairType::Long] {
        let h = build(&CustomizationParams::default().with_hair(hair));
        let geometry = h.find(HAIR_PART).unwrap().mesh.unwrap().geometry;
        assert!(matches!(geometry, Geometry::Cylinder { .. }), "{:?}", hair);
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_fingerprint_is_stable_and_sensitive() {
    let params = CustomizationParams::default().with_height(183.0).with_weight(91.0);
    let a = hierarchy_fingerprint(&build(&params)).unwrap();
    let b = hierarchy_fingerprint(&build(&params)).unwrap();
    assert_eq!(a, b);

    let other = hierarchy_fingerprint(&build(&params.clone().with_weight(92.0))).unwrap();
    assert_ne!(a, other);
    assert_eq!(build(&params).root.name, AVATAR_ROOT);
}
