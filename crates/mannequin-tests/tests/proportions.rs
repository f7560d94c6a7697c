//! Property tests for parameter clamping and the proportion engine.
//!
//! ```bash
//! cargo test -p mannequin-tests --test proportions
//! ```

use proptest::prelude::*;

use mannequin_spec::{
    clamp_params, derive_proportions, CustomizationParams, HairType, Rgb, SkinTone,
    MAX_BODY_WIDTH, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_BODY_WIDTH, MIN_HEIGHT_CM, MIN_WEIGHT_KG,
};

fn any_hair() -> impl Strategy<Value = HairType> {
    prop::sample::select(HairType::ALL.to_vec())
}

fn any_color() -> impl Strategy<Value = Rgb> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

/// Numbers well outside the accepted ranges, plus the awkward ones.
fn wild_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1000.0f64..1000.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(0.0),
    ]
}

fn wild_params() -> impl Strategy<Value = CustomizationParams> {
    (wild_number(), wild_number(), any_color(), any_hair()).prop_map(|(h, w, skin, hair)| {
        CustomizationParams::default()
            .with_height(h)
            .with_weight(w)
            .with_skin_color(skin)
            .with_hair(hair)
    })
}

proptest! {
    /// Clamped params are always in range and on the palette.
    #[test]
    fn clamped_params_in_range(raw in wild_params()) {
        let params = clamp_params(&raw).params;
        prop_assert!((MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&params.height_cm));
        prop_assert!((MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&params.weight_kg));
        prop_assert_eq!(params.height_cm, params.height_cm.round());
        prop_assert!(SkinTone::from_color(params.skin_color).is_some());
    }

    /// Clamping a clamped value changes nothing and reports nothing.
    #[test]
    fn clamp_is_idempotent(raw in wild_params()) {
        let once = clamp_params(&raw).params;
        let twice = clamp_params(&once);
        prop_assert!(twice.notes.is_empty());
        prop_assert_eq!(twice.params, once);
    }

    /// Proportions are finite for any input, clamped or not.
    #[test]
    fn proportions_are_total(raw in wild_params()) {
        let p = derive_proportions(&raw);
        prop_assert!(p.height_scale.is_finite());
        prop_assert!(p.bmi.is_finite());
        prop_assert!((MIN_BODY_WIDTH..=MAX_BODY_WIDTH).contains(&p.body_width_factor));
    }

    /// Taller is never smaller.
    #[test]
    fn height_scale_is_monotone(a in 140.0f64..=200.0, b in 140.0f64..=200.0, w in 40.0f64..=120.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = derive_proportions(&CustomizationParams::default().with_height(lo).with_weight(w));
        let p_hi = derive_proportions(&CustomizationParams::default().with_height(hi).with_weight(w));
        prop_assert!(p_lo.height_scale <= p_hi.height_scale);
    }

    /// Heavier at the same height is never narrower.
    #[test]
    fn body_width_is_monotone_in_weight(h in 140.0f64..=200.0, a in 40.0f64..=120.0, b in 40.0f64..=120.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = derive_proportions(&CustomizationParams::default().with_height(h).with_weight(lo));
        let p_hi = derive_proportions(&CustomizationParams::default().with_height(h).with_weight(hi));
        prop_assert!(p_lo.body_width_factor <= p_hi.body_width_factor);
    }
}

#[test]
fn test_extreme_corners() {
    let short_heavy = derive_proportions(&CustomizationParams::default().with_height(140.0).with_weight(120.0));
    let tall_light = derive_proportions(&CustomizationParams::default().with_height(200.0).with_weight(40.0));

    assert_eq!(short_heavy.body_width_factor, MAX_BODY_WIDTH);
    assert_eq!(tall_light.body_width_factor, MIN_BODY_WIDTH);
    assert!((short_heavy.height_scale - 140.0 / 170.0).abs() < 1e-12);
    assert!((tall_light.height_scale - 200.0 / 170.0).abs() < 1e-12);
}
