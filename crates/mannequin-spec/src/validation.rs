//! Defensive re-validation of parameters arriving from the UI boundary.
//!
//! Out-of-range values are never rejected: they are clamped to the nearest
//! valid boundary and each adjustment is reported as a [`ClampNote`].

use crate::color::SkinTone;
use crate::error::{ClampCode, ClampNote};
use crate::params::{
    ClothingSelection, CustomizationParams, DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG, MAX_HEIGHT_CM,
    MAX_WEIGHT_KG, MIN_HEIGHT_CM, MIN_WEIGHT_KG, NO_CLOTHING,
};

/// Result of clamping a parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct ClampOutcome {
    /// The clamped, always-valid parameters.
    pub params: CustomizationParams,
    /// Every adjustment that was made.
    pub notes: Vec<ClampNote>,
}

impl ClampOutcome {
    /// Whether the input was already valid.
    pub fn is_unchanged(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Clamps every field of `params` into the UI-boundary domain.
///
/// Heights and weights are rounded to whole units (the UI sliders are
/// integer-valued) and clamped to their ranges; off-palette skin colors snap
/// to the nearest palette tone; unknown clothing items become "none".
///
/// # Example
/// ```
/// use mannequin_spec::{clamp_params, CustomizationParams};
///
/// let outcome = clamp_params(&CustomizationParams::default().with_height(250.0));
/// assert_eq!(outcome.params.height_cm, 200.0);
/// assert_eq!(outcome.notes.len(), 1);
/// ```
pub fn clamp_params(params: &CustomizationParams) -> ClampOutcome {
    let mut notes = Vec::new();
    let mut out = params.clone();

    out.height_cm = clamp_whole(
        params.height_cm,
        MIN_HEIGHT_CM,
        MAX_HEIGHT_CM,
        DEFAULT_HEIGHT_CM,
        "height_cm",
        ClampCode::HeightOutOfRange,
        &mut notes,
    );
    out.weight_kg = clamp_whole(
        params.weight_kg,
        MIN_WEIGHT_KG,
        MAX_WEIGHT_KG,
        DEFAULT_WEIGHT_KG,
        "weight_kg",
        ClampCode::WeightOutOfRange,
        &mut notes,
    );

    if SkinTone::from_color(params.skin_color).is_none() {
        let tone = SkinTone::nearest(params.skin_color);
        notes.push(ClampNote::new(
            ClampCode::SkinColorOffPalette,
            "skin_color",
            format!(
                "{} is not a palette color, using {} ({})",
                params.skin_color,
                tone.color(),
                tone.label()
            ),
        ));
        out.skin_color = tone.color();
    }

    let mut clothing = ClothingSelection::default();
    for (category, item) in params.clothing.iter() {
        if category.accepts(item) {
            clothing.set(category, item);
        } else {
            notes.push(ClampNote::new(
                ClampCode::UnknownClothingItem,
                format!("clothing.{}", category),
                format!("unknown item '{}', using '{}'", item, NO_CLOTHING),
            ));
        }
    }
    out.clothing = clothing;

    ClampOutcome { params: out, notes }
}

fn clamp_whole(
    value: f64,
    min: f64,
    max: f64,
    fallback: f64,
    field: &str,
    range_code: ClampCode,
    notes: &mut Vec<ClampNote>,
) -> f64 {
    if !value.is_finite() {
        notes.push(ClampNote::new(
            ClampCode::NonFiniteValue,
            field,
            format!("{} is not finite, using {}", value, fallback),
        ));
        return fallback;
    }

    let rounded = value.round();
    if rounded != value {
        notes.push(ClampNote::new(
            ClampCode::FractionalValue,
            field,
            format!("{} rounded to {}", value, rounded),
        ));
    }

    let clamped = rounded.clamp(min, max);
    if clamped != rounded {
        notes.push(ClampNote::new(
            range_code,
            field,
            format!("{} outside [{}, {}], using {}", rounded, min, max, clamped),
        ));
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::params::ClothingCategory;

    #[test]
    fn test_valid_params_unchanged() {
        let p = CustomizationParams::default();
        let outcome = clamp_params(&p);
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.params, p);
    }

    #[test]
    fn test_height_weight_clamped_to_nearest_bound() {
        let p = CustomizationParams::default()
            .with_height(120.0)
            .with_weight(300.0);
        let outcome = clamp_params(&p);
        assert_eq!(outcome.params.height_cm, 140.0);
        assert_eq!(outcome.params.weight_kg, 120.0);
        let codes: Vec<_> = outcome.notes.iter().map(|n| n.code).collect();
        assert_eq!(
            codes,
            vec![ClampCode::HeightOutOfRange, ClampCode::WeightOutOfRange]
        );
    }

    #[test]
    fn test_non_finite_uses_default() {
        let p = CustomizationParams::default()
            .with_height(f64::NAN)
            .with_weight(f64::INFINITY);
        let outcome = clamp_params(&p);
        assert_eq!(outcome.params.height_cm, DEFAULT_HEIGHT_CM);
        assert_eq!(outcome.params.weight_kg, DEFAULT_WEIGHT_KG);
        assert!(outcome
            .notes
            .iter()
            .all(|n| n.code == ClampCode::NonFiniteValue));
    }

    #[test]
    fn test_fractional_rounded() {
        let outcome = clamp_params(&CustomizationParams::default().with_height(171.6));
        assert_eq!(outcome.params.height_cm, 172.0);
        assert_eq!(outcome.notes[0].code, ClampCode::FractionalValue);
    }

    #[test]
    fn test_off_palette_skin_snaps() {
        let outcome =
            clamp_params(&CustomizationParams::default().with_skin_color(Rgb::from_hex(0xD18C5C)));
        assert_eq!(outcome.params.skin_color, SkinTone::Medium.color());
        assert_eq!(outcome.notes[0].code, ClampCode::SkinColorOffPalette);
    }

    #[test]
    fn test_unknown_clothing_becomes_none() {
        let p = CustomizationParams::default()
            .with_clothing(ClothingCategory::Shoes, "rollerblades")
            .with_clothing(ClothingCategory::Pants, "jeans");
        let outcome = clamp_params(&p);
        assert_eq!(outcome.params.clothing.get(ClothingCategory::Shoes), NO_CLOTHING);
        assert_eq!(outcome.params.clothing.get(ClothingCategory::Pants), "jeans");
        assert_eq!(outcome.notes.len(), 1);
        assert_eq!(outcome.notes[0].field, "clothing.shoes");
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let p = CustomizationParams::default()
            .with_height(1000.0)
            .with_weight(-5.5)
            .with_skin_color(Rgb::from_hex(0x000000));
        let once = clamp_params(&p);
        let twice = clamp_params(&once.params);
        assert_eq!(once.params, twice.params);
        assert!(twice.is_unchanged());
    }
}
