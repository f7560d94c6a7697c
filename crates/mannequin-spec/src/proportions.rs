//! Body-proportion engine.
//!
//! Maps customization parameters to the scale factors every generator uses.
//! The mapping is a pure function: identical input yields bit-identical
//! output, so proportions are recomputed on every rebuild instead of cached.

use serde::{Deserialize, Serialize};

use crate::params::CustomizationParams;

/// Height at which `height_scale == 1.0`.
pub const REFERENCE_HEIGHT_CM: f64 = 170.0;
/// BMI at which the body width equals [`BASE_BODY_WIDTH`].
pub const NEUTRAL_BMI: f64 = 22.0;
/// Body width factor at the neutral BMI.
pub const BASE_BODY_WIDTH: f64 = 0.45;
/// Body width change per BMI point (procedural figure only).
pub const BODY_WIDTH_PER_BMI: f64 = 0.025;
/// Lower clamp for the body width factor.
pub const MIN_BODY_WIDTH: f64 = 0.40;
/// Upper clamp for the body width factor.
pub const MAX_BODY_WIDTH: f64 = 0.65;

/// Scale factors derived from one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedProportions {
    /// `height_cm / 170`. Every linear dimension is multiplied by this.
    pub height_scale: f64,
    /// Body mass index, `weight_kg / (height_cm / 100)^2`.
    pub bmi: f64,
    /// Clamped torso width factor in `[MIN_BODY_WIDTH, MAX_BODY_WIDTH]`.
    pub body_width_factor: f64,
}

impl DerivedProportions {
    /// Proportions of the reference figure (170 cm at neutral BMI).
    pub fn reference() -> Self {
        Self {
            height_scale: 1.0,
            bmi: NEUTRAL_BMI,
            body_width_factor: BASE_BODY_WIDTH,
        }
    }

    /// Returns a copy with a different height scale and the same width factor.
    pub fn with_height_scale(mut self, height_scale: f64) -> Self {
        self.height_scale = height_scale;
        self
    }
}

/// Derives proportions from parameters.
///
/// Total over all inputs: a non-positive or non-finite height yields a zero
/// height scale and a BMI at the neutral point rather than dividing by zero,
/// and the width factor is always clamped.
///
/// # Example
/// ```
/// use mannequin_spec::{derive_proportions, CustomizationParams};
///
/// let p = derive_proportions(&CustomizationParams::default().with_weight(70.0));
/// assert!((p.bmi - 24.22).abs() < 0.01);
/// ```
pub fn derive_proportions(params: &CustomizationParams) -> DerivedProportions {
    let height_cm = if params.height_cm.is_finite() {
        params.height_cm.max(0.0)
    } else {
        0.0
    };
    let height_scale = height_cm / REFERENCE_HEIGHT_CM;

    let height_m = height_cm / 100.0;
    let bmi = if height_m > 0.0 && params.weight_kg.is_finite() {
        params.weight_kg / (height_m * height_m)
    } else {
        NEUTRAL_BMI
    };

    DerivedProportions {
        height_scale,
        bmi,
        body_width_factor: body_width_factor(bmi),
    }
}

/// Clamped torso width for a BMI value.
pub fn body_width_factor(bmi: f64) -> f64 {
    let raw = BASE_BODY_WIDTH + (bmi - NEUTRAL_BMI) * BODY_WIDTH_PER_BMI;
    if raw.is_nan() {
        return BASE_BODY_WIDTH;
    }
    raw.clamp(MIN_BODY_WIDTH, MAX_BODY_WIDTH)
}
