//! Base dimensions of the procedural figure.
//!
//! All values are in scene units at `height_scale == 1.0` (a 170 cm figure)
//! and are multiplied by the height scale when the rig is built. Vertical
//! positions are measured in the figure's own frame, before the whole
//! figure is lifted so the soles rest on `y = 0`.

use mannequin_spec::Rgb;

// Head and neck
pub const HEAD_RADIUS: f64 = 0.30;
pub const HEAD_Y: f64 = 1.40;
pub const NECK_RADIUS: f64 = 0.12;
pub const NECK_HEIGHT: f64 = 0.15;
pub const NECK_Y: f64 = 1.20;

// Torso; radii are multiplied by the body width factor.
pub const TORSO_HEIGHT: f64 = 0.90;
pub const TORSO_Y: f64 = 0.70;
pub const TORSO_TOP_RADIUS: f64 = 0.5;
pub const TORSO_BOTTOM_RADIUS: f64 = 0.6;

// Shoulders: x = body_width * SHOULDER_WIDTH_RATIO + SHOULDER_OFFSET
pub const SHOULDER_RADIUS: f64 = 0.12;
pub const SHOULDER_WIDTH_RATIO: f64 = 0.35;
pub const SHOULDER_OFFSET: f64 = 0.12;

// Arms
pub const UPPER_ARM_RADIUS: f64 = 0.10;
pub const UPPER_ARM_LENGTH: f64 = 0.40;
pub const UPPER_ARM_ANGLE: f64 = 0.15;
pub const FOREARM_RADIUS_TOP: f64 = 0.09;
pub const FOREARM_RADIUS_BOTTOM: f64 = 0.08;
pub const FOREARM_LENGTH: f64 = 0.32;
pub const FOREARM_ANGLE: f64 = 0.25;
pub const HAND_RADIUS: f64 = 0.10;

// Legs hang straight down from the hip joints.
pub const HIP_X: f64 = 0.12;
pub const HIP_Y: f64 = 0.35;
pub const UPPER_LEG_RADIUS_TOP: f64 = 0.12;
pub const UPPER_LEG_RADIUS_BOTTOM: f64 = 0.13;
pub const UPPER_LEG_LENGTH: f64 = 0.40;
pub const LOWER_LEG_RADIUS_TOP: f64 = 0.10;
pub const LOWER_LEG_RADIUS_BOTTOM: f64 = 0.11;
pub const LOWER_LEG_LENGTH: f64 = 0.35;
pub const FOOT_WIDTH: f64 = 0.15;
pub const FOOT_HEIGHT: f64 = 0.08;
pub const FOOT_DEPTH: f64 = 0.20;
pub const FOOT_FORWARD: f64 = 0.10;

/// Distance from the figure origin down to the soles.
pub const GROUND_LIFT: f64 = -(HIP_Y - UPPER_LEG_LENGTH - LOWER_LEG_LENGTH - FOOT_HEIGHT);

// Face, as offsets from the head center.
pub const EYE_RADIUS: f64 = 0.08;
pub const EYE_OFFSET: [f64; 3] = [0.10, 0.05, 0.25];
pub const PUPIL_RADIUS: f64 = 0.04;
pub const PUPIL_OFFSET: [f64; 3] = [0.10, 0.05, 0.28];
pub const MOUTH_RADIUS: f64 = 0.06;
pub const MOUTH_TUBE: f64 = 0.02;
pub const MOUTH_OFFSET: [f64; 3] = [0.0, -0.10, 0.25];

// Hair, centered on the head.
pub const HAIR_RADIUS: f64 = 0.32;
pub const HAIR_BOTTOM_RADIUS: f64 = 0.30;
pub const MEDIUM_HAIR_LENGTH: f64 = 0.20;
pub const LONG_HAIR_LENGTH: f64 = 0.40;
pub const CURL_COUNT: usize = 12;
pub const CURL_RADIUS: f64 = 0.06;
pub const CURL_RING_RADIUS: f64 = 0.25;
pub const CURL_RING_HEIGHT: f64 = 0.15;

pub const FOOT_COLOR: Rgb = Rgb::from_hex(0x333333);
pub const MOUTH_COLOR: Rgb = Rgb::from_hex(0xFF6B6B);
