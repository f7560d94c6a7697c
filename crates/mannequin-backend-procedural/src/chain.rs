//! Limb chain kinematics.
//!
//! Each segment starts at the previous segment's distal joint, so the joints
//! of a chain always coincide regardless of scale.

use glam::{DVec3, Quat, Vec3};

/// Body side. Left limbs sit on -X.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Sign of the X axis on this side.
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Part-name suffix ("l" or "r").
    pub fn suffix(self) -> &'static str {
        match self {
            Side::Left => "l",
            Side::Right => "r",
        }
    }
}

/// One rigid segment of a limb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Proximal joint.
    pub start: DVec3,
    /// Distal joint.
    pub end: DVec3,
    /// Unit axis from `start` to `end`.
    pub direction: DVec3,
    pub length: f64,
}

impl Segment {
    /// Segment hanging down from `start`, tilted outward by `angle` radians
    /// toward `side`.
    pub fn hanging(start: DVec3, length: f64, angle: f64, side: Side) -> Self {
        let direction = DVec3::new(side.sign() * angle.sin(), -angle.cos(), 0.0);
        Self {
            start,
            end: start + direction * length,
            direction,
            length,
        }
    }

    /// Continues the chain from this segment's distal joint.
    pub fn then(&self, length: f64, angle: f64, side: Side) -> Segment {
        Segment::hanging(self.end, length, angle, side)
    }

    pub fn midpoint(&self) -> DVec3 {
        self.start + self.direction * (self.length * 0.5)
    }

    /// Rotation taking a Y-aligned primitive onto this segment, with the
    /// primitive's +Y end at the proximal joint.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_arc(Vec3::NEG_Y, self.direction.as_vec3().normalize())
    }
}
