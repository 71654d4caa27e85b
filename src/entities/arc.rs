//! Arc entity

use super::EntityCommon;
use crate::types::Vector3;

/// A circular arc; angles in radians, counter-clockwise from start to end.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub common: EntityCommon,
    pub center: Vector3,
    pub radius: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    /// Angle swept from start to end, in `[0, 2π)`.
    pub fn sweep(&self) -> f64 {
        (self.end_angle - self.start_angle).rem_euclid(std::f64::consts::TAU)
    }
}

impl Default for Arc {
    fn default() -> Self {
        Arc {
            common: EntityCommon::default(),
            center: Vector3::ZERO,
            radius: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            start_angle: 0.0,
            end_angle: 0.0,
        }
    }
}
