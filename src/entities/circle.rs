//! Circle entity

use super::EntityCommon;
use crate::types::Vector3;

/// A circle entity
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub common: EntityCommon,
    pub center: Vector3,
    pub radius: f64,
    /// Thickness (extrusion in Z direction)
    pub thickness: f64,
    pub normal: Vector3,
}

impl Default for Circle {
    fn default() -> Self {
        Circle {
            common: EntityCommon::default(),
            center: Vector3::ZERO,
            radius: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }
}
