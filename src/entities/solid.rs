//! 2D solid (filled triangle or quadrilateral)

use super::EntityCommon;
use crate::types::Vector3;

/// Corners are stored in the entity's plane at `elevation`; a triangle
/// repeats its third corner as the fourth.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub common: EntityCommon,
    pub thickness: f64,
    pub elevation: f64,
    pub first_corner: Vector3,
    pub second_corner: Vector3,
    pub third_corner: Vector3,
    pub fourth_corner: Vector3,
    pub normal: Vector3,
}

impl Solid {
    pub fn is_triangle(&self) -> bool {
        self.third_corner == self.fourth_corner
    }
}

impl Default for Solid {
    fn default() -> Self {
        Solid {
            common: EntityCommon::default(),
            thickness: 0.0,
            elevation: 0.0,
            first_corner: Vector3::ZERO,
            second_corner: Vector3::ZERO,
            third_corner: Vector3::ZERO,
            fourth_corner: Vector3::ZERO,
            normal: Vector3::UNIT_Z,
        }
    }
}
