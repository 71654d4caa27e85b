//! Ellipse entity

use super::EntityCommon;
use crate::types::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub common: EntityCommon,
    pub center: Vector3,
    /// Endpoint of the major axis, relative to the center.
    pub major_axis: Vector3,
    pub normal: Vector3,
    /// Minor axis length over major axis length.
    pub minor_axis_ratio: f64,
    pub start_parameter: f64,
    pub end_parameter: f64,
}

impl Default for Ellipse {
    fn default() -> Self {
        Ellipse {
            common: EntityCommon::default(),
            center: Vector3::ZERO,
            major_axis: Vector3::new(1.0, 0.0, 0.0),
            normal: Vector3::UNIT_Z,
            minor_axis_ratio: 1.0,
            start_parameter: 0.0,
            end_parameter: std::f64::consts::TAU,
        }
    }
}
