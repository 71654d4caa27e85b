//! Single-line text entity

use super::EntityCommon;
use crate::types::{Handle, Vector2, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub common: EntityCommon,
    pub value: String,
    /// Insertion point; Z is the elevation.
    pub insertion_point: Vector3,
    /// Second alignment point, equal to the insertion point when not stored.
    pub alignment_point: Vector2,
    pub normal: Vector3,
    pub thickness: f64,
    pub oblique_angle: f64,
    pub rotation: f64,
    pub height: f64,
    pub width_factor: f64,
    /// Mirroring flags (2: backwards, 4: upside down).
    pub generation: i16,
    pub horizontal_alignment: i16,
    pub vertical_alignment: i16,
    /// Text style (STYLE table record).
    pub style: Handle,
}

impl Default for Text {
    fn default() -> Self {
        Text {
            common: EntityCommon::default(),
            value: String::new(),
            insertion_point: Vector3::ZERO,
            alignment_point: Vector2::ZERO,
            normal: Vector3::UNIT_Z,
            thickness: 0.0,
            oblique_angle: 0.0,
            rotation: 0.0,
            height: 0.0,
            width_factor: 1.0,
            generation: 0,
            horizontal_alignment: 0,
            vertical_alignment: 0,
            style: Handle::NULL,
        }
    }
}
