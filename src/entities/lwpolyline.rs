//! Lightweight (2D) polyline entity

use bitflags::bitflags;

use super::EntityCommon;
use crate::types::{Vector2, Vector3};

bitflags! {
    /// Presence and shape flags of a lightweight polyline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LwPolylineFlags: u16 {
        /// Extrusion stored explicitly.
        const HAS_EXTRUSION = 0x1;
        const HAS_THICKNESS = 0x2;
        const HAS_CONSTANT_WIDTH = 0x4;
        const HAS_ELEVATION = 0x8;
        /// Bulge count and bulges follow the vertices.
        const HAS_BULGES = 0x10;
        /// Width count and width pairs follow the bulges.
        const HAS_WIDTHS = 0x20;
        const PLINEGEN = 0x100;
        const CLOSED = 0x200;
    }
}

/// A lightweight polyline vertex
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LwVertex {
    pub location: Vector2,
    pub bulge: f64,
    pub start_width: f64,
    pub end_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LwPolyline {
    pub common: EntityCommon,
    /// Flags as stored; unknown bits are kept.
    pub flags: LwPolylineFlags,
    pub constant_width: f64,
    pub elevation: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub vertices: Vec<LwVertex>,
}

impl LwPolyline {
    pub fn is_closed(&self) -> bool {
        self.flags.contains(LwPolylineFlags::CLOSED)
    }

    /// Vertex locations lifted to the polyline's elevation.
    pub fn points_3d(&self) -> impl Iterator<Item = Vector3> + '_ {
        self.vertices
            .iter()
            .map(move |v| v.location.with_z(self.elevation))
    }
}

impl Default for LwPolyline {
    fn default() -> Self {
        LwPolyline {
            common: EntityCommon::default(),
            flags: LwPolylineFlags::empty(),
            constant_width: 0.0,
            elevation: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            vertices: Vec::new(),
        }
    }
}
