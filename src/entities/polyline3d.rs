//! 3D polyline and its vertices
//!
//! A 3D polyline does not store its vertices inline. They are separate
//! `VERTEX` objects chained from `first_vertex` to `last_vertex` and closed
//! by a `SEQEND`; see [`DwgDocument::polyline_vertices`].
//!
//! [`DwgDocument::polyline_vertices`]: crate::document::DwgDocument::polyline_vertices

use super::EntityCommon;
use crate::types::{Handle, Vector3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline3D {
    pub common: EntityCommon,
    /// Curve/spline fit flags.
    pub spline_flags: u8,
    /// Bit 0 set for a closed polyline.
    pub closed_flags: u8,
    pub first_vertex: Handle,
    pub last_vertex: Handle,
    pub seqend: Handle,
}

impl Polyline3D {
    pub fn is_closed(&self) -> bool {
        self.closed_flags & 1 != 0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vertex3D {
    pub common: EntityCommon,
    pub flags: u8,
    pub location: Vector3,
}
