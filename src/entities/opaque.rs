//! Objects decoded only up to their common data

use super::{EntityCommon, ObjectCommon};
use crate::types::Handle;

/// Common data read for an opaque object.
#[derive(Debug, Clone, PartialEq)]
pub enum OpaqueCommon {
    /// The type is known to be an entity.
    Entity(EntityCommon),
    /// A non-entity object, or a type whose layout is unknown; in the
    /// latter case only the handle and extended data are filled in.
    Object(ObjectCommon),
}

/// An object whose type-specific payload is kept as raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueObject {
    pub common: OpaqueCommon,
    /// DXF name from the fixed table or the class table, if any.
    pub dxf_name: Option<String>,
    /// Data stream bytes after the common data, up to the handle stream.
    pub data: Vec<u8>,
}

impl OpaqueObject {
    pub fn object_common(&self) -> &ObjectCommon {
        match &self.common {
            OpaqueCommon::Entity(e) => &e.object,
            OpaqueCommon::Object(o) => o,
        }
    }

    pub fn entity_common(&self) -> Option<&EntityCommon> {
        match &self.common {
            OpaqueCommon::Entity(e) => Some(e),
            OpaqueCommon::Object(_) => None,
        }
    }

    pub fn handle(&self) -> Handle {
        self.object_common().handle
    }

    pub fn is_entity(&self) -> bool {
        matches!(self.common, OpaqueCommon::Entity(_))
    }
}
