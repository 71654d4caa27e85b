//! Layer table record

use bitflags::bitflags;

use super::TableEntry;
use crate::entities::ObjectCommon;
use crate::types::{Handle, LineWeight};

bitflags! {
    /// State bits packed into the layer's flag short.
    ///
    /// Bits 5–9 of the same short hold the line weight index and are not
    /// part of this set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LayerFlags: u16 {
        const FROZEN = 0x1;
        const ON = 0x2;
        /// Frozen in new viewports.
        const FROZEN_BY_DEFAULT = 0x4;
        const LOCKED = 0x8;
        const PLOTTING = 0x10;
    }
}

/// Mask of the line weight index in the flag short.
pub const LAYER_LINE_WEIGHT_MASK: u16 = 0x03E0;

impl LayerFlags {
    /// Split the stored short into state flags and line weight.
    pub fn unpack(values: u16) -> (Self, LineWeight) {
        let flags = Self::from_bits_truncate(values);
        let index = ((values & LAYER_LINE_WEIGHT_MASK) >> 5) as u8;
        (flags, LineWeight::from_dwg_index(index))
    }
}

/// A layer table record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    /// Handle, extended data, owner (the layer control object), reactors
    /// and extension dictionary.
    pub common: ObjectCommon,
    pub name: String,
    /// Set when the record is referenced by anything in the drawing.
    pub referenced: bool,
    /// External reference index plus one; 0 when not from an xref.
    pub xref_index: i16,
    pub xref_dependent: bool,
    pub flags: LayerFlags,
    pub line_weight: LineWeight,
    /// ACI color index; negative when the layer is off.
    pub color: i16,
    pub xref_block: Handle,
    pub plotstyle: Handle,
    pub linetype: Handle,
}

impl Layer {
    pub fn is_frozen(&self) -> bool {
        self.flags.contains(LayerFlags::FROZEN)
    }

    pub fn is_on(&self) -> bool {
        self.flags.contains(LayerFlags::ON)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(LayerFlags::LOCKED)
    }

    pub fn is_plotting(&self) -> bool {
        self.flags.contains(LayerFlags::PLOTTING)
    }
}

impl TableEntry for Layer {
    fn handle(&self) -> Handle {
        self.common.handle
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_xref_dependent(&self) -> bool {
        self.xref_dependent
    }
}
