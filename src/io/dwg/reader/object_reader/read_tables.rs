//! Table record readers.

use crate::error::Result;
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::tables::{Layer, LayerFlags};

use super::{DwgObjectReader, StreamSet};

impl DwgObjectReader<'_> {
    pub(super) fn read_layer(&self, streams: &mut StreamSet) -> Result<Layer> {
        let common = self.read_common_non_entity_data(streams)?;
        let reader = &mut streams.object_reader;

        // TV: entry name
        let name = reader.read_variable_text()?;

        // B: 64-flag, BS: xref index + 1, B: xref dependent
        let referenced = reader.read_bit()?;
        let xref_index = reader.read_bit_short()?;
        let xref_dependent = reader.read_bit()?;

        // BS: packed state flags with the line weight in bits 5-9
        let (flags, line_weight) = LayerFlags::unpack(reader.read_bit_short()? as u16);

        // BS: color index
        let color = reader.read_bit_short()?;

        Ok(Layer {
            common,
            name,
            referenced,
            xref_index,
            xref_dependent,
            flags,
            line_weight,
            color,
            // H: external reference block (hard pointer)
            xref_block: streams.handle_ref()?,
            // H: plot style (hard pointer)
            plotstyle: streams.handle_ref()?,
            // H: linetype (hard pointer)
            linetype: streams.handle_ref()?,
        })
    }
}
