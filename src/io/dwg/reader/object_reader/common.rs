//! Common entity/object data readers.
//!
//! The data stream carries the prologue fields; every handle they imply is
//! read from the handle stream at the moment the data stream calls for it,
//! which keeps both streams in step.

use crate::entities::{EntityCommon, ExtendedData, ObjectCommon};
use crate::error::{DwgError, Result};
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::types::{Handle, LineWeight};

use super::{checked_count, DwgObjectReader, StreamSet};

impl DwgObjectReader<'_> {
    /// Size in bits, handle and extended data: the part every object has.
    pub(super) fn read_common_data(&self, streams: &mut StreamSet) -> Result<ObjectCommon> {
        let mut common = ObjectCommon {
            type_code: streams.type_code,
            ..Default::default()
        };

        // RL: size of the data stream in bits, where the handle stream starts
        common.size_in_bits = streams.update_handle_reader()?;

        // H: the object's own handle
        let handle = streams.object_reader.handle_reference()?;
        streams.current_handle = handle.handle;
        common.handle = Handle::new(handle.handle);

        common.extended_data = self.read_extended_data(streams)?;
        Ok(common)
    }

    /// Prologue and handle data of an entity.
    pub(super) fn read_common_entity_data(&self, streams: &mut StreamSet) -> Result<EntityCommon> {
        let object = self.read_common_data(streams)?;
        let mut entity = EntityCommon {
            object,
            ..Default::default()
        };

        // B: graphic present flag, followed by an RL size and the data
        entity.has_graphics = streams.object_reader.read_bit()?;
        if entity.has_graphics {
            let size = streams.object_reader.read_raw_long()?;
            let size = usize::try_from(size).map_err(|_| {
                DwgError::InvalidFormat(format!("negative graphics size {}", size))
            })?;
            log::trace!("{}: skipping {} bytes of graphics", entity.object.handle, size);
            streams.object_reader.advance_bits(size * 8)?;
        }

        // BB: entity mode; 0 means the owner handle is present
        entity.entity_mode = streams.object_reader.read_2bits()?;
        if entity.entity_mode == 0 {
            entity.object.owner = streams.handle_ref()?;
        }

        let (reactors, xdictionary) = self.read_reactors_and_dictionary_handle(streams)?;
        entity.object.reactors = reactors;
        entity.object.xdictionary = xdictionary;

        // B: no links; when clear, prev and next entity handles follow
        entity.no_links = streams.object_reader.read_bit()?;
        if !entity.no_links {
            entity.prev_entity = streams.handle_ref()?;
            entity.next_entity = streams.handle_ref()?;
        }

        // BS: color index
        entity.color = streams.object_reader.read_bit_short()?;
        // BD: linetype scale
        entity.linetype_scale = streams.object_reader.read_bit_double()?;

        entity.layer = streams.handle_ref()?;

        // BB: 00 bylayer, 01 byblock, 10 continuous, 11 linetype handle present
        entity.linetype_flags = streams.object_reader.read_2bits()?;
        if entity.linetype_flags == 3 {
            entity.linetype = streams.handle_ref()?;
        }

        // BB: same scheme for the plot style
        entity.plotstyle_flags = streams.object_reader.read_2bits()?;
        if entity.plotstyle_flags == 3 {
            entity.plotstyle = streams.handle_ref()?;
        }

        // BS: invisibility
        entity.invisibility = streams.object_reader.read_bit_short()?;
        // RC: line weight index
        entity.line_weight = LineWeight::from_dwg_index(streams.object_reader.read_raw_char()?);

        Ok(entity)
    }

    /// Prologue and handle data of a non-entity object.
    pub(super) fn read_common_non_entity_data(
        &self,
        streams: &mut StreamSet,
    ) -> Result<ObjectCommon> {
        let mut common = self.read_common_data(streams)?;

        // BL: number of reactors
        let reactor_count = streams.object_reader.read_bit_long()?;

        // Owner handle (soft pointer)
        common.owner = streams.handle_ref()?;

        let count = checked_count(&streams.handles_reader, reactor_count, 8, "reactor")?;
        common.reactors = (0..count)
            .map(|_| streams.handle_ref())
            .collect::<Result<_>>()?;

        // XDictionary handle (hard owner)
        common.xdictionary = streams.handle_ref()?;
        Ok(common)
    }

    /// Reactor handles and the extension dictionary handle of an entity.
    fn read_reactors_and_dictionary_handle(
        &self,
        streams: &mut StreamSet,
    ) -> Result<(Vec<Handle>, Handle)> {
        // BL: number of reactors
        let reactor_count = streams.object_reader.read_bit_long()?;
        let count = checked_count(&streams.handles_reader, reactor_count, 8, "reactor")?;

        let mut reactors = Vec::with_capacity(count);
        for _ in 0..count {
            reactors.push(streams.handle_ref()?);
        }

        let xdictionary = streams.handle_ref()?;
        Ok((reactors, xdictionary))
    }

    /// Extended entity data, kept as raw bytes per application.
    fn read_extended_data(&self, streams: &mut StreamSet) -> Result<Vec<ExtendedData>> {
        let mut groups = Vec::new();

        loop {
            // BS: size of next app group (0 = end of EED)
            let size = streams.object_reader.read_bit_short()?;
            if size <= 0 {
                break;
            }

            // H: APPID handle
            let application = streams.object_reader.handle_reference()?;
            let data = streams.object_reader.read_bytes(size as usize)?;
            groups.push(ExtendedData {
                application: Handle::new(application.handle),
                data,
            });
        }

        Ok(groups)
    }
}
