//! DWG object reader: decodes single objects of the object area.
//!
//! # Architecture
//!
//! Objects in a DWG file are stored in arbitrary order and located through
//! the object map. Every decode is independent:
//!
//! 1. Seek to the object's offset and read its MS size.
//! 2. Copy the object bytes (size field, data and CRC) into a local buffer.
//! 3. Check the CRC, read the type code and position the handle stream.
//! 4. Dispatch on the type code to the type-specific reader.
//!
//! Nothing is cached between decodes, so one reader can be shared across
//! threads and decoding the same offset twice yields the same record.

pub mod common;
pub mod read_entities;
pub mod read_tables;

use encoding_rs::Encoding;

use crate::classes::DxfClassCollection;
use crate::entities::{Geometry, OpaqueCommon, OpaqueObject};
use crate::error::{DwgError, Result};
use crate::io::dwg::constants::CRC_SEED;
use crate::io::dwg::crc::crc8;
use crate::io::dwg::object_type::DwgObjectType;
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::io::dwg::reader::stream_reader_base::DwgStreamReaderBase;
use crate::types::Handle;

/// Coarse classification of an object, decided from its type code alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectClass {
    Layer,
    Geometry,
    Other,
}

/// Reader for objects in the object area of an R2000 file.
#[derive(Clone, Copy)]
pub struct DwgObjectReader<'a> {
    /// The whole file.
    file: &'a [u8],
    classes: &'a DxfClassCollection,
    encoding: &'static Encoding,
    verify_checksums: bool,
}

impl<'a> DwgObjectReader<'a> {
    pub fn new(
        file: &'a [u8],
        classes: &'a DxfClassCollection,
        encoding: &'static Encoding,
    ) -> Self {
        Self {
            file,
            classes,
            encoding,
            verify_checksums: true,
        }
    }

    /// Enable or disable the per-object CRC check.
    pub fn with_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    /// Read only the size and type code of the object at `offset`.
    pub fn peek_type(&self, offset: i64) -> Result<i16> {
        let start = self.object_start(offset)?;
        let mut reader = DwgStreamReaderBase::new(&self.file[start..]);
        // MS : Size of object, not including the CRC
        reader.read_modular_short()?;
        // BS : Object type
        reader.read_bit_short()
    }

    /// Classify the object at `offset` as layer, geometry or neither.
    pub fn classify(&self, offset: i64) -> Result<ObjectClass> {
        let type_code = self.peek_type(offset)?;
        Ok(self.classify_type(type_code))
    }

    /// Classification of a raw type code.
    pub fn classify_type(&self, type_code: i16) -> ObjectClass {
        match DwgObjectType::from_raw(type_code) {
            DwgObjectType::Layer => ObjectClass::Layer,
            t if t.is_geometry() => ObjectClass::Geometry,
            DwgObjectType::Unlisted => match self.classes.get_by_type_code(type_code) {
                Some(class) if class.is_an_entity() => ObjectClass::Geometry,
                _ => ObjectClass::Other,
            },
            _ => ObjectClass::Other,
        }
    }

    /// DXF name of a type code, from the fixed table or the class table.
    pub fn type_name(&self, type_code: i16) -> Result<String> {
        if let Some(name) = DwgObjectType::from_raw(type_code).dxf_name() {
            return Ok(name.to_string());
        }
        self.classes
            .get_by_type_code(type_code)
            .map(|c| c.dxf_name.clone())
            .ok_or(DwgError::UnknownObjectType(type_code))
    }

    /// Decode the object at `offset`.
    pub fn read_object(&self, offset: i64) -> Result<Geometry> {
        let buffer = self.object_buffer(offset)?;
        if self.verify_checksums {
            buffer.verify_crc(offset)?;
        }

        let mut streams = StreamSet::new(&buffer.data, self.encoding, buffer.size_field_len)?;
        // BS : Object type
        let type_code = streams.object_reader.read_bit_short()?;
        streams.type_code = type_code;
        log::trace!("object at {:#X}: type {} size {}", offset, type_code, buffer.size);

        let object = match DwgObjectType::from_raw(type_code) {
            DwgObjectType::Point => Geometry::Point(self.read_point(&mut streams)?),
            DwgObjectType::Line => Geometry::Line(self.read_line(&mut streams)?),
            DwgObjectType::Circle => Geometry::Circle(self.read_circle(&mut streams)?),
            DwgObjectType::Arc => Geometry::Arc(self.read_arc(&mut streams)?),
            DwgObjectType::Ellipse => Geometry::Ellipse(self.read_ellipse(&mut streams)?),
            DwgObjectType::Text => Geometry::Text(self.read_text(&mut streams)?),
            DwgObjectType::LwPolyline => {
                Geometry::LwPolyline(self.read_lwpolyline(&mut streams)?)
            }
            DwgObjectType::Polyline3D => {
                Geometry::Polyline3D(self.read_polyline_3d(&mut streams)?)
            }
            DwgObjectType::Vertex3D => Geometry::Vertex3D(self.read_vertex_3d(&mut streams)?),
            DwgObjectType::Solid => Geometry::Solid(self.read_solid(&mut streams)?),
            DwgObjectType::Layer => Geometry::Layer(self.read_layer(&mut streams)?),
            obj_type => Geometry::Opaque(self.read_opaque(obj_type, type_code, &mut streams)?),
        };

        Ok(object)
    }

    /// Read an object whose payload is not decoded.
    ///
    /// Fixed types are known to be entities or not; class-based types follow
    /// their class. A code with no mapping at all gets only the handle and
    /// extended data.
    fn read_opaque(
        &self,
        obj_type: DwgObjectType,
        type_code: i16,
        streams: &mut StreamSet,
    ) -> Result<OpaqueObject> {
        let (is_entity, dxf_name) = match obj_type {
            DwgObjectType::Unlisted => match self.classes.get_by_type_code(type_code) {
                Some(class) => (Some(class.is_an_entity()), Some(class.dxf_name.clone())),
                None => {
                    log::debug!("{}: read as opaque object", DwgError::UnknownObjectType(type_code));
                    (None, None)
                }
            },
            t => (Some(t.is_entity()), t.dxf_name().map(str::to_string)),
        };

        let common = match is_entity {
            Some(true) => OpaqueCommon::Entity(self.read_common_entity_data(streams)?),
            Some(false) => OpaqueCommon::Object(self.read_common_non_entity_data(streams)?),
            None => OpaqueCommon::Object(self.read_common_data(streams)?),
        };

        let data = streams.read_remaining_data()?;
        Ok(OpaqueObject {
            common,
            dxf_name,
            data,
        })
    }

    fn object_start(&self, offset: i64) -> Result<usize> {
        let start = usize::try_from(offset).map_err(|_| {
            DwgError::InvalidFormat(format!("negative object offset {}", offset))
        })?;
        if start >= self.file.len() {
            return Err(DwgError::TruncatedInput {
                position: start * 8,
                requested: 16,
                available: self.file.len() * 8,
            });
        }
        Ok(start)
    }

    /// Copy the object at `offset`: size field, data and trailing CRC.
    fn object_buffer(&self, offset: i64) -> Result<ObjectBuffer> {
        let start = self.object_start(offset)?;
        let mut reader = DwgStreamReaderBase::new(&self.file[start..]);
        let size = reader.read_modular_short()? as usize;
        let size_field_len = reader.position();

        // The size field is at most 4 bytes; the CRC takes 2 more
        let end = (start + size + 6).min(self.file.len());
        Ok(ObjectBuffer {
            data: self.file[start..end].to_vec(),
            size_field_len,
            size,
        })
    }
}

/// The bytes of one object.
struct ObjectBuffer {
    data: Vec<u8>,
    /// Length of the MS size field in bytes.
    size_field_len: usize,
    /// Object size as stored, without the size field and the CRC.
    size: usize,
}

impl ObjectBuffer {
    /// RS CRC after the object data, over the size field and the data.
    fn verify_crc(&self, offset: i64) -> Result<()> {
        let covered = self.size_field_len + self.size;
        let mut reader = DwgStreamReaderBase::new(&self.data);
        reader.set_position(covered)?;
        let expected = reader.read_raw_ushort()?;
        let actual = crc8(CRC_SEED, &self.data[..covered]);
        if expected != actual {
            return Err(DwgError::ChecksumMismatch {
                context: format!("object at {:#X}", offset),
                expected,
                actual,
            });
        }
        Ok(())
    }
}

/// The two sub-streams of an object: data and handles.
///
/// Handle references are read from the handle stream in the order the data
/// stream calls for them.
pub struct StreamSet<'b> {
    pub object_reader: DwgStreamReaderBase<'b>,
    pub handles_reader: DwgStreamReaderBase<'b>,
    /// Bit position where the object data starts (after the MS size).
    object_initial_pos: usize,
    /// Bit position of the handle stream, known once the RL size is read.
    handle_stream_pos: usize,
    /// Raw type code of the object being read.
    pub type_code: i16,
    /// Handle of the object being read; relative references resolve
    /// against it.
    pub current_handle: u64,
}

impl<'b> StreamSet<'b> {
    fn new(data: &'b [u8], encoding: &'static Encoding, size_field_len: usize) -> Result<Self> {
        let object_initial_pos = size_field_len * 8;
        let mut object_reader = DwgStreamReaderBase::new(data).with_encoding(encoding);
        object_reader.set_position_in_bits(object_initial_pos)?;
        Ok(Self {
            object_reader,
            handles_reader: DwgStreamReaderBase::new(data).with_encoding(encoding),
            object_initial_pos,
            handle_stream_pos: data.len() * 8,
            type_code: 0,
            current_handle: 0,
        })
    }

    /// RL: size of the data stream in bits. Positions the handle reader at
    /// the end of the data stream.
    pub fn update_handle_reader(&mut self) -> Result<u32> {
        let size = self.object_reader.read_raw_long()?;
        let size_in_bits = u32::try_from(size).map_err(|_| {
            DwgError::InvalidFormat(format!("negative object size in bits {}", size))
        })?;
        let end_bits = self.object_initial_pos + size_in_bits as usize;
        self.handles_reader.set_position_in_bits(end_bits)?;
        self.handle_stream_pos = end_bits;
        Ok(size_in_bits)
    }

    /// Read a handle reference from the handle stream and resolve it.
    pub fn handle_ref(&mut self) -> Result<Handle> {
        self.handles_reader
            .handle_reference_resolved(self.current_handle)
            .map(Handle::new)
    }

    /// Whole bytes left in the data stream before the handle stream.
    pub fn read_remaining_data(&mut self) -> Result<Vec<u8>> {
        let pos = self.object_reader.position_in_bits();
        let bytes = self.handle_stream_pos.saturating_sub(pos) / 8;
        self.object_reader.read_bytes(bytes)
    }
}

/// Validate a stored item count against the bits left in `reader`, at
/// least `min_bits` per item.
pub(super) fn checked_count(
    reader: &dyn IDwgStreamReader,
    count: i32,
    min_bits: usize,
    what: &str,
) -> Result<usize> {
    let available = reader.remaining_bits();
    match usize::try_from(count) {
        Ok(n) if n.saturating_mul(min_bits) <= available => Ok(n),
        _ => Err(DwgError::InvalidFormat(format!(
            "{} count {} does not fit in {} remaining bits",
            what, count, available
        ))),
    }
}
