//! R2000 fixture builders.
//!
//! `DwgFileBuilder` synthesizes a complete file: preamble with locator
//! table, header and classes sections framed by sentinels, the objects,
//! and the object map last.

#![allow(dead_code)]

use acaddwg::io::dwg::constants::{handle_section, sentinels, CRC_SEED};
use acaddwg::io::dwg::crc::crc8;
use acaddwg::io::dwg::DwgFileHeaderAC15;
use acaddwg::Vector3;

pub use super::bit_writer::{modular_char, signed_modular_char, BitWriter};

// ===========================================================================
// Objects
// ===========================================================================

/// Handle codes used in the fixtures.
pub mod code {
    pub const SOFT_OWNER: u8 = 2;
    pub const HARD_OWNER: u8 = 3;
    pub const SOFT_POINTER: u8 = 4;
    pub const HARD_POINTER: u8 = 5;
}

/// One object: data stream and handle stream, written in parallel.
#[derive(Debug, Clone)]
pub struct ObjectBuilder {
    pub type_code: i16,
    pub data: BitWriter,
    pub handles: BitWriter,
}

impl ObjectBuilder {
    /// Type code and handle; extended data is empty.
    pub fn new(type_code: i16, handle: u64) -> Self {
        let mut object = Self {
            type_code,
            data: BitWriter::new(),
            handles: BitWriter::new(),
        };
        object.data.h(0, handle);
        object.data.bs(0);
        object
    }

    /// Entity prologue in model space without chain links.
    pub fn entity(type_code: i16, handle: u64, layer: u64) -> Self {
        Self::entity_with(type_code, handle, layer, None)
    }

    /// Entity prologue; `links` are absolute previous and next handles.
    pub fn entity_with(
        type_code: i16,
        handle: u64,
        layer: u64,
        links: Option<(u64, u64)>,
    ) -> Self {
        let mut object = Self::new(type_code, handle);
        object.data.b(false); // graphics
        object.data.bb(2); // model space
        object.data.bl(0); // reactors
        object.handles.h(code::HARD_OWNER, 0);
        object.data.b(links.is_none());
        if let Some((prev, next)) = links {
            object.handles.h(code::SOFT_POINTER, prev);
            object.handles.h(code::SOFT_POINTER, next);
        }
        object.data.bs(256); // by layer
        object.data.bd(1.0);
        object.handles.h(code::HARD_POINTER, layer);
        object.data.bb(0);
        object.data.bb(0);
        object.data.bs(0);
        object.data.rc(29);
        object
    }

    /// Non-entity prologue: no reactors, no extension dictionary.
    pub fn non_entity(type_code: i16, handle: u64, owner: u64) -> Self {
        let mut object = Self::new(type_code, handle);
        object.data.bl(0);
        object.handles.h(code::SOFT_POINTER, owner);
        object.handles.h(code::HARD_OWNER, 0);
        object
    }

    /// MS size, type, RL size in bits, both streams and the CRC.
    pub fn build(&self) -> Vec<u8> {
        let mut type_bits = BitWriter::new();
        type_bits.bs(self.type_code);

        let mut all = BitWriter::new();
        all.append(&type_bits);
        all.rl((type_bits.bit_len() + 32 + self.data.bit_len()) as i32);
        all.append(&self.data);
        all.append(&self.handles);

        let body = all.into_bytes();
        let size = body.len();
        assert!(size < 0x8000, "fixture objects use a one-word size");
        let mut out = vec![(size & 0xFF) as u8, ((size >> 8) & 0x7F) as u8];
        out.extend_from_slice(&body);
        let crc = crc8(CRC_SEED, &out);
        out.extend_from_slice(&crc.to_le_bytes());
        out
    }
}

pub fn circle(handle: u64, layer: u64, center: Vector3, radius: f64) -> Vec<u8> {
    let mut o = ObjectBuilder::entity(0x12, handle, layer);
    o.data.bd3(center);
    o.data.bd(radius);
    o.data.bt(0.0);
    o.data.be(Vector3::UNIT_Z);
    o.build()
}

pub fn line(handle: u64, layer: u64, start: Vector3, end: Vector3) -> Vec<u8> {
    let mut o = ObjectBuilder::entity(0x13, handle, layer);
    let flat = start.z == 0.0 && end.z == 0.0;
    o.data.b(flat);
    o.data.rd(start.x);
    o.data.dd(end.x, start.x);
    o.data.rd(start.y);
    o.data.dd(end.y, start.y);
    if !flat {
        o.data.rd(start.z);
        o.data.dd(end.z, start.z);
    }
    o.data.bt(0.0);
    o.data.be(Vector3::UNIT_Z);
    o.build()
}

pub fn point(handle: u64, layer: u64, location: Vector3) -> Vec<u8> {
    let mut o = ObjectBuilder::entity(0x1B, handle, layer);
    o.data.bd3(location);
    o.data.bt(0.0);
    o.data.be(Vector3::UNIT_Z);
    o.data.bd(0.0);
    o.build()
}

pub fn arc(handle: u64, layer: u64, center: Vector3, radius: f64, start: f64, end: f64) -> Vec<u8> {
    let mut o = ObjectBuilder::entity(0x11, handle, layer);
    o.data.bd3(center);
    o.data.bd(radius);
    o.data.bt(0.0);
    o.data.be(Vector3::UNIT_Z);
    o.data.bd(start);
    o.data.bd(end);
    o.build()
}

pub fn ellipse(handle: u64, layer: u64, center: Vector3, major_axis: Vector3, ratio: f64) -> Vec<u8> {
    let mut o = ObjectBuilder::entity(0x23, handle, layer);
    o.data.bd3(center);
    o.data.bd3(major_axis);
    o.data.bd3(Vector3::UNIT_Z);
    o.data.bd(ratio);
    o.data.bd(0.0);
    o.data.bd(std::f64::consts::TAU);
    o.build()
}

/// Text with insertion point, height and value; every optional field absent.
pub fn text(handle: u64, layer: u64, x: f64, y: f64, height: f64, value: &str, style: u64) -> Vec<u8> {
    let mut o = ObjectBuilder::entity(0x01, handle, layer);
    o.data.rc(0xFF);
    o.data.rd2(x, y);
    o.data.be(Vector3::UNIT_Z);
    o.data.bt(0.0);
    o.data.rd(height);
    o.data.tv(value);
    o.handles.h(code::HARD_POINTER, style);
    o.build()
}

/// Open lightweight polyline through `points`, with optional bulges.
pub fn lwpolyline(handle: u64, layer: u64, points: &[(f64, f64)], bulges: &[f64]) -> Vec<u8> {
    let mut o = ObjectBuilder::entity(0x4D, handle, layer);
    let flags: i16 = if bulges.is_empty() { 0 } else { 0x10 };
    o.data.bs(flags);
    o.data.bl(points.len() as i32);
    if !bulges.is_empty() {
        o.data.bl(bulges.len() as i32);
    }
    let mut last = (0.0, 0.0);
    for (i, &(x, y)) in points.iter().enumerate() {
        if i == 0 {
            o.data.rd2(x, y);
        } else {
            o.data.dd(x, last.0);
            o.data.dd(y, last.1);
        }
        last = (x, y);
    }
    for &bulge in bulges {
        o.data.bd(bulge);
    }
    o.build()
}

pub fn solid(handle: u64, layer: u64, elevation: f64, corners: [(f64, f64); 4]) -> Vec<u8> {
    let mut o = ObjectBuilder::entity(0x1F, handle, layer);
    o.data.bt(0.0);
    o.data.bd(elevation);
    for (x, y) in corners {
        o.data.rd2(x, y);
    }
    o.data.be(Vector3::UNIT_Z);
    o.build()
}

pub fn polyline_3d(handle: u64, layer: u64, first: u64, last: u64, seqend: u64) -> Vec<u8> {
    let mut o = ObjectBuilder::entity(0x10, handle, layer);
    o.data.rc(0);
    o.data.rc(1);
    o.handles.h(code::SOFT_OWNER, first);
    o.handles.h(code::SOFT_OWNER, last);
    o.handles.h(code::HARD_OWNER, seqend);
    o.build()
}

/// A vertex; `links` chains it to its neighbours.
pub fn vertex_3d(handle: u64, layer: u64, location: Vector3, links: Option<(u64, u64)>) -> Vec<u8> {
    let mut o = ObjectBuilder::entity_with(0x0B, handle, layer, links);
    o.data.rc(0x20);
    o.data.bd3(location);
    o.build()
}

/// Layer record owned by the layer control object.
pub fn layer(handle: u64, owner: u64, name: &str, flags: u16, color: i16) -> Vec<u8> {
    let mut o = ObjectBuilder::non_entity(0x33, handle, owner);
    o.data.tv(name);
    o.data.b(false);
    o.data.bs(0);
    o.data.b(false);
    o.data.bs(flags as i16);
    o.data.bs(color);
    o.handles.h(code::HARD_POINTER, 0);
    o.handles.h(code::HARD_POINTER, 0);
    o.handles.h(code::HARD_POINTER, 0x14);
    o.build()
}

/// A non-entity without a payload decoder (type 0x32, layer control).
pub fn layer_control(handle: u64, entries: &[u64]) -> Vec<u8> {
    let mut o = ObjectBuilder::non_entity(0x32, handle, 0);
    o.data.bl(entries.len() as i32);
    for entry in entries {
        o.handles.h(code::SOFT_OWNER, *entry);
    }
    o.build()
}

// ===========================================================================
// Files
// ===========================================================================

/// A class table entry of the fixture.
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub number: i16,
    pub dxf_name: String,
    pub cpp_name: String,
    pub is_entity: bool,
}

/// A synthesized file and where its parts landed.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub bytes: Vec<u8>,
    pub header_offset: usize,
    pub classes_offset: usize,
    /// Absolute offset of every object, in insertion order.
    pub object_offsets: Vec<(u64, usize)>,
    pub object_map_offset: usize,
}

impl Fixture {
    pub fn offset_of(&self, handle: u64) -> Option<usize> {
        self.object_offsets
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, o)| *o)
    }
}

/// Builder for complete R2000 files.
#[derive(Debug, Clone)]
pub struct DwgFileBuilder {
    version: [u8; 6],
    code_page: u16,
    header_vars: Vec<u8>,
    classes: Vec<ClassDef>,
    objects: Vec<(u64, Vec<u8>)>,
    /// Object map entries without object bytes.
    phantoms: Vec<(u64, usize)>,
    header_end_sentinel: [u8; 16],
    classes_start_sentinel: [u8; 16],
}

impl Default for DwgFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DwgFileBuilder {
    pub fn new() -> Self {
        Self {
            version: *b"AC1015",
            code_page: 30, // ANSI_1252
            header_vars: vec![0x55; 24],
            classes: Vec::new(),
            objects: Vec::new(),
            phantoms: Vec::new(),
            header_end_sentinel: sentinels::HEADER_END,
            classes_start_sentinel: sentinels::CLASSES_START,
        }
    }

    pub fn version(mut self, tag: &[u8; 6]) -> Self {
        self.version = *tag;
        self
    }

    pub fn code_page(mut self, code_page: u16) -> Self {
        self.code_page = code_page;
        self
    }

    pub fn header_end_sentinel(mut self, sentinel: [u8; 16]) -> Self {
        self.header_end_sentinel = sentinel;
        self
    }

    pub fn classes_start_sentinel(mut self, sentinel: [u8; 16]) -> Self {
        self.classes_start_sentinel = sentinel;
        self
    }

    pub fn class(mut self, number: i16, dxf_name: &str, is_entity: bool) -> Self {
        self.classes.push(ClassDef {
            number,
            dxf_name: dxf_name.to_string(),
            cpp_name: format!("AcDb{}", dxf_name),
            is_entity,
        });
        self
    }

    pub fn object(mut self, handle: u64, bytes: Vec<u8>) -> Self {
        self.add_object(handle, bytes);
        self
    }

    pub fn add_object(&mut self, handle: u64, bytes: Vec<u8>) {
        self.objects.push((handle, bytes));
    }

    /// Map `handle` to an arbitrary offset with nothing written there.
    pub fn phantom(mut self, handle: u64, offset: usize) -> Self {
        self.phantoms.push((handle, offset));
        self
    }

    /// Preamble length: tag, padding, fields, three records, CRC, sentinel.
    const PREAMBLE_LEN: usize = 0x19 + 3 * 9 + 2 + 16;

    pub fn build(&self) -> Fixture {
        let header_offset = Self::PREAMBLE_LEN;
        let header = framed_section(
            &self.header_vars,
            &sentinels::HEADER_START,
            &self.header_end_sentinel,
        );

        let classes_offset = header_offset + header.len();
        let classes = framed_section(
            &self.class_bytes(),
            &self.classes_start_sentinel,
            &sentinels::CLASSES_END,
        );

        let mut body = Vec::new();
        body.extend_from_slice(&header);
        body.extend_from_slice(&classes);

        let mut object_offsets = Vec::new();
        for (handle, bytes) in &self.objects {
            object_offsets.push((*handle, Self::PREAMBLE_LEN + body.len()));
            body.extend_from_slice(bytes);
        }

        let object_map_offset = Self::PREAMBLE_LEN + body.len();
        let mut mapped = object_offsets.clone();
        mapped.extend_from_slice(&self.phantoms);
        let map = object_map(&mapped);
        body.extend_from_slice(&map);

        let mut bytes = self.preamble(&[
            (0, header_offset, header.len()),
            (1, classes_offset, classes.len()),
            (2, object_map_offset, map.len()),
        ]);
        debug_assert_eq!(bytes.len(), Self::PREAMBLE_LEN);
        bytes.extend_from_slice(&body);

        Fixture {
            bytes,
            header_offset,
            classes_offset,
            object_offsets,
            object_map_offset,
        }
    }

    fn preamble(&self, records: &[(u8, usize, usize)]) -> Vec<u8> {
        let mut out = self.version.to_vec();
        // padding; maintenance version at index 5
        out.extend_from_slice(&[0, 0, 0, 0, 0, 8, 1]);
        out.extend_from_slice(&0i32.to_le_bytes()); // 0x0D preview
        out.extend_from_slice(&[0x1B, 0x19]); // 0x11 undocumented
        out.extend_from_slice(&self.code_page.to_le_bytes()); // 0x13
        out.extend_from_slice(&(records.len() as i32).to_le_bytes()); // 0x15
        for (number, seeker, size) in records {
            out.push(*number);
            out.extend_from_slice(&(*seeker as i32).to_le_bytes());
            out.extend_from_slice(&(*size as i32).to_le_bytes());
        }
        let crc = crc8(CRC_SEED, &out) ^ DwgFileHeaderAC15::crc_xor_mask(records.len());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(DwgFileHeaderAC15::end_sentinel());
        out
    }

    fn class_bytes(&self) -> Vec<u8> {
        let mut bits = BitWriter::new();
        for class in &self.classes {
            bits.bs(class.number);
            bits.bs(0);
            bits.tv("ObjectDBX Classes");
            bits.tv(&class.cpp_name);
            bits.tv(&class.dxf_name);
            bits.b(false);
            bits.bs(if class.is_entity { 0x1F2 } else { 0x1F3 });
        }
        bits.into_bytes()
    }
}

/// Start sentinel, RL size, data, RS CRC over size and data, end sentinel.
pub fn framed_section(data: &[u8], start: &[u8; 16], end: &[u8; 16]) -> Vec<u8> {
    let mut body = (data.len() as i32).to_le_bytes().to_vec();
    body.extend_from_slice(data);
    let crc = crc8(CRC_SEED, &body);

    let mut out = start.to_vec();
    out.extend_from_slice(&body);
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(end);
    out
}

/// Object map: chunks of at most 2032 entry bytes, each restarting the
/// handle and offset deltas, then the empty terminating chunk.
pub fn object_map(objects: &[(u64, usize)]) -> Vec<u8> {
    let mut sorted = objects.to_vec();
    sorted.sort_by_key(|(h, _)| *h);

    let mut out = Vec::new();
    let mut entries = Vec::new();
    let mut last = (0u64, 0i64);
    for (handle, offset) in sorted {
        let offset = offset as i64;
        let mut entry = modular_char(handle - last.0);
        entry.extend(signed_modular_char(offset - last.1));
        if entries.len() + entry.len() > handle_section::MAX_CHUNK_SIZE {
            push_chunk(&mut out, &entries);
            entries.clear();
            entry = modular_char(handle);
            entry.extend(signed_modular_char(offset));
        }
        entries.extend(entry);
        last = (handle, offset);
    }
    if !entries.is_empty() {
        push_chunk(&mut out, &entries);
    }
    push_chunk(&mut out, &[]);
    out
}

fn push_chunk(out: &mut Vec<u8>, entries: &[u8]) {
    let size = entries.len() + 2;
    let mut chunk = vec![(size >> 8) as u8, (size & 0xFF) as u8];
    chunk.extend_from_slice(entries);
    let crc = crc8(CRC_SEED, &chunk);
    out.extend_from_slice(&chunk);
    out.extend_from_slice(&crc.to_be_bytes());
}
