//! DWG Handle/Object Map section reader.
//!
//! Reads the handle-to-file-offset map from the `AcDb:Handles` section.
//! This map allows looking up any object's file position by its handle.
//!
//! The section is organized as a series of chunks, each containing
//! delta-encoded handle/offset pairs. Writers keep chunks to 2032 bytes.
//! Deltas restart from zero in every chunk.

use indexmap::IndexMap;

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::{handle_section, section_names, CRC_SEED};
use crate::io::dwg::crc::crc8;
use crate::io::dwg::file_header::DwgSectionLocatorRecord;
use crate::io::dwg::reader::header_reader::section_start;
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::io::dwg::reader::stream_reader_base::DwgStreamReaderBase;
use crate::io::dwg::reader::DwgReaderConfiguration;
use crate::notification::{NotificationCollection, NotificationType};

/// One resolved object map entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectMapEntry {
    pub handle: i64,
    /// Absolute byte offset of the object in the file.
    pub offset: i64,
}

/// Prefix-sum the `(handle delta, offset delta)` pairs of one chunk.
pub fn resolve_section_deltas(deltas: &[(i64, i64)]) -> Vec<ObjectMapEntry> {
    deltas
        .iter()
        .scan((0i64, 0i64), |(handle, offset), &(dh, doff)| {
            *handle += dh;
            *offset += doff;
            Some(ObjectMapEntry {
                handle: *handle,
                offset: *offset,
            })
        })
        .collect()
}

/// Index from object handle to file offset.
#[derive(Debug, Clone, Default)]
pub struct ObjectMap {
    entries: Vec<ObjectMapEntry>,
    offsets: IndexMap<u64, i64>,
}

impl ObjectMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the resolved entries of one chunk. Entries with a null
    /// handle are kept in the entry list but not indexed.
    pub fn extend_section(&mut self, entries: Vec<ObjectMapEntry>) {
        for entry in &entries {
            if entry.handle > 0 {
                self.offsets.insert(entry.handle as u64, entry.offset);
            }
        }
        self.entries.extend(entries);
    }

    /// Offset of the object with the given handle.
    pub fn offset_of(&self, handle: u64) -> Option<i64> {
        self.offsets.get(&handle).copied()
    }

    pub fn contains(&self, handle: u64) -> bool {
        self.offsets.contains_key(&handle)
    }

    /// Number of distinct handles.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// All entries in file order, duplicates included.
    pub fn entries(&self) -> &[ObjectMapEntry] {
        &self.entries
    }

    /// Distinct `(handle, offset)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, i64)> + '_ {
        self.offsets.iter().map(|(h, o)| (*h, *o))
    }
}

/// Reader for the DWG `AcDb:Handles` (object map) section.
pub struct DwgHandleReader<'a> {
    /// The whole file.
    file: &'a [u8],
    record: DwgSectionLocatorRecord,
}

impl<'a> DwgHandleReader<'a> {
    pub fn new(file: &'a [u8], record: DwgSectionLocatorRecord) -> Self {
        Self { file, record }
    }

    /// Read the handle-to-offset map.
    pub fn read(
        &self,
        config: &DwgReaderConfiguration,
        notifications: &mut NotificationCollection,
    ) -> Result<ObjectMap> {
        let start = section_start(self.file, &self.record, section_names::HANDLES)?;
        let end = self
            .record
            .byte_range()
            .map_or(self.file.len(), |r| r.end.min(self.file.len()));
        let mut reader = DwgStreamReaderBase::new(&self.file[start..end.max(start)]);
        let mut map = ObjectMap::new();
        let mut chunk = 0usize;

        // Repeat until section size == 2 (the last empty section, except CRC)
        loop {
            let chunk_start = reader.position();

            // Short: size of this section. Note this is in BIGENDIAN order (MSB first)
            let hi = reader.read_byte()? as usize;
            let lo = reader.read_byte()? as usize;
            let size = (hi << 8) | lo;

            if size < handle_section::TERMINATOR_SIZE {
                return Err(DwgError::CorruptSection {
                    section: section_names::HANDLES,
                    reason: format!("chunk {} declares size {}", chunk, size),
                });
            }
            if size == handle_section::TERMINATOR_SIZE {
                let crc = read_crc_be(&mut reader)?;
                self.check_crc(config, chunk, crc, &reader.data()[chunk_start..chunk_start + 2], notifications);
                break;
            }

            // Writers cut chunks at MAX_CHUNK_SIZE, readers trust the declared size
            let last_position = reader.position() + (size - 2);

            // Repeat until out of data for this section
            let mut deltas = Vec::new();
            while reader.position() < last_position {
                // Offset of this handle from last handle as modular char
                let handle_delta = reader.read_modular_char()? as i64;
                // Offset of location in file from last loc as signed modular char
                let offset_delta = reader.read_signed_modular_char()?;
                deltas.push((handle_delta, offset_delta));
            }

            // CRC (most significant byte followed by least significant byte)
            let data_end = reader.position();
            let crc = read_crc_be(&mut reader)?;
            self.check_crc(config, chunk, crc, &reader.data()[chunk_start..data_end], notifications);

            log::trace!("object map chunk {}: {} entries", chunk, deltas.len());
            map.extend_section(resolve_section_deltas(&deltas));
            chunk += 1;
        }

        log::debug!("{}: {} objects in {} chunks", section_names::HANDLES, map.len(), chunk);
        Ok(map)
    }

    fn check_crc(
        &self,
        config: &DwgReaderConfiguration,
        chunk: usize,
        stored: u16,
        covered: &[u8],
        notifications: &mut NotificationCollection,
    ) {
        if !config.verify_checksums {
            return;
        }
        let actual = crc8(CRC_SEED, covered);
        if actual != stored {
            notifications.notify(
                NotificationType::Warning,
                format!(
                    "{} chunk {}: CRC mismatch, stored {:#06X}, computed {:#06X}",
                    section_names::HANDLES,
                    chunk,
                    stored,
                    actual
                ),
            );
        }
    }
}

fn read_crc_be(reader: &mut dyn IDwgStreamReader) -> Result<u16> {
    let hi = reader.read_byte()? as u16;
    let lo = reader.read_byte()? as u16;
    Ok((hi << 8) | lo)
}
