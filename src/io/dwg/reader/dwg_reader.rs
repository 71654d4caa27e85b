//! DWG reader orchestrator, the main entry point for reading DWG files.
//!
//! Reads the file header, checks and reads the header, classes and object
//! map sections, classifies every mapped object and hands the result over
//! as a [`DwgDocument`]. Objects themselves are decoded on demand by the
//! document.
//!
//! # Usage
//!
//! ```rust,ignore
//! use acaddwg::io::dwg::reader::DwgReader;
//!
//! let doc = DwgReader::from_file("sample.dwg")?.read()?;
//! println!("{} geometries", doc.geometry_count());
//! ```

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::document::DwgDocument;
use crate::error::{DwgError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::{DxfVersion, Handle};

use super::super::constants::{file_header, section_names, CRC_SEED};
use super::super::crc::crc8;
use super::super::file_header::{DwgFileHeader, DwgFileHeaderAC15, DwgSectionLocatorRecord};
use super::object_reader::{DwgObjectReader, ObjectClass};
use super::stream_reader::encoding_from_code_page;
use super::{DwgClassesReader, DwgHandleReader, DwgHeaderReader};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for the DWG reader.
#[derive(Debug, Clone)]
pub struct DwgReaderConfiguration {
    /// Verify object CRCs (a mismatch fails that object's decode) and
    /// section CRCs (a mismatch is a warning).
    ///
    /// Default: `true`.
    pub verify_checksums: bool,

    /// Treat a section end sentinel mismatch as a fatal `CorruptSection`
    /// instead of a warning.
    ///
    /// Default: `false`.
    pub strict_end_sentinels: bool,

    /// When `true`, objects that cannot be classified while opening are
    /// reported as notifications instead of aborting the read.
    ///
    /// Default: `true`.
    pub failsafe: bool,
}

impl Default for DwgReaderConfiguration {
    fn default() -> Self {
        Self {
            verify_checksums: true,
            strict_end_sentinels: false,
            failsafe: true,
        }
    }
}

// ---------------------------------------------------------------------------
// DwgReader
// ---------------------------------------------------------------------------

/// Progress of [`DwgReader::read`].
enum ReadState {
    /// Nothing read yet.
    Preamble,
    /// File header read; section locations known.
    SectionLocated(DwgFileHeaderAC15),
    Done(Box<DwgDocument>),
}

/// DWG file reader, reads an R2000 file and produces a [`DwgDocument`].
///
/// The whole file is held in memory; object offsets in the object map are
/// absolute file positions.
pub struct DwgReader {
    data: Vec<u8>,

    /// User configuration.
    config: DwgReaderConfiguration,

    /// Notifications collected during reading.
    notifications: NotificationCollection,
}

impl DwgReader {
    /// Open a DWG file by path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        log::debug!("read {} bytes from {}", data.len(), path.as_ref().display());
        Ok(Self::from_bytes(data))
    }

    /// Create a DWG reader over a file already in memory.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            config: DwgReaderConfiguration::default(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Create a DWG reader from any byte stream; the stream is read to end.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::from_bytes(data))
    }

    /// Set configuration options.
    pub fn with_config(mut self, config: DwgReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the file and return a [`DwgDocument`].
    pub fn read(mut self) -> Result<DwgDocument> {
        let mut state = ReadState::Preamble;
        loop {
            state = match state {
                ReadState::Preamble => ReadState::SectionLocated(self.read_file_header()?),
                ReadState::SectionLocated(header) => {
                    ReadState::Done(Box::new(self.read_sections(header)?))
                }
                ReadState::Done(document) => return Ok(*document),
            };
        }
    }

    // ------------------------------------------------------------------
    // File header reading
    // ------------------------------------------------------------------

    /// Read the version tag and, for supported versions, the file header.
    fn read_file_header(&mut self) -> Result<DwgFileHeaderAC15> {
        let tag_len = file_header::VERSION_TAG_LEN;
        if self.data.len() < tag_len {
            return Err(DwgError::TruncatedInput {
                position: 0,
                requested: tag_len * 8,
                available: self.data.len() * 8,
            });
        }
        let tag = &self.data[..tag_len];
        let version = DxfVersion::from_tag_bytes(tag);
        if !version.is_dwg_supported() {
            return Err(DwgError::UnsupportedVersion(
                String::from_utf8_lossy(tag).into_owned(),
            ));
        }
        self.read_file_header_ac15(version)
    }

    /// Read the AC15 (R13–R2000) file header.
    ///
    /// Format:
    /// - 6 bytes: version string
    /// - 7 bytes: padding, the maintenance version at index 5
    /// - 4 bytes: preview address
    /// - 2 bytes: undocumented
    /// - 2 bytes: code page
    /// - 4 bytes: number of section locator records
    /// - N × 9 bytes: section locator records (number, seeker, size)
    /// - 2 bytes: CRC
    /// - 16 bytes: end sentinel
    fn read_file_header_ac15(&mut self, version: DxfVersion) -> Result<DwgFileHeaderAC15> {
        let mut header = DwgFileHeaderAC15::new(version);
        let mut reader = Cursor::new(self.data.as_slice());
        reader.set_position(file_header::VERSION_TAG_LEN as u64);

        let mut padding = [0u8; 7];
        reader.read_exact(&mut padding).map_err(|e| self.eof(e))?;
        header.maintenance_version = padding[5];

        // 0x0D: Preview image address
        reader.set_position(file_header::IMAGE_SEEKER_OFFSET);
        header.preview_address = reader.read_i32::<LittleEndian>().map_err(|e| self.eof(e))? as i64;

        // 0x13: Drawing code page
        reader.set_position(file_header::CODE_PAGE_OFFSET);
        header.drawing_code_page = reader.read_u16::<LittleEndian>().map_err(|e| self.eof(e))?;

        // 0x15: Number of section locator records
        reader.set_position(file_header::RECORD_COUNT_OFFSET);
        let count = reader.read_i32::<LittleEndian>().map_err(|e| self.eof(e))?;
        let available = self.data.len() / file_header::LOCATOR_RECORD_SIZE;
        let count = usize::try_from(count)
            .ok()
            .filter(|c| *c <= available)
            .ok_or_else(|| DwgError::InvalidFormat(format!("{} section locator records", count)))?;

        for _ in 0..count {
            let number = reader.read_u8().map_err(|e| self.eof(e))?;
            let seeker = reader.read_i32::<LittleEndian>().map_err(|e| self.eof(e))?;
            let size = reader.read_i32::<LittleEndian>().map_err(|e| self.eof(e))?;
            header.records.push(DwgSectionLocatorRecord::new(number, seeker, size));
        }

        // RS: CRC over everything before it, XOR-ed with a record count mask
        let covered = reader.position() as usize;
        header.crc = reader.read_u16::<LittleEndian>().map_err(|e| self.eof(e))?;
        if self.config.verify_checksums {
            let actual = crc8(CRC_SEED, &self.data[..covered])
                ^ DwgFileHeaderAC15::crc_xor_mask(count);
            if actual != header.crc {
                self.notifications.notify(
                    NotificationType::Warning,
                    format!(
                        "file header: CRC mismatch, stored {:#06X}, computed {:#06X}",
                        header.crc, actual
                    ),
                );
            }
        }

        let mut sentinel = [0u8; 16];
        reader.read_exact(&mut sentinel).map_err(|e| self.eof(e))?;
        if &sentinel != DwgFileHeaderAC15::end_sentinel() {
            self.notifications.notify(
                NotificationType::Warning,
                format!("file header: end sentinel mismatch at byte {:#X}", covered + 2),
            );
        }

        log::debug!(
            "{} file header: code page {}, {} section records",
            version,
            header.drawing_code_page,
            header.records.len()
        );
        Ok(header)
    }

    // ------------------------------------------------------------------
    // Section reading
    // ------------------------------------------------------------------

    /// Read the three located sections and classify the mapped objects.
    fn read_sections(&mut self, header: DwgFileHeaderAC15) -> Result<DwgDocument> {
        let encoding = encoding_from_code_page(header.drawing_code_page);

        let header_record = Self::required(header.header_record(), section_names::HEADER)?;
        let header_section = DwgHeaderReader::new(&self.data, header_record)
            .read(&self.config, &mut self.notifications)?;

        let classes_record = Self::required(header.classes_record(), section_names::CLASSES)?;
        let classes = DwgClassesReader::new(&self.data, classes_record, encoding)
            .read(&self.config, &mut self.notifications)?;

        let handles_record = Self::required(header.handles_record(), section_names::HANDLES)?;
        let object_map = DwgHandleReader::new(&self.data, handles_record)
            .read(&self.config, &mut self.notifications)?;

        let mut layer_handles = Vec::new();
        let mut geometry_handles = Vec::new();
        {
            let object_reader = DwgObjectReader::new(&self.data, &classes, encoding);
            for (handle, offset) in object_map.iter() {
                match object_reader.classify(offset) {
                    Ok(ObjectClass::Layer) => layer_handles.push(Handle::new(handle)),
                    Ok(ObjectClass::Geometry) => geometry_handles.push(Handle::new(handle)),
                    Ok(ObjectClass::Other) => {}
                    Err(e) if self.config.failsafe => self.notifications.notify(
                        NotificationType::Error,
                        format!(
                            "object {:#X} at {:#X} could not be classified: {}",
                            handle, offset, e
                        ),
                    ),
                    Err(e) => return Err(e),
                }
            }
        }

        log::debug!(
            "{} layers, {} geometries of {} mapped objects",
            layer_handles.len(),
            geometry_handles.len(),
            object_map.len()
        );

        Ok(DwgDocument {
            data: std::mem::take(&mut self.data),
            file_header: DwgFileHeader::AC15(header),
            header_section,
            classes,
            object_map,
            layer_handles,
            geometry_handles,
            notifications: std::mem::take(&mut self.notifications),
            encoding,
            verify_checksums: self.config.verify_checksums,
        })
    }

    fn required(
        record: Option<&DwgSectionLocatorRecord>,
        section: &'static str,
    ) -> Result<DwgSectionLocatorRecord> {
        record.copied().ok_or_else(|| DwgError::CorruptSection {
            section,
            reason: "no section locator record".into(),
        })
    }

    /// Map an end-of-data read error in the file header to `TruncatedInput`.
    fn eof(&self, error: std::io::Error) -> DwgError {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            DwgError::TruncatedInput {
                position: 0,
                requested: file_header::RECORD_COUNT_OFFSET as usize * 8,
                available: self.data.len() * 8,
            }
        } else {
            DwgError::Io(error)
        }
    }
}
