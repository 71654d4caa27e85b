//! DWG file header structures.
//!
//! The file header is the preamble at offset 0: version tag, preview seeker,
//! drawing code page and the table of section locator records that the rest
//! of the decode is driven from.

mod section_locator;

pub use section_locator::DwgSectionLocatorRecord;

use crate::types::DxfVersion;

use super::constants::{section_locator as locator_index, sentinels};

/// DWG file header, one variant per structural layout.
///
/// Only the record-based R13–R2000 layout is decoded; later layouts would be
/// added as further variants.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum DwgFileHeader {
    /// R13–R2000 (AC1012/AC1014/AC1015) record-based layout
    AC15(DwgFileHeaderAC15),
}

impl DwgFileHeader {
    /// Version tag the header was read with.
    pub fn version(&self) -> DxfVersion {
        match self {
            DwgFileHeader::AC15(h) => h.version,
        }
    }

    /// Absolute offset of the preview image, `-1` when absent.
    pub fn preview_address(&self) -> i64 {
        match self {
            DwgFileHeader::AC15(h) => h.preview_address,
        }
    }

    /// Code page selecting the text encoding of `TV` strings.
    pub fn drawing_code_page(&self) -> u16 {
        match self {
            DwgFileHeader::AC15(h) => h.drawing_code_page,
        }
    }

    /// All section locator records, in file order.
    pub fn records(&self) -> &[DwgSectionLocatorRecord] {
        match self {
            DwgFileHeader::AC15(h) => &h.records,
        }
    }

    /// Section locator record at a given index.
    pub fn record(&self, index: usize) -> Option<&DwgSectionLocatorRecord> {
        self.records().get(index)
    }
}

/// DWG file header for R13–R2000 (AC1012/AC1014/AC1015).
#[derive(Debug, Clone)]
pub struct DwgFileHeaderAC15 {
    pub version: DxfVersion,
    /// Byte 5 of the padding that follows the version tag.
    pub maintenance_version: u8,
    pub preview_address: i64,
    pub drawing_code_page: u16,
    /// Section locator records in the order they are stored.
    pub records: Vec<DwgSectionLocatorRecord>,
    /// CRC stored after the record table.
    pub crc: u16,
}

impl DwgFileHeaderAC15 {
    pub fn new(version: DxfVersion) -> Self {
        Self {
            version,
            maintenance_version: 0,
            preview_address: -1,
            drawing_code_page: 0,
            records: Vec::new(),
            crc: 0,
        }
    }

    /// Header-variables section record.
    pub fn header_record(&self) -> Option<&DwgSectionLocatorRecord> {
        self.records.get(locator_index::HEADER)
    }

    /// Classes section record.
    pub fn classes_record(&self) -> Option<&DwgSectionLocatorRecord> {
        self.records.get(locator_index::CLASSES)
    }

    /// Object map section record.
    pub fn handles_record(&self) -> Option<&DwgSectionLocatorRecord> {
        self.records.get(locator_index::HANDLES)
    }

    /// File header end sentinel for AC15
    pub fn end_sentinel() -> &'static [u8; 16] {
        &sentinels::FILE_HEADER_END_AC15
    }

    /// Value XOR-ed into the header CRC, chosen by the record count.
    pub fn crc_xor_mask(record_count: usize) -> u16 {
        match record_count {
            3 => 0xA598,
            4 => 0x8101,
            5 => 0x3CC4,
            6 => 0x8461,
            _ => 0,
        }
    }
}
