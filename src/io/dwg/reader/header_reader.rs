//! DWG Header section reader.
//!
//! The `AcDb:Header` section holds the drawing's system variables. Only its
//! framing is decoded here: sentinels, size and CRC. The variables stay
//! available as raw bytes.

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::section_names;
use crate::io::dwg::file_header::DwgSectionLocatorRecord;
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::io::dwg::reader::stream_reader_base::DwgStreamReaderBase;
use crate::io::dwg::reader::DwgReaderConfiguration;
use crate::io::dwg::section_io::SectionIO;
use crate::notification::NotificationCollection;

/// Located and checked header-variables section.
#[derive(Debug, Clone, Default)]
pub struct DwgHeaderSection {
    /// Absolute offset of the start sentinel.
    pub offset: usize,
    /// Undecoded variable data.
    pub data: Vec<u8>,
    /// CRC stored after the data.
    pub crc: u16,
}

impl DwgHeaderSection {
    /// Size of the variable data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Reader for the DWG `AcDb:Header` section.
pub struct DwgHeaderReader<'a> {
    /// The whole file.
    file: &'a [u8],
    record: DwgSectionLocatorRecord,
}

impl<'a> DwgHeaderReader<'a> {
    pub fn new(file: &'a [u8], record: DwgSectionLocatorRecord) -> Self {
        Self { file, record }
    }

    /// Check the section framing and copy out its data.
    pub fn read(
        &self,
        config: &DwgReaderConfiguration,
        notifications: &mut NotificationCollection,
    ) -> Result<DwgHeaderSection> {
        let sio = SectionIO::new(section_names::HEADER, config);
        let offset = section_start(self.file, &self.record, section_names::HEADER)?;
        let mut reader = DwgStreamReaderBase::new(&self.file[offset..]);

        sio.read_start_sentinel(&mut reader)?;

        // RL: Size of the section
        let size = reader.read_raw_long()?;
        let size = usize::try_from(size).map_err(|_| DwgError::CorruptSection {
            section: section_names::HEADER,
            reason: format!("negative size {}", size),
        })?;
        let data = reader.read_bytes(size)?;

        // RS: CRC over the size field and the data
        let crc = reader.read_raw_ushort()?;
        sio.check_crc(crc, &reader.data()[16..16 + 4 + size], notifications);

        sio.read_end_sentinel(&mut reader, notifications)?;

        log::debug!("{}: {} bytes at {:#X}", section_names::HEADER, size, offset);

        Ok(DwgHeaderSection { offset, data, crc })
    }
}

/// Validate a locator record against the file and return its start offset.
pub(crate) fn section_start(
    file: &[u8],
    record: &DwgSectionLocatorRecord,
    section: &'static str,
) -> Result<usize> {
    match usize::try_from(record.seeker) {
        Ok(offset) if offset < file.len() => Ok(offset),
        _ => Err(DwgError::CorruptSection {
            section,
            reason: format!(
                "locator offset {:#X} outside a {} byte file",
                record.seeker,
                file.len()
            ),
        }),
    }
}
