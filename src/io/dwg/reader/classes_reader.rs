//! DWG Classes section reader.
//!
//! Reads DXF class definitions from the `AcDb:Classes` section. The section
//! contains type information for all custom object/entity classes used in
//! the drawing beyond the built-in ones.

use encoding_rs::Encoding;

use crate::classes::{DxfClass, DxfClassCollection};
use crate::error::{DwgError, Result};
use crate::io::dwg::constants::section_names;
use crate::io::dwg::file_header::DwgSectionLocatorRecord;
use crate::io::dwg::reader::header_reader::section_start;
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::io::dwg::reader::stream_reader_base::DwgStreamReaderBase;
use crate::io::dwg::reader::DwgReaderConfiguration;
use crate::io::dwg::section_io::SectionIO;
use crate::notification::NotificationCollection;

/// Reader for the DWG `AcDb:Classes` section.
pub struct DwgClassesReader<'a> {
    /// The whole file.
    file: &'a [u8],
    record: DwgSectionLocatorRecord,
    encoding: &'static Encoding,
}

impl<'a> DwgClassesReader<'a> {
    pub fn new(
        file: &'a [u8],
        record: DwgSectionLocatorRecord,
        encoding: &'static Encoding,
    ) -> Self {
        Self {
            file,
            record,
            encoding,
        }
    }

    /// Read all class definitions from the section.
    pub fn read(
        &self,
        config: &DwgReaderConfiguration,
        notifications: &mut NotificationCollection,
    ) -> Result<DxfClassCollection> {
        let sio = SectionIO::new(section_names::CLASSES, config);
        let offset = section_start(self.file, &self.record, section_names::CLASSES)?;
        let mut reader =
            DwgStreamReaderBase::new(&self.file[offset..]).with_encoding(self.encoding);

        // SN: 0x8D 0xA1 0xC4 0xB8 0xC4 0xA9 0xF8 0xC5 0xC0 0xDC 0xF4 0x5F 0xE7 0xCF 0xB6 0x8A
        sio.read_start_sentinel(&mut reader)?;

        // RL: size of class data area
        let size = reader.read_raw_long()?;
        let size = usize::try_from(size).map_err(|_| DwgError::CorruptSection {
            section: section_names::CLASSES,
            reason: format!("negative size {}", size),
        })?;
        let end_section = reader.position_in_bits() + size * 8;

        // We read sets of these until we exhaust the data; the last byte may
        // be partly padding
        let mut classes = DxfClassCollection::new();
        while reader.position_in_bits().div_ceil(8) * 8 < end_section {
            let class = Self::read_class(&mut reader)?;
            log::trace!("class {} {}", class.class_number, class.dxf_name);
            classes.add_or_update(class);
        }

        // RS: CRC over the size field and the class data
        reader.set_position_in_bits(end_section)?;
        let crc = reader.read_raw_ushort()?;
        sio.check_crc(crc, &reader.data()[16..16 + 4 + size], notifications);

        // SN: 0x72 0x5E 0x3B 0x47 0x3B 0x56 0x07 0x3A 0x3F 0x23 0x0B 0xA0 0x18 0x30 0x49 0x75
        sio.read_end_sentinel(&mut reader, notifications)?;

        log::debug!("{}: {} classes", section_names::CLASSES, classes.len());
        Ok(classes)
    }

    /// Read a single DXF class definition from the stream.
    fn read_class(reader: &mut dyn IDwgStreamReader) -> Result<DxfClass> {
        Ok(DxfClass {
            // BS: classnum
            class_number: reader.read_bit_short()?,
            // BS: version (proxy flags from R14 on)
            version: reader.read_bit_short()?,
            // TV: appname
            application_name: reader.read_variable_text()?,
            // TV: cplusplusclassname
            cpp_class_name: reader.read_variable_text()?,
            // TV: classdxfname
            dxf_name: reader.read_variable_text()?,
            // B: wasazombie
            was_zombie: reader.read_bit()?,
            // BS: itemclassid, 0x1F2 for entities, 0x1F3 for objects
            item_class_id: reader.read_bit_short()?,
        })
    }
}
