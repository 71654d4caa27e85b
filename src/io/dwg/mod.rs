//! DWG file format reader support.
//!
//! This module implements reading of AutoCAD R2000 (AC1015) DWG binary files.
//!
//! # Module Structure
//!
//! - [`constants`] - Sentinel bytes, section names and indices, file header offsets
//! - [`crc`] - 16-bit CRC used by sections, object map chunks and objects
//! - [`object_type`] - Fixed object type codes and their classification
//! - [`reference_type`] - DWG handle reference codes and resolution
//! - [`section_io`] - Sentinel and CRC checks shared by the section readers
//! - [`file_header`] - DWG file header structures
//! - [`reader`] - Bit stream readers, section readers and the object reader

pub mod constants;
pub mod crc;
pub mod file_header;
pub mod object_type;
pub mod reader;
pub mod reference_type;
pub mod section_io;

#[cfg(test)]
use crate::types::Vector3;

#[cfg(test)]
#[path = "../../../tests/common/bit_writer.rs"]
pub(crate) mod bit_writer;

// Re-export commonly used types
pub use file_header::{DwgFileHeader, DwgFileHeaderAC15, DwgSectionLocatorRecord};
pub use object_type::DwgObjectType;
pub use reader::{DwgReader, DwgReaderConfiguration};
pub use reference_type::{DwgReferenceType, HandleReference};
pub use section_io::SectionIO;
