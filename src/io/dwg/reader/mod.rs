//! DWG bit-level stream readers and section readers.
//!
//! This module contains the reader side of the DWG I/O system:
//!
//! ## Stream readers
//! - [`stream_reader`] - the `IDwgStreamReader` trait
//! - [`stream_reader_base`] - the concrete implementation over a byte slice
//!
//! ## Section readers
//! - [`header_reader`] - `AcDb:Header` section (system variables, kept raw)
//! - [`classes_reader`] - `AcDb:Classes` section (DXF class definitions)
//! - [`handle_reader`] - `AcDb:Handles` section (object map)
//! - [`object_reader`] - single objects located through the object map
//!
//! [`dwg_reader`] drives them in order.

pub mod stream_reader;
pub mod stream_reader_base;

pub mod classes_reader;
pub mod dwg_reader;
pub mod handle_reader;
pub mod header_reader;
pub mod object_reader;

pub use stream_reader::{encoding_from_code_page, IDwgStreamReader};
pub use stream_reader_base::DwgStreamReaderBase;

pub use classes_reader::DwgClassesReader;
pub use dwg_reader::{DwgReader, DwgReaderConfiguration};
pub use handle_reader::{DwgHandleReader, ObjectMap, ObjectMapEntry};
pub use header_reader::{DwgHeaderReader, DwgHeaderSection};
pub use object_reader::{DwgObjectReader, ObjectClass};
