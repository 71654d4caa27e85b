//! # acaddwg
//!
//! A pure Rust library for reading AutoCAD DWG drawings (R2000, `AC1015`).
//!
//! Opening a file reads its section layout, class table and object map and
//! classifies every object as a layer, a geometry or neither. Objects are
//! decoded one at a time on request.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use acaddwg::DwgReader;
//!
//! let doc = DwgReader::from_file("sample.dwg")?.read()?;
//!
//! println!("{} layers, {} geometries", doc.layer_count(), doc.geometry_count());
//! for geometry in doc.geometries() {
//!     println!("{}", geometry?);
//! }
//! # Ok::<(), acaddwg::DwgError>(())
//! ```
//!
//! ## Architecture
//!
//! - `IDwgStreamReader` - Bit-level primitive decoding
//! - `DwgReader` - File header, section and object map reading
//! - `DwgDocument` - Opened drawing, decodes objects by index or handle
//! - `Geometry` - Tagged union of decoded records, with an opaque arm
//!
//! Non-fatal problems found while opening are kept as notifications on the
//! document and forwarded to the `log` facade.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classes;
pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use error::{DwgError, Result};
pub use types::{DxfVersion, Handle, LineWeight, Vector2, Vector3};

// Re-export entity types
pub use entities::{
    Arc, Circle, Ellipse, Entity, Geometry, Line, LwPolyline, OpaqueObject, Point, Polyline3D,
    Solid, Text, Vertex3D,
};

// Re-export table types
pub use tables::{Layer, LayerFlags, TableEntry};

// Re-export document
pub use document::DwgDocument;

// Re-export I/O types
pub use io::dwg::{DwgReader, DwgReaderConfiguration};
pub use notification::{Notification, NotificationCollection, NotificationType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_document_is_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DwgDocument>();
    }
}
