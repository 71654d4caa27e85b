//! Opened DWG document

use encoding_rs::Encoding;
use rayon::prelude::*;

use crate::classes::DxfClassCollection;
use crate::entities::{Geometry, Polyline3D, Vertex3D};
use crate::error::{DwgError, Result};
use crate::io::dwg::file_header::DwgFileHeader;
use crate::io::dwg::reader::{DwgHeaderSection, DwgObjectReader, ObjectMap};
use crate::notification::NotificationCollection;
use crate::tables::Layer;
use crate::types::{DxfVersion, Handle};

/// An opened R2000 drawing.
///
/// Sections are read and objects classified when the document is created by
/// [`DwgReader`](crate::io::dwg::reader::DwgReader); objects are decoded one
/// at a time on request. The document is immutable, so decoding can run
/// from several threads at once.
#[derive(Debug, Clone)]
pub struct DwgDocument {
    /// The whole file; object offsets are absolute.
    pub(crate) data: Vec<u8>,
    pub(crate) file_header: DwgFileHeader,
    pub(crate) header_section: DwgHeaderSection,
    pub(crate) classes: DxfClassCollection,
    pub(crate) object_map: ObjectMap,
    /// Layer records in object map order.
    pub(crate) layer_handles: Vec<Handle>,
    /// Geometry objects in object map order.
    pub(crate) geometry_handles: Vec<Handle>,
    pub(crate) notifications: NotificationCollection,
    pub(crate) encoding: &'static Encoding,
    pub(crate) verify_checksums: bool,
}

impl DwgDocument {
    pub fn version(&self) -> DxfVersion {
        self.file_header.version()
    }

    pub fn file_header(&self) -> &DwgFileHeader {
        &self.file_header
    }

    /// The header-variables section, undecoded.
    pub fn header_section(&self) -> &DwgHeaderSection {
        &self.header_section
    }

    pub fn classes(&self) -> &DxfClassCollection {
        &self.classes
    }

    pub fn object_map(&self) -> &ObjectMap {
        &self.object_map
    }

    /// Non-fatal issues found while opening.
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Text encoding of the drawing's code page.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn layer_count(&self) -> usize {
        self.layer_handles.len()
    }

    pub fn geometry_count(&self) -> usize {
        self.geometry_handles.len()
    }

    pub fn layer_handles(&self) -> &[Handle] {
        &self.layer_handles
    }

    pub fn geometry_handles(&self) -> &[Handle] {
        &self.geometry_handles
    }

    /// Decode the layer at `index`.
    pub fn get_layer(&self, index: usize) -> Result<Layer> {
        let handle = self.layer_handles.get(index).ok_or(DwgError::IndexOutOfRange {
            index,
            count: self.layer_handles.len(),
        })?;
        match self.get_object(*handle)? {
            Geometry::Layer(layer) => Ok(layer),
            other => Err(DwgError::UnexpectedObjectType {
                expected: "LAYER",
                actual: other.type_name().unwrap_or("UNKNOWN").to_string(),
            }),
        }
    }

    /// Decode the geometry at `index`.
    pub fn get_geometry(&self, index: usize) -> Result<Geometry> {
        let handle = self.geometry_handles.get(index).ok_or(DwgError::IndexOutOfRange {
            index,
            count: self.geometry_handles.len(),
        })?;
        self.get_object(*handle)
    }

    /// Decode any mapped object by handle.
    pub fn get_object(&self, handle: Handle) -> Result<Geometry> {
        if handle.is_null() {
            return Err(DwgError::InvalidHandle(handle.value()));
        }
        let offset = self
            .object_map
            .offset_of(handle.value())
            .ok_or(DwgError::ObjectNotFound(handle.value()))?;
        self.read_object_at(offset)
    }

    /// Decode the object at an absolute file offset.
    pub fn read_object_at(&self, offset: i64) -> Result<Geometry> {
        self.object_reader().read_object(offset)
    }

    /// DXF name of a raw type code.
    pub fn type_name(&self, type_code: i16) -> Result<String> {
        self.object_reader().type_name(type_code)
    }

    /// Decode every layer in order.
    pub fn layers(&self) -> impl Iterator<Item = Result<Layer>> + '_ {
        (0..self.layer_count()).map(move |i| self.get_layer(i))
    }

    /// Decode every geometry in order.
    pub fn geometries(&self) -> impl Iterator<Item = Result<Geometry>> + '_ {
        self.geometry_handles.iter().map(move |h| self.get_object(*h))
    }

    /// Decode every geometry on the rayon pool; results keep index order.
    pub fn par_geometries(&self) -> Vec<Result<Geometry>> {
        self.geometry_handles
            .par_iter()
            .map(|h| self.get_object(*h))
            .collect()
    }

    /// Follow the vertex chain of a 3D polyline from its first to its last
    /// vertex.
    ///
    /// Vertices are linked through their next-entity handle; a vertex
    /// without links is followed by the next handle.
    pub fn polyline_vertices(&self, polyline: &Polyline3D) -> Result<Vec<Vertex3D>> {
        let mut vertices = Vec::new();
        if polyline.first_vertex.is_null() {
            return Ok(vertices);
        }

        let mut handle = polyline.first_vertex;
        loop {
            let vertex = match self.get_object(handle)? {
                Geometry::Vertex3D(v) => v,
                other => {
                    return Err(DwgError::UnexpectedObjectType {
                        expected: "VERTEX",
                        actual: other.type_name().unwrap_or("UNKNOWN").to_string(),
                    })
                }
            };
            let next = if vertex.common.no_links {
                Handle::new(handle.value().wrapping_add(1))
            } else {
                vertex.common.next_entity
            };
            vertices.push(vertex);

            if handle == polyline.last_vertex {
                return Ok(vertices);
            }
            if vertices.len() >= self.object_map.len() {
                return Err(DwgError::InvalidFormat(format!(
                    "vertex chain of {} does not reach {}",
                    polyline.common.handle(),
                    polyline.last_vertex
                )));
            }
            handle = next;
        }
    }

    fn object_reader(&self) -> DwgObjectReader<'_> {
        DwgObjectReader::new(&self.data, &self.classes, self.encoding)
            .with_checksums(self.verify_checksums)
    }
}
