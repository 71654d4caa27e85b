//! Entity readers.
//!
//! Each reader consumes the common entity data, then the type-specific
//! fields in stream order, then any type-specific handles.

use crate::entities::{
    Arc, Circle, Ellipse, Line, LwPolyline, LwPolylineFlags, LwVertex, Point, Polyline3D,
    Solid, Text, Vertex3D,
};
use crate::error::Result;
use crate::io::dwg::reader::stream_reader::IDwgStreamReader;
use crate::types::{Vector2, Vector3};

use super::{checked_count, DwgObjectReader, StreamSet};

impl DwgObjectReader<'_> {
    pub(super) fn read_point(&self, streams: &mut StreamSet) -> Result<Point> {
        let common = self.read_common_entity_data(streams)?;
        let reader = &mut streams.object_reader;

        Ok(Point {
            common,
            // 3BD: location
            location: reader.read_3bit_double()?,
            // BT: thickness
            thickness: reader.read_bit_thickness()?,
            // BE: extrusion
            normal: reader.read_bit_extrusion()?,
            // BD: x-axis angle
            x_axis_angle: reader.read_bit_double()?,
        })
    }

    pub(super) fn read_line(&self, streams: &mut StreamSet) -> Result<Line> {
        let common = self.read_common_entity_data(streams)?;
        let reader = &mut streams.object_reader;

        // B: Z's are zero
        let z_are_zero = reader.read_bit()?;
        // RD: start x, DD: end x defaulting to start x
        let x1 = reader.read_raw_double()?;
        let x2 = reader.read_bit_double_with_default(x1)?;
        // RD: start y, DD: end y defaulting to start y
        let y1 = reader.read_raw_double()?;
        let y2 = reader.read_bit_double_with_default(y1)?;

        let (start, end) = if z_are_zero {
            (Vector3::new(x1, y1, 0.0), Vector3::new(x2, y2, 0.0))
        } else {
            // RD: start z, DD: end z defaulting to start z
            let z1 = reader.read_raw_double()?;
            let z2 = reader.read_bit_double_with_default(z1)?;
            (Vector3::new(x1, y1, z1), Vector3::new(x2, y2, z2))
        };

        Ok(Line {
            common,
            start,
            end,
            // BT: thickness
            thickness: reader.read_bit_thickness()?,
            // BE: extrusion
            normal: reader.read_bit_extrusion()?,
        })
    }

    pub(super) fn read_circle(&self, streams: &mut StreamSet) -> Result<Circle> {
        let common = self.read_common_entity_data(streams)?;
        let reader = &mut streams.object_reader;

        Ok(Circle {
            common,
            center: reader.read_3bit_double()?,
            radius: reader.read_bit_double()?,
            thickness: reader.read_bit_thickness()?,
            normal: reader.read_bit_extrusion()?,
        })
    }

    pub(super) fn read_arc(&self, streams: &mut StreamSet) -> Result<Arc> {
        let circle = self.read_circle(streams)?;
        let reader = &mut streams.object_reader;

        Ok(Arc {
            common: circle.common,
            center: circle.center,
            radius: circle.radius,
            thickness: circle.thickness,
            normal: circle.normal,
            // BD: start angle, BD: end angle
            start_angle: reader.read_bit_double()?,
            end_angle: reader.read_bit_double()?,
        })
    }

    pub(super) fn read_ellipse(&self, streams: &mut StreamSet) -> Result<Ellipse> {
        let common = self.read_common_entity_data(streams)?;
        let reader = &mut streams.object_reader;

        Ok(Ellipse {
            common,
            // 3BD: center
            center: reader.read_3bit_double()?,
            // 3BD: endpoint of the major axis, relative to the center
            major_axis: reader.read_3bit_double()?,
            // 3BD: extrusion, always stored in full
            normal: reader.read_3bit_double()?,
            minor_axis_ratio: reader.read_bit_double()?,
            start_parameter: reader.read_bit_double()?,
            end_parameter: reader.read_bit_double()?,
        })
    }

    pub(super) fn read_text(&self, streams: &mut StreamSet) -> Result<Text> {
        let common = self.read_common_entity_data(streams)?;
        let mut text = Text {
            common,
            ..Default::default()
        };
        let reader = &mut streams.object_reader;

        // RC: data flags; a set bit means the field is absent
        let flags = reader.read_raw_char()?;

        // RD: elevation
        let elevation = if flags & 0x01 == 0 {
            reader.read_raw_double()?
        } else {
            0.0
        };
        // 2RD: insertion point
        let insertion = reader.read_2raw_double()?;
        text.insertion_point = insertion.with_z(elevation);

        // 2DD: alignment point, defaulting to the insertion point
        text.alignment_point = if flags & 0x02 == 0 {
            reader.read_2bit_double_with_default(insertion)?
        } else {
            insertion
        };

        text.normal = reader.read_bit_extrusion()?;
        text.thickness = reader.read_bit_thickness()?;

        if flags & 0x04 == 0 {
            text.oblique_angle = reader.read_raw_double()?;
        }
        if flags & 0x08 == 0 {
            text.rotation = reader.read_raw_double()?;
        }
        // RD: height
        text.height = reader.read_raw_double()?;
        if flags & 0x10 == 0 {
            text.width_factor = reader.read_raw_double()?;
        }

        // TV: text value
        text.value = reader.read_variable_text()?;

        if flags & 0x20 == 0 {
            text.generation = reader.read_bit_short()?;
        }
        if flags & 0x40 == 0 {
            text.horizontal_alignment = reader.read_bit_short()?;
        }
        if flags & 0x80 == 0 {
            text.vertical_alignment = reader.read_bit_short()?;
        }

        // H: text style (hard pointer)
        text.style = streams.handle_ref()?;
        Ok(text)
    }

    pub(super) fn read_lwpolyline(&self, streams: &mut StreamSet) -> Result<LwPolyline> {
        let common = self.read_common_entity_data(streams)?;
        let mut pline = LwPolyline {
            common,
            ..Default::default()
        };
        let reader = &mut streams.object_reader;

        // BS: flags
        pline.flags = LwPolylineFlags::from_bits_retain(reader.read_bit_short()? as u16);
        let flags = pline.flags;

        if flags.contains(LwPolylineFlags::HAS_CONSTANT_WIDTH) {
            pline.constant_width = reader.read_bit_double()?;
        }
        if flags.contains(LwPolylineFlags::HAS_ELEVATION) {
            pline.elevation = reader.read_bit_double()?;
        }
        if flags.contains(LwPolylineFlags::HAS_THICKNESS) {
            pline.thickness = reader.read_bit_double()?;
        }
        if flags.contains(LwPolylineFlags::HAS_EXTRUSION) {
            pline.normal = reader.read_3bit_double()?;
        }

        // BL: number of points; the first takes 128 bits, the rest at least 4
        let stored_points = reader.read_bit_long()?;
        let point_count = checked_count(&*reader, stored_points, 4, "vertex")?;

        let bulge_count = if flags.contains(LwPolylineFlags::HAS_BULGES) {
            let stored = reader.read_bit_long()?;
            checked_count(&*reader, stored, 2, "bulge")?
        } else {
            0
        };
        let width_count = if flags.contains(LwPolylineFlags::HAS_WIDTHS) {
            let stored = reader.read_bit_long()?;
            checked_count(&*reader, stored, 4, "width")?
        } else {
            0
        };

        // 2RD: first point, then 2DD with the previous point as default
        let mut vertices = Vec::with_capacity(point_count);
        let mut last = Vector2::ZERO;
        for i in 0..point_count {
            let location = if i == 0 {
                reader.read_2raw_double()?
            } else {
                reader.read_2bit_double_with_default(last)?
            };
            last = location;
            vertices.push(LwVertex {
                location,
                ..Default::default()
            });
        }

        // BD: bulges
        for i in 0..bulge_count {
            let bulge = reader.read_bit_double()?;
            if let Some(v) = vertices.get_mut(i) {
                v.bulge = bulge;
            }
        }

        // 2BD: start and end widths
        for i in 0..width_count {
            let start_width = reader.read_bit_double()?;
            let end_width = reader.read_bit_double()?;
            if let Some(v) = vertices.get_mut(i) {
                v.start_width = start_width;
                v.end_width = end_width;
            }
        }

        pline.vertices = vertices;
        Ok(pline)
    }

    pub(super) fn read_polyline_3d(&self, streams: &mut StreamSet) -> Result<Polyline3D> {
        let common = self.read_common_entity_data(streams)?;
        let reader = &mut streams.object_reader;

        // RC: spline flags, RC: closed flags
        let spline_flags = reader.read_raw_char()?;
        let closed_flags = reader.read_raw_char()?;

        Ok(Polyline3D {
            common,
            spline_flags,
            closed_flags,
            // H: first vertex, last vertex and seqend (soft owner)
            first_vertex: streams.handle_ref()?,
            last_vertex: streams.handle_ref()?,
            seqend: streams.handle_ref()?,
        })
    }

    pub(super) fn read_vertex_3d(&self, streams: &mut StreamSet) -> Result<Vertex3D> {
        let common = self.read_common_entity_data(streams)?;
        let reader = &mut streams.object_reader;

        Ok(Vertex3D {
            common,
            // RC: flags
            flags: reader.read_raw_char()?,
            // 3BD: point
            location: reader.read_3bit_double()?,
        })
    }

    pub(super) fn read_solid(&self, streams: &mut StreamSet) -> Result<Solid> {
        let common = self.read_common_entity_data(streams)?;
        let reader = &mut streams.object_reader;

        // BT: thickness, BD: elevation
        let thickness = reader.read_bit_thickness()?;
        let elevation = reader.read_bit_double()?;

        // 2RD: four corners at the elevation
        let mut corners = [Vector3::ZERO; 4];
        for corner in corners.iter_mut() {
            *corner = reader.read_2raw_double()?.with_z(elevation);
        }
        let [first_corner, second_corner, third_corner, fourth_corner] = corners;

        Ok(Solid {
            common,
            thickness,
            elevation,
            first_corner,
            second_corner,
            third_corner,
            fourth_corner,
            // BE: extrusion
            normal: reader.read_bit_extrusion()?,
        })
    }
}
