//! Decoded drawing objects.
//!
//! Every object decodes into one arm of [`Geometry`]. Entities carry an
//! [`EntityCommon`] with the shared prologue/epilogue fields; the layer
//! record and opaque objects carry the shorter [`ObjectCommon`].

use std::fmt;

use crate::io::dwg::object_type::DwgObjectType;
use crate::tables::Layer;
use crate::types::{Handle, LineWeight};

pub mod arc;
pub mod circle;
pub mod ellipse;
pub mod line;
pub mod lwpolyline;
pub mod opaque;
pub mod point;
pub mod polyline3d;
pub mod solid;
pub mod text;

pub use arc::Arc;
pub use circle::Circle;
pub use ellipse::Ellipse;
pub use line::Line;
pub use lwpolyline::{LwPolyline, LwPolylineFlags, LwVertex};
pub use opaque::{OpaqueCommon, OpaqueObject};
pub use point::Point;
pub use polyline3d::{Polyline3D, Vertex3D};
pub use solid::Solid;
pub use text::Text;

/// One extended entity data group, kept undecoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedData {
    /// Handle of the registering application (APPID).
    pub application: Handle,
    pub data: Vec<u8>,
}

/// Fields every object carries, entity or not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectCommon {
    pub handle: Handle,
    /// Raw type code (fixed or class number).
    pub type_code: i16,
    /// Size of the data stream in bits; the handle stream follows it.
    pub size_in_bits: u32,
    pub extended_data: Vec<ExtendedData>,
    /// Owning object; null for entities whose owner is implicit.
    pub owner: Handle,
    pub reactors: Vec<Handle>,
    pub xdictionary: Handle,
}

/// Common entity data and common entity handle data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityCommon {
    pub object: ObjectCommon,
    /// A proxy graphics block was present (and skipped).
    pub has_graphics: bool,
    /// 0: owner handle present, 1: paper space, 2: model space.
    pub entity_mode: u8,
    pub no_links: bool,
    /// ACI color index.
    pub color: i16,
    pub linetype_scale: f64,
    /// 0 ByLayer, 1 ByBlock, 2 Continuous, 3 handle present.
    pub linetype_flags: u8,
    /// 0 ByLayer, 1 ByBlock, 2 Continuous, 3 handle present.
    pub plotstyle_flags: u8,
    pub invisibility: i16,
    pub line_weight: LineWeight,
    /// Previous entity in the owner's chain (null with `no_links`).
    pub prev_entity: Handle,
    /// Next entity in the owner's chain (null with `no_links`).
    pub next_entity: Handle,
    pub layer: Handle,
    pub linetype: Handle,
    pub plotstyle: Handle,
}

impl EntityCommon {
    pub fn handle(&self) -> Handle {
        self.object.handle
    }

    pub fn is_invisible(&self) -> bool {
        self.invisibility & 1 != 0
    }
}

/// Access shared by the decoded entity records.
pub trait Entity {
    fn common(&self) -> &EntityCommon;

    /// DXF name of the entity type.
    fn entity_type(&self) -> &'static str;

    fn handle(&self) -> Handle {
        self.common().handle()
    }

    /// Handle of the entity's layer.
    fn layer(&self) -> Handle {
        self.common().layer
    }
}

macro_rules! impl_entity {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            impl Entity for $ty {
                fn common(&self) -> &EntityCommon {
                    &self.common
                }

                fn entity_type(&self) -> &'static str {
                    $name
                }
            }
        )*
    };
}

impl_entity! {
    Point => "POINT",
    Line => "LINE",
    Circle => "CIRCLE",
    Arc => "ARC",
    Ellipse => "ELLIPSE",
    Text => "TEXT",
    LwPolyline => "LWPOLYLINE",
    Polyline3D => "POLYLINE",
    Vertex3D => "VERTEX",
    Solid => "SOLID",
}

/// A decoded object.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Ellipse(Ellipse),
    Text(Text),
    LwPolyline(LwPolyline),
    Polyline3D(Polyline3D),
    Vertex3D(Vertex3D),
    Solid(Solid),
    Layer(Layer),
    /// An object whose payload is not decoded.
    Opaque(OpaqueObject),
}

impl Geometry {
    /// The decoded entity, for every arm but `Layer` and `Opaque`.
    pub fn as_entity(&self) -> Option<&dyn Entity> {
        match self {
            Geometry::Point(e) => Some(e),
            Geometry::Line(e) => Some(e),
            Geometry::Circle(e) => Some(e),
            Geometry::Arc(e) => Some(e),
            Geometry::Ellipse(e) => Some(e),
            Geometry::Text(e) => Some(e),
            Geometry::LwPolyline(e) => Some(e),
            Geometry::Polyline3D(e) => Some(e),
            Geometry::Vertex3D(e) => Some(e),
            Geometry::Solid(e) => Some(e),
            Geometry::Layer(_) | Geometry::Opaque(_) => None,
        }
    }

    /// Entity prologue and epilogue, when the object has them.
    pub fn entity_common(&self) -> Option<&EntityCommon> {
        match self {
            Geometry::Opaque(o) => o.entity_common(),
            other => other.as_entity().map(|e| e.common()),
        }
    }

    pub fn handle(&self) -> Handle {
        match self {
            Geometry::Layer(l) => l.common.handle,
            Geometry::Opaque(o) => o.handle(),
            other => other.as_entity().map_or(Handle::NULL, |e| e.handle()),
        }
    }

    pub fn type_code(&self) -> i16 {
        match self {
            Geometry::Layer(l) => l.common.type_code,
            Geometry::Opaque(o) => o.object_common().type_code,
            other => other
                .entity_common()
                .map_or(DwgObjectType::Unlisted.as_raw(), |c| c.object.type_code),
        }
    }

    /// DXF name of the object, fixed or from the class table.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Geometry::Layer(_) => Some("LAYER"),
            Geometry::Opaque(o) => o.dxf_name.as_deref(),
            other => other.as_entity().map(|e| e.entity_type()),
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Geometry::Circle(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Geometry::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_layer(&self) -> Option<&Layer> {
        match self {
            Geometry::Layer(l) => Some(l),
            _ => None,
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(p) => write!(f, "POINT {} at {}", p.common.handle(), p.location),
            Geometry::Line(l) => write!(f, "LINE {} {} -> {}", l.common.handle(), l.start, l.end),
            Geometry::Circle(c) => {
                write!(f, "CIRCLE {} center {} r={:.4}", c.common.handle(), c.center, c.radius)
            }
            Geometry::Arc(a) => write!(
                f,
                "ARC {} center {} r={:.4} [{:.4}, {:.4}]",
                a.common.handle(),
                a.center,
                a.radius,
                a.start_angle,
                a.end_angle
            ),
            Geometry::Ellipse(e) => write!(
                f,
                "ELLIPSE {} center {} axis {} ratio={:.4}",
                e.common.handle(),
                e.center,
                e.major_axis,
                e.minor_axis_ratio
            ),
            Geometry::Text(t) => {
                write!(f, "TEXT {} {:?} at {}", t.common.handle(), t.value, t.insertion_point)
            }
            Geometry::LwPolyline(p) => write!(
                f,
                "LWPOLYLINE {} {} vertices{}",
                p.common.handle(),
                p.vertices.len(),
                if p.is_closed() { " closed" } else { "" }
            ),
            Geometry::Polyline3D(p) => write!(
                f,
                "POLYLINE {} vertices {}..{}",
                p.common.handle(),
                p.first_vertex,
                p.last_vertex
            ),
            Geometry::Vertex3D(v) => write!(f, "VERTEX {} at {}", v.common.handle(), v.location),
            Geometry::Solid(s) => write!(f, "SOLID {} {}", s.common.handle(), s.first_corner),
            Geometry::Layer(l) => write!(f, "LAYER {} {:?}", l.common.handle, l.name),
            Geometry::Opaque(o) => write!(
                f,
                "{} {} ({} bytes undecoded)",
                o.dxf_name.as_deref().unwrap_or("UNKNOWN"),
                o.handle(),
                o.data.len()
            ),
        }
    }
}
