//! Fixed object type codes.
//!
//! Codes below [`CLASS_NUMBER_BASE`] have a fixed meaning. Larger codes are
//! resolved through the drawing's class table.
//!
//! [`CLASS_NUMBER_BASE`]: crate::io::dwg::constants::classes::CLASS_NUMBER_BASE

macro_rules! object_types {
    ($($variant:ident = $code:literal => $name:literal,)*) => {
        /// Fixed object type codes of an R2000 drawing.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i16)]
        pub enum DwgObjectType {
            $($variant = $code,)*
            /// Code with no fixed meaning (class-based or unused).
            Unlisted = -999,
        }

        impl DwgObjectType {
            /// Map a raw type code. Codes without a fixed meaning give `Unlisted`.
            pub fn from_raw(value: i16) -> Self {
                match value {
                    $($code => Self::$variant,)*
                    _ => Self::Unlisted,
                }
            }

            /// DXF name of the type, `None` for [`DwgObjectType::Unlisted`].
            pub fn dxf_name(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($name),)*
                    Self::Unlisted => None,
                }
            }
        }
    };
}

object_types! {
    Text = 0x01 => "TEXT",
    Attrib = 0x02 => "ATTRIB",
    Attdef = 0x03 => "ATTDEF",
    Block = 0x04 => "BLOCK",
    Endblk = 0x05 => "ENDBLK",
    Seqend = 0x06 => "SEQEND",
    Insert = 0x07 => "INSERT",
    Minsert = 0x08 => "MINSERT",
    Vertex2D = 0x0A => "VERTEX_2D",
    Vertex3D = 0x0B => "VERTEX_3D",
    VertexMesh = 0x0C => "VERTEX_MESH",
    VertexPface = 0x0D => "VERTEX_PFACE",
    VertexPfaceFace = 0x0E => "VERTEX_PFACE_FACE",
    Polyline2D = 0x0F => "POLYLINE_2D",
    Polyline3D = 0x10 => "POLYLINE_3D",
    Arc = 0x11 => "ARC",
    Circle = 0x12 => "CIRCLE",
    Line = 0x13 => "LINE",
    Point = 0x1B => "POINT",
    Face3D = 0x1C => "3DFACE",
    Solid = 0x1F => "SOLID",
    Trace = 0x20 => "TRACE",
    Shape = 0x21 => "SHAPE",
    Viewport = 0x22 => "VIEWPORT",
    Ellipse = 0x23 => "ELLIPSE",
    Spline = 0x24 => "SPLINE",
    Ray = 0x28 => "RAY",
    Xline = 0x29 => "XLINE",
    Dictionary = 0x2A => "DICTIONARY",
    Mtext = 0x2C => "MTEXT",
    Leader = 0x2D => "LEADER",
    BlockControlObj = 0x30 => "BLOCK_CONTROL",
    BlockHeader = 0x31 => "BLOCK_HEADER",
    LayerControlObj = 0x32 => "LAYER_CONTROL",
    Layer = 0x33 => "LAYER",
    StyleControlObj = 0x34 => "STYLE_CONTROL",
    Style = 0x35 => "STYLE",
    LtypeControlObj = 0x38 => "LTYPE_CONTROL",
    Ltype = 0x39 => "LTYPE",
    ViewControlObj = 0x3C => "VIEW_CONTROL",
    View = 0x3D => "VIEW",
    UcsControlObj = 0x3E => "UCS_CONTROL",
    Ucs = 0x3F => "UCS",
    VportControlObj = 0x40 => "VPORT_CONTROL",
    Vport = 0x41 => "VPORT",
    AppidControlObj = 0x42 => "APPID_CONTROL",
    Appid = 0x43 => "APPID",
    DimstyleControlObj = 0x44 => "DIMSTYLE_CONTROL",
    Dimstyle = 0x45 => "DIMSTYLE",
    VpEntHdrCtrlObj = 0x46 => "VX_CONTROL",
    VpEntHdr = 0x47 => "VX_TABLE_RECORD",
    Group = 0x48 => "GROUP",
    MlineStyle = 0x49 => "MLINESTYLE",
    LwPolyline = 0x4D => "LWPOLYLINE",
    Hatch = 0x4E => "HATCH",
    XRecord = 0x4F => "XRECORD",
    AcDbPlaceholder = 0x50 => "ACDBPLACEHOLDER",
    Layout = 0x52 => "LAYOUT",
    AcadProxyEntity = 0x1F2 => "ACAD_PROXY_ENTITY",
    AcadProxyObject = 0x1F3 => "ACAD_PROXY_OBJECT",
}

impl DwgObjectType {
    /// Get the raw i16 value.
    pub fn as_raw(self) -> i16 {
        self as i16
    }

    /// Types classified into the geometry list of a document.
    pub fn is_geometry(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Arc
                | Self::Circle
                | Self::Line
                | Self::Point
                | Self::Solid
                | Self::Ellipse
                | Self::Polyline3D
                | Self::LwPolyline
        )
    }

    /// Types laid out with the entity prologue (common entity data).
    ///
    /// Control objects, table records and dictionaries use the shorter
    /// non-entity prologue.
    pub fn is_entity(self) -> bool {
        let code = self.as_raw();
        ((0x01..=0x2F).contains(&code) && self != Self::Dictionary)
            || matches!(self, Self::LwPolyline | Self::Hatch | Self::AcadProxyEntity)
    }
}
