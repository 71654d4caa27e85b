//! Drawing format versions identified by the 6-byte tag at offset 0.

use std::fmt;

/// Version tag of an AutoCAD drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DxfVersion {
    /// Tag not recognised
    Unknown,
    /// R13
    AC1012,
    /// R14
    AC1014,
    /// R2000
    AC1015,
    /// R2004
    AC1018,
    /// R2007
    AC1021,
    /// R2010
    AC1024,
    /// R2013
    AC1027,
    /// R2018
    AC1032,
}

impl DxfVersion {
    /// Parse a version tag such as `"AC1015"`.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "AC1012" => Self::AC1012,
            "AC1014" => Self::AC1014,
            "AC1015" => Self::AC1015,
            "AC1018" => Self::AC1018,
            "AC1021" => Self::AC1021,
            "AC1024" => Self::AC1024,
            "AC1027" => Self::AC1027,
            "AC1032" => Self::AC1032,
            _ => Self::Unknown,
        }
    }

    /// Parse the raw 6-byte tag read from the start of a file.
    pub fn from_tag_bytes(bytes: &[u8]) -> Self {
        std::str::from_utf8(bytes).map_or(Self::Unknown, Self::parse)
    }

    /// The tag as written in the file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::AC1012 => "AC1012",
            Self::AC1014 => "AC1014",
            Self::AC1015 => "AC1015",
            Self::AC1018 => "AC1018",
            Self::AC1021 => "AC1021",
            Self::AC1024 => "AC1024",
            Self::AC1027 => "AC1027",
            Self::AC1032 => "AC1032",
        }
    }

    /// Whether a DWG with this tag can be decoded.
    pub fn is_dwg_supported(&self) -> bool {
        matches!(self, Self::AC1015)
    }
}

impl fmt::Display for DxfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
