//! Line weights.

use std::fmt;

/// Index table used by R2000 drawings to store line weights in 5 bits.
const DWG_LINE_WEIGHTS: [i16; 24] = [
    0, 5, 9, 13, 15, 18, 20, 25, 30, 35, 40, 50, 53, 60, 70, 80, 90, 100, 106, 120, 140, 158, 200,
    211,
];

/// Line weight of an entity or layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LineWeight {
    /// Use the layer's line weight
    #[default]
    ByLayer,
    /// Use the block's line weight
    ByBlock,
    /// Default line weight
    Default,
    /// Width in 1/100 mm
    Value(i16),
}

impl LineWeight {
    /// Decode the stored index (entity `RC` or the layer flag bits).
    ///
    /// 29, 30 and 31 are the ByLayer, ByBlock and Default markers. Indices
    /// past the table fall back to ByLayer.
    pub fn from_dwg_index(index: u8) -> Self {
        match index {
            29 => LineWeight::ByLayer,
            30 => LineWeight::ByBlock,
            31 => LineWeight::Default,
            i => DWG_LINE_WEIGHTS
                .get(i as usize)
                .map_or(LineWeight::ByLayer, |&w| LineWeight::Value(w)),
        }
    }

    /// DXF group-code value (-1, -2, -3 for the markers).
    pub fn value(&self) -> i16 {
        match self {
            LineWeight::ByLayer => -1,
            LineWeight::ByBlock => -2,
            LineWeight::Default => -3,
            LineWeight::Value(v) => *v,
        }
    }

    pub fn millimeters(&self) -> Option<f64> {
        match self {
            LineWeight::Value(v) => Some(*v as f64 / 100.0),
            _ => None,
        }
    }
}

impl fmt::Display for LineWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineWeight::ByLayer => write!(f, "ByLayer"),
            LineWeight::ByBlock => write!(f, "ByBlock"),
            LineWeight::Default => write!(f, "Default"),
            LineWeight::Value(v) => write!(f, "{:.2}mm", *v as f64 / 100.0),
        }
    }
}
