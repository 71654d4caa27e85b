//! Value types shared by the decoder and the decoded records.

mod handle;
mod line_weight;
mod vector;
mod version;

pub use handle::Handle;
pub use line_weight::LineWeight;
pub use vector::{Vector2, Vector3};
pub use version::DxfVersion;
