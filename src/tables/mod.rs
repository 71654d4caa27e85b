//! Symbol table records

use crate::types::Handle;

pub mod layer;

pub use layer::{Layer, LayerFlags};

/// Base trait for table records
pub trait TableEntry {
    fn handle(&self) -> Handle;

    fn name(&self) -> &str;

    /// Whether the record comes from an external reference.
    fn is_xref_dependent(&self) -> bool;
}
