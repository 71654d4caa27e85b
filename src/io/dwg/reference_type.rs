//! Handle references and their relation codes.
//!
//! A handle reference is stored as `|CODE (4 bits)|COUNTER (4 bits)|bytes|`
//! with the `COUNTER` bytes holding a big-endian value. Codes 0–5 carry an
//! absolute handle; codes 6, 8, 0xA and 0xC express the target relative to
//! the handle of the object that contains the reference.

use std::fmt;

/// Relation code of a handle reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DwgReferenceType {
    /// Absolute handle, no ownership semantics (code 0)
    Undefined = 0,
    /// Absolute handle (code 1, seen in some writers)
    Absolute = 1,
    /// Soft ownership (code 2)
    SoftOwnership = 2,
    /// Hard ownership (code 3)
    HardOwnership = 3,
    /// Soft pointer (code 4)
    SoftPointer = 4,
    /// Hard pointer (code 5)
    HardPointer = 5,
    /// Owning handle + 1 (code 6)
    PlusOne = 6,
    /// Owning handle - 1 (code 8)
    MinusOne = 8,
    /// Owning handle + offset (code 0xA)
    PlusOffset = 0xA,
    /// Owning handle - offset (code 0xC)
    MinusOffset = 0xC,
}

impl DwgReferenceType {
    /// Map a raw 4-bit code to its relation, if the code is defined.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Undefined,
            1 => Self::Absolute,
            2 => Self::SoftOwnership,
            3 => Self::HardOwnership,
            4 => Self::SoftPointer,
            5 => Self::HardPointer,
            6 => Self::PlusOne,
            8 => Self::MinusOne,
            0xA => Self::PlusOffset,
            0xC => Self::MinusOffset,
            _ => return None,
        })
    }

    /// Whether the stored bytes are the target handle itself.
    pub fn is_absolute(&self) -> bool {
        (*self as u8) <= 5
    }

    /// Whether the stored bytes (if any) are an offset from the owning handle.
    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }
}

/// A handle reference as read from an object's handle stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleReference {
    /// Relation code (upper nibble of the form byte).
    pub code: u8,
    /// Number of value bytes that followed (lower nibble of the form byte).
    pub counter: u8,
    /// Value assembled from the `counter` big-endian bytes.
    pub handle: u64,
}

impl HandleReference {
    /// Create a new handle reference.
    pub fn new(code: u8, counter: u8, handle: u64) -> Self {
        Self {
            code,
            counter,
            handle,
        }
    }

    /// The relation named by `code`, if any.
    pub fn reference_type(&self) -> Option<DwgReferenceType> {
        DwgReferenceType::from_code(self.code)
    }

    /// Resolve to an absolute handle against the owning object's handle.
    ///
    /// Returns `None` when the code is not a defined relation.
    pub fn resolve(&self, owner_handle: u64) -> Option<u64> {
        let resolved = match self.reference_type()? {
            DwgReferenceType::PlusOne => owner_handle.wrapping_add(1),
            DwgReferenceType::MinusOne => owner_handle.wrapping_sub(1),
            DwgReferenceType::PlusOffset => owner_handle.wrapping_add(self.handle),
            DwgReferenceType::MinusOffset => owner_handle.wrapping_sub(self.handle),
            _ => self.handle,
        };
        Some(resolved)
    }

    /// A zero-length absolute reference, i.e. "no object".
    pub fn is_null(&self) -> bool {
        self.code <= 5 && self.handle == 0
    }
}

impl fmt::Display for HandleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{:X}", self.code, self.counter, self.handle)
    }
}
