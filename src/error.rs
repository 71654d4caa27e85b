//! Error types for the acaddwg library

use std::io;
use thiserror::Error;

/// Main error type for DWG decoding operations.
///
/// Errors fall into two groups. Open-time errors (`Io`, `UnsupportedVersion`,
/// `CorruptSection`, a `TruncatedInput` while reading a section) abort opening
/// the file. Per-object errors (`TruncatedInput`, `ChecksumMismatch`, ...)
/// are returned from a single object decode and leave the opened document
/// usable for the remaining objects.
#[derive(Debug, Error)]
pub enum DwgError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A read ran past the end of the buffer being decoded
    #[error("Truncated input: {requested} bits requested at bit {position}, buffer holds {available} bits")]
    TruncatedInput {
        position: usize,
        requested: usize,
        available: usize,
    },

    /// A section marker did not match its expected value
    #[error("Corrupt section {section}: {reason}")]
    CorruptSection {
        section: &'static str,
        reason: String,
    },

    /// Unsupported DWG file version
    #[error("Unsupported DWG version: {0:?}")]
    UnsupportedVersion(String),

    /// Type code has neither a fixed nor a class-table mapping
    #[error("Unknown object type code: {0}")]
    UnknownObjectType(i16),

    /// CRC checksum mismatch
    #[error("CRC checksum mismatch in {context}: stored {expected:#06X}, computed {actual:#06X}")]
    ChecksumMismatch {
        context: String,
        expected: u16,
        actual: u16,
    },

    /// Invalid file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Invalid handle reference
    #[error("Invalid handle: {0:#X}")]
    InvalidHandle(u64),

    /// Handle has no entry in the object map
    #[error("Object not found: handle {0:#X}")]
    ObjectNotFound(u64),

    /// Layer/geometry index outside the classified range
    #[error("Index {index} out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// The object at a location decoded to a different type than requested
    #[error("Expected {expected} object, found {actual}")]
    UnexpectedObjectType {
        expected: &'static str,
        actual: String,
    },
}

impl DwgError {
    /// Whether this error only affects the object being decoded.
    ///
    /// Such errors are reported per object; enumeration of the remaining
    /// objects continues.
    pub fn is_per_object(&self) -> bool {
        matches!(
            self,
            DwgError::TruncatedInput { .. }
                | DwgError::UnknownObjectType(_)
                | DwgError::ChecksumMismatch { .. }
                | DwgError::InvalidHandle(_)
                | DwgError::ObjectNotFound(_)
                | DwgError::UnexpectedObjectType { .. }
        )
    }
}

/// Result type alias for acaddwg operations
pub type Result<T> = std::result::Result<T, DwgError>;
