//! Sentinel bytes, section indices and magic numbers for R2000 drawings.

/// Section name constants
pub mod section_names {
    /// System variables (header variables)
    pub const HEADER: &str = "AcDb:Header";
    /// DXF class definitions
    pub const CLASSES: &str = "AcDb:Classes";
    /// Object map (handle → file offset)
    pub const HANDLES: &str = "AcDb:Handles";
}

/// Sentinel bytes for section boundaries (16-byte markers).
pub mod sentinels {
    /// AcDb:Header section start sentinel
    pub const HEADER_START: [u8; 16] = [
        0xCF, 0x7B, 0x1F, 0x23, 0xFD, 0xDE, 0x38, 0xA9, 0x5F, 0x7C, 0x68, 0xB8, 0x4E, 0x6D,
        0x33, 0x5F,
    ];
    /// AcDb:Header section end sentinel
    pub const HEADER_END: [u8; 16] = [
        0x30, 0x84, 0xE0, 0xDC, 0x02, 0x21, 0xC7, 0x56, 0xA0, 0x83, 0x97, 0x47, 0xB1, 0x92,
        0xCC, 0xA0,
    ];
    /// AcDb:Classes section start sentinel
    pub const CLASSES_START: [u8; 16] = [
        0x8D, 0xA1, 0xC4, 0xB8, 0xC4, 0xA9, 0xF8, 0xC5, 0xC0, 0xDC, 0xF4, 0x5F, 0xE7, 0xCF,
        0xB6, 0x8A,
    ];
    /// AcDb:Classes section end sentinel
    pub const CLASSES_END: [u8; 16] = [
        0x72, 0x5E, 0x3B, 0x47, 0x3B, 0x56, 0x07, 0x3A, 0x3F, 0x23, 0x0B, 0xA0, 0x18, 0x30,
        0x49, 0x75,
    ];
    /// Sentinel closing the file header's locator table
    pub const FILE_HEADER_END_AC15: [u8; 16] = [
        0x95, 0xA0, 0x4E, 0x28, 0x99, 0x82, 0x1A, 0xE5, 0x5E, 0x41, 0xE0, 0x5F, 0x9D, 0x3A,
        0x4D, 0x00,
    ];

    /// Get the start sentinel bytes for a given section name, if known.
    pub fn start_sentinel(section_name: &str) -> Option<&'static [u8; 16]> {
        match section_name {
            super::section_names::HEADER => Some(&HEADER_START),
            super::section_names::CLASSES => Some(&CLASSES_START),
            _ => None,
        }
    }

    /// Get the end sentinel bytes for a given section name, if known.
    pub fn end_sentinel(section_name: &str) -> Option<&'static [u8; 16]> {
        match section_name {
            super::section_names::HEADER => Some(&HEADER_END),
            super::section_names::CLASSES => Some(&CLASSES_END),
            _ => None,
        }
    }
}

/// File header layout (offsets into the first bytes of the file).
pub mod file_header {
    /// Length of the ASCII version tag ("AC1015").
    pub const VERSION_TAG_LEN: usize = 6;
    /// Offset of the image seeker (RL).
    pub const IMAGE_SEEKER_OFFSET: u64 = 0x0D;
    /// Offset of the drawing code page (RS).
    pub const CODE_PAGE_OFFSET: u64 = 0x13;
    /// Offset of the locator record count (RL).
    pub const RECORD_COUNT_OFFSET: u64 = 0x15;
    /// Bytes per locator record: number (RC), seeker (RL), size (RL).
    pub const LOCATOR_RECORD_SIZE: usize = 9;
}

/// Object map (AcDb:Handles) constants
pub mod handle_section {
    /// Maximum payload bytes in one object map section, CRC included.
    pub const MAX_CHUNK_SIZE: usize = 2032;
    /// Declared size of the terminating, empty object map section.
    pub const TERMINATOR_SIZE: usize = 2;
}

/// Class table constants
pub mod classes {
    /// First type code resolved through the class table.
    pub const CLASS_NUMBER_BASE: i16 = 500;
    /// `item_class_id` marking a class whose instances are entities.
    pub const ENTITY_ITEM_CLASS_ID: i16 = 0x1F2;
    /// `item_class_id` marking a class whose instances are plain objects.
    pub const OBJECT_ITEM_CLASS_ID: i16 = 0x1F3;
}

/// Section locator indices for R2000 file header records
pub mod section_locator {
    /// AcDb:Header section locator index
    pub const HEADER: usize = 0;
    /// AcDb:Classes section locator index
    pub const CLASSES: usize = 1;
    /// AcDb:Handles (object map) section locator index
    pub const HANDLES: usize = 2;
}

/// Seed of every CRC-8 computation in an R2000 file.
pub const CRC_SEED: u16 = 0xC0C1;
