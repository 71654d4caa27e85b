//! Section locator record of the R13–R2000 file header.

use std::ops::Range;

/// File offset and size of one section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DwgSectionLocatorRecord {
    /// Section number as stored (RC).
    pub record_number: u8,
    /// Absolute byte offset of the section (RL).
    pub seeker: i32,
    /// Size of the section in bytes (RL).
    pub size: i32,
}

impl DwgSectionLocatorRecord {
    pub fn new(record_number: u8, seeker: i32, size: i32) -> Self {
        Self {
            record_number,
            seeker,
            size,
        }
    }

    /// Byte range covered by the section, `None` if the record holds
    /// negative values.
    pub fn byte_range(&self) -> Option<Range<usize>> {
        let start = usize::try_from(self.seeker).ok()?;
        let size = usize::try_from(self.size).ok()?;
        Some(start..start.checked_add(size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let rec = DwgSectionLocatorRecord::default();
        assert_eq!(rec.record_number, 0);
        assert_eq!(rec.byte_range(), Some(0..0));
    }

    #[test]
    fn test_byte_range() {
        let rec = DwgSectionLocatorRecord::new(2, 0x1234, 0x20);
        assert_eq!(rec.byte_range(), Some(0x1234..0x1254));
        assert_eq!(DwgSectionLocatorRecord::new(1, -4, 8).byte_range(), None);
    }
}
