//! Sentinel and CRC checks shared by the section readers.
//!
//! A sentinel-framed section is laid out as
//! `start sentinel (16) | RL size | data | RS CRC | end sentinel (16)`.
//! A wrong start sentinel means the locator offset cannot be trusted and is
//! always fatal. A wrong end sentinel or CRC is reported as a notification,
//! unless the configuration asks for strict end sentinels.

use crate::error::{DwgError, Result};
use crate::io::dwg::reader::{DwgReaderConfiguration, IDwgStreamReader};
use crate::notification::{NotificationCollection, NotificationType};

use super::constants::{sentinels, CRC_SEED};
use super::crc::crc8;

/// Per-section checking helper.
pub struct SectionIO<'a> {
    section: &'static str,
    config: &'a DwgReaderConfiguration,
}

impl<'a> SectionIO<'a> {
    pub fn new(section: &'static str, config: &'a DwgReaderConfiguration) -> Self {
        Self { section, config }
    }

    /// Check if two 16-byte sentinel arrays match.
    pub fn check_sentinel(actual: &[u8; 16], expected: &[u8; 16]) -> bool {
        actual == expected
    }

    /// Read the start sentinel; any mismatch is fatal.
    pub fn read_start_sentinel(&self, reader: &mut dyn IDwgStreamReader) -> Result<()> {
        let position = reader.position();
        let sentinel = reader.read_sentinel()?;
        let expected = sentinels::start_sentinel(self.section).ok_or_else(|| {
            DwgError::InvalidFormat(format!("no start sentinel known for {}", self.section))
        })?;
        if !Self::check_sentinel(&sentinel, expected) {
            return Err(DwgError::CorruptSection {
                section: self.section,
                reason: format!("start sentinel mismatch at byte {:#X}", position),
            });
        }
        Ok(())
    }

    /// Read the end sentinel; a mismatch is a warning unless the
    /// configuration makes it fatal.
    pub fn read_end_sentinel(
        &self,
        reader: &mut dyn IDwgStreamReader,
        notifications: &mut NotificationCollection,
    ) -> Result<()> {
        let position = reader.position();
        let sentinel = reader.read_sentinel()?;
        let Some(expected) = sentinels::end_sentinel(self.section) else {
            return Ok(());
        };
        if Self::check_sentinel(&sentinel, expected) {
            return Ok(());
        }
        let reason = format!("end sentinel mismatch at byte {:#X}", position);
        if self.config.strict_end_sentinels {
            return Err(DwgError::CorruptSection {
                section: self.section,
                reason,
            });
        }
        notifications.notify(NotificationType::Warning, format!("{}: {}", self.section, reason));
        Ok(())
    }

    /// Compare a stored CRC with the CRC of `covered`; mismatches become
    /// warnings. Skipped when checksum verification is off.
    pub fn check_crc(
        &self,
        stored: u16,
        covered: &[u8],
        notifications: &mut NotificationCollection,
    ) {
        if !self.config.verify_checksums {
            return;
        }
        let actual = crc8(CRC_SEED, covered);
        if actual != stored {
            notifications.notify(
                NotificationType::Warning,
                format!(
                    "{}: CRC mismatch, stored {:#06X}, computed {:#06X}",
                    self.section, stored, actual
                ),
            );
        }
    }
}
