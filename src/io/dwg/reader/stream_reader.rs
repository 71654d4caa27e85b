//! DWG bit-level stream reader trait.
//!
//! DWG data is **bit-aligned** (not byte-aligned). Implementors only supply a
//! bounds-checked `read_bits` over their buffer plus position bookkeeping;
//! every DWG data type is decoded on top of that by the provided methods:
//!
//! - **B** - bit (1 bit)
//! - **BB** - 2-bit code
//! - **BS** - BitShort (2+0/8/16 bits)
//! - **BL** - BitLong (2+0/8/32 bits)
//! - **BD** - BitDouble (2+0/64 bits)
//! - **DD** - BitDouble with default
//! - **MC** - Modular Char (7-bit chunks)
//! - **MS** - Modular Short (15-bit chunks)
//! - **H** - Handle reference
//! - **TV** - Variable text
//! - **RC** - Raw Char, **RS** - Raw Short, **RL** - Raw Long, **RD** - Raw Double
//! - **SN** - Sentinel (16 bytes)
//! - **BE** - BitExtrusion, **BT** - BitThickness
//!
//! "Raw" means "no opcode"; raw values still start at the current, possibly
//! unaligned, bit position.

use encoding_rs::Encoding;

use crate::error::{DwgError, Result};
use crate::io::dwg::reference_type::HandleReference;
use crate::types::{Vector2, Vector3};

/// Trait for bit-level DWG stream reading.
pub trait IDwgStreamReader {
    /// Current position in bits from the start of the buffer.
    fn position_in_bits(&self) -> usize;

    /// Move to an absolute bit position. Positions past the end are rejected.
    fn set_position_in_bits(&mut self, position: usize) -> Result<()>;

    /// Buffer length in bits.
    fn length_in_bits(&self) -> usize;

    /// Read `count` (≤ 64) bits MSB-first into the low end of the result.
    fn read_bits(&mut self, count: u32) -> Result<u64>;

    /// Encoding used for `TV` strings.
    fn encoding(&self) -> &'static Encoding;

    // ---------------------------------------------------------------
    // Positioning
    // ---------------------------------------------------------------

    /// Current position in whole bytes (rounded down).
    fn position(&self) -> usize {
        self.position_in_bits() / 8
    }

    /// Move to the start of byte `pos`.
    fn set_position(&mut self, pos: usize) -> Result<()> {
        self.set_position_in_bits(pos * 8)
    }

    /// Bits left before the end of the buffer.
    fn remaining_bits(&self) -> usize {
        self.length_in_bits().saturating_sub(self.position_in_bits())
    }

    /// Skip to the next byte boundary; no-op when already aligned.
    fn align_to_byte(&mut self) -> Result<()> {
        let pos = self.position_in_bits();
        self.set_position_in_bits((pos + 7) & !7)
    }

    /// Skip `count` bits.
    fn advance_bits(&mut self, count: usize) -> Result<()> {
        let pos = self.position_in_bits();
        let target = pos + count;
        if target > self.length_in_bits() {
            return Err(DwgError::TruncatedInput {
                position: pos,
                requested: count,
                available: self.length_in_bits(),
            });
        }
        self.set_position_in_bits(target)
    }

    /// Align to the next byte boundary and read the RS CRC stored there.
    fn reset_shift(&mut self) -> Result<u16> {
        self.align_to_byte()?;
        self.read_raw_ushort()
    }

    // ---------------------------------------------------------------
    // Fixed-width fields
    // ---------------------------------------------------------------

    fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    fn read_2bits(&mut self) -> Result<u8> {
        Ok(self.read_bits(2)? as u8)
    }

    fn read_3bits(&mut self) -> Result<u8> {
        Ok(self.read_bits(3)? as u8)
    }

    fn read_4bits(&mut self) -> Result<u8> {
        Ok(self.read_bits(4)? as u8)
    }

    // ---------------------------------------------------------------
    // Raw values (little-endian byte order)
    // ---------------------------------------------------------------

    fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    fn read_raw_char(&mut self) -> Result<u8> {
        self.read_byte()
    }

    fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        if length * 8 > self.remaining_bits() {
            return Err(DwgError::TruncatedInput {
                position: self.position_in_bits(),
                requested: length * 8,
                available: self.length_in_bits(),
            });
        }
        (0..length).map(|_| self.read_byte()).collect()
    }

    fn read_raw_ushort(&mut self) -> Result<u16> {
        let lo = self.read_byte()? as u16;
        let hi = self.read_byte()? as u16;
        Ok(lo | (hi << 8))
    }

    fn read_raw_short(&mut self) -> Result<i16> {
        Ok(self.read_raw_ushort()? as i16)
    }

    fn read_raw_long(&mut self) -> Result<i32> {
        let mut arr = [0u8; 4];
        self.read_into(&mut arr)?;
        Ok(i32::from_le_bytes(arr))
    }

    fn read_raw_long_long(&mut self) -> Result<i64> {
        let mut arr = [0u8; 8];
        self.read_into(&mut arr)?;
        Ok(i64::from_le_bytes(arr))
    }

    fn read_raw_double(&mut self) -> Result<f64> {
        let mut arr = [0u8; 8];
        self.read_into(&mut arr)?;
        Ok(f64::from_le_bytes(arr))
    }

    fn read_2raw_double(&mut self) -> Result<Vector2> {
        Ok(Vector2::new(self.read_raw_double()?, self.read_raw_double()?))
    }

    /// Fill `buf` with the next `buf.len()` bytes.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        for b in buf.iter_mut() {
            *b = self.read_byte()?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Bit-coded values
    // ---------------------------------------------------------------

    fn read_bit_short(&mut self) -> Result<i16> {
        match self.read_2bits()? {
            // 00: A short (2 bytes) follows, little-endian order (LSB first)
            0 => self.read_raw_short(),
            // 01: An unsigned char (1 byte) follows
            1 => Ok(self.read_byte()? as i16),
            // 10: 0
            2 => Ok(0),
            // 11: 256
            _ => Ok(256),
        }
    }

    fn read_bit_long(&mut self) -> Result<i32> {
        match self.read_2bits()? {
            // 00: A long (4 bytes) follows, little-endian order (LSB first)
            0 => self.read_raw_long(),
            // 01: An unsigned char (1 byte) follows
            1 => Ok(self.read_byte()? as i32),
            // 10 and 11: 0
            _ => Ok(0),
        }
    }

    fn read_bit_double(&mut self) -> Result<f64> {
        match self.read_2bits()? {
            0 => self.read_raw_double(),
            1 => Ok(1.0),
            _ => Ok(0.0),
        }
    }

    /// DD: a double stored as a patch over `def`.
    fn read_bit_double_with_default(&mut self, def: f64) -> Result<f64> {
        let mut arr = def.to_le_bytes();
        match self.read_2bits()? {
            // 00: No more data present, use default.
            0 => Ok(def),
            // 01: 4 bytes patched into the first 4 bytes of the default
            1 => {
                self.read_into(&mut arr[0..4])?;
                Ok(f64::from_le_bytes(arr))
            }
            // 10: 6 bytes, the first 2 patch bytes [4..6], the last 4 patch bytes [0..4]
            2 => {
                self.read_into(&mut arr[4..6])?;
                self.read_into(&mut arr[0..4])?;
                Ok(f64::from_le_bytes(arr))
            }
            // 11: A full RD follows
            _ => self.read_raw_double(),
        }
    }

    fn read_2bit_double(&mut self) -> Result<Vector2> {
        Ok(Vector2::new(self.read_bit_double()?, self.read_bit_double()?))
    }

    fn read_3bit_double(&mut self) -> Result<Vector3> {
        Ok(Vector3::new(
            self.read_bit_double()?,
            self.read_bit_double()?,
            self.read_bit_double()?,
        ))
    }

    fn read_2bit_double_with_default(&mut self, def: Vector2) -> Result<Vector2> {
        Ok(Vector2::new(
            self.read_bit_double_with_default(def.x)?,
            self.read_bit_double_with_default(def.y)?,
        ))
    }

    /// BE: a single set bit stands for the world Z axis.
    fn read_bit_extrusion(&mut self) -> Result<Vector3> {
        if self.read_bit()? {
            Ok(Vector3::UNIT_Z)
        } else {
            self.read_3bit_double()
        }
    }

    /// BT: a single set bit stands for zero thickness.
    fn read_bit_thickness(&mut self) -> Result<f64> {
        if self.read_bit()? {
            Ok(0.0)
        } else {
            self.read_bit_double()
        }
    }

    // ---------------------------------------------------------------
    // Modular values
    // ---------------------------------------------------------------

    /// Unsigned MC: 7 data bits per byte, least significant group first,
    /// high bit set on every byte but the last.
    fn read_modular_char(&mut self) -> Result<u64> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_byte()?;
            if shift > 63 {
                return Err(DwgError::InvalidFormat(
                    "modular char longer than 64 bits".into(),
                ));
            }
            value |= ((byte & 0b0111_1111) as u64) << shift;
            if (byte & 0b1000_0000) == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Signed MC: as the unsigned form, but the last byte only carries
    /// 6 data bits and bit 6 is the sign.
    fn read_signed_modular_char(&mut self) -> Result<i64> {
        let mut sum = 0i64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_byte()?;
            if shift > 62 {
                return Err(DwgError::InvalidFormat(
                    "modular char longer than 64 bits".into(),
                ));
            }
            if (byte & 0b1000_0000) != 0 {
                sum |= ((byte & 0b0111_1111) as i64) << shift;
                shift += 7;
                continue;
            }
            let value = sum | (((byte & 0b0011_1111) as i64) << shift);
            return Ok(if (byte & 0b0100_0000) != 0 {
                -value
            } else {
                value
            });
        }
    }

    /// MS: little-endian 16-bit words with 15 data bits each; the high bit
    /// of a word's second byte marks a continuation.
    fn read_modular_short(&mut self) -> Result<u32> {
        let mut value = 0u32;
        let mut shift = 0u32;
        loop {
            let b1 = self.read_byte()?;
            let b2 = self.read_byte()?;
            if shift > 30 {
                return Err(DwgError::InvalidFormat(
                    "modular short longer than 32 bits".into(),
                ));
            }
            let word = (b1 as u32) | (((b2 & 0b0111_1111) as u32) << 8);
            value |= word << shift;
            if (b2 & 0b1000_0000) == 0 {
                return Ok(value);
            }
            shift += 15;
        }
    }

    // ---------------------------------------------------------------
    // Handle references
    // ---------------------------------------------------------------

    /// H: `|CODE (4 bits)|COUNTER (4 bits)|HANDLE or OFFSET|`
    fn handle_reference(&mut self) -> Result<HandleReference> {
        let form = self.read_byte()?;
        let code = form >> 4;
        let counter = form & 0x0F;
        if counter > 8 {
            return Err(DwgError::InvalidFormat(format!(
                "handle reference with {} value bytes",
                counter
            )));
        }
        let mut handle = 0u64;
        for _ in 0..counter {
            handle = (handle << 8) | self.read_byte()? as u64;
        }
        Ok(HandleReference::new(code, counter, handle))
    }

    /// Read a handle reference and resolve it against the owning handle.
    fn handle_reference_resolved(&mut self, reference_handle: u64) -> Result<u64> {
        let reference = self.handle_reference()?;
        reference.resolve(reference_handle).ok_or_else(|| {
            DwgError::InvalidFormat(format!("invalid handle reference code {}", reference.code))
        })
    }

    /// A handle stored as an RC length followed by that many big-endian
    /// bytes (the seed handle of the header variables).
    fn read_handle_fixed8(&mut self) -> Result<HandleReference> {
        let counter = self.read_byte()?;
        if counter > 8 {
            return Err(DwgError::InvalidFormat(format!(
                "fixed handle with {} value bytes",
                counter
            )));
        }
        let mut handle = 0u64;
        for _ in 0..counter {
            handle = (handle << 8) | self.read_byte()? as u64;
        }
        Ok(HandleReference::new(0, counter, handle))
    }

    // ---------------------------------------------------------------
    // Text and markers
    // ---------------------------------------------------------------

    /// TV: BS length followed by that many bytes in the drawing code page.
    fn read_variable_text(&mut self) -> Result<String> {
        let length = self.read_bit_short()? as u16 as usize;
        if length == 0 {
            return Ok(String::new());
        }
        let bytes = self.read_bytes(length)?;
        let (text, _, _) = self.encoding().decode(&bytes);
        Ok(text.trim_end_matches('\0').to_string())
    }

    fn read_sentinel(&mut self) -> Result<[u8; 16]> {
        let mut sentinel = [0u8; 16];
        self.read_into(&mut sentinel)?;
        Ok(sentinel)
    }
}

/// Text encoding for a drawing code page number.
pub fn encoding_from_code_page(code_page: u16) -> &'static Encoding {
    match code_page {
        2 => encoding_rs::WINDOWS_1250,
        3 => encoding_rs::WINDOWS_1251,
        4 => encoding_rs::WINDOWS_1253,
        5 => encoding_rs::WINDOWS_1254,
        6 => encoding_rs::WINDOWS_1255,
        7 => encoding_rs::WINDOWS_1256,
        8 => encoding_rs::WINDOWS_1257,
        0x0A => encoding_rs::WINDOWS_874,
        0x0B => encoding_rs::SHIFT_JIS,
        0x0C => encoding_rs::GBK,
        0x0D => encoding_rs::EUC_KR,
        0x0E => encoding_rs::BIG5,
        _ => encoding_rs::WINDOWS_1252,
    }
}

// Keep trait object-safe
#[allow(dead_code)]
fn _assert_object_safe(_: &dyn IDwgStreamReader) {}
