//! Base implementation of `IDwgStreamReader` with bit-level I/O.
//!
//! The reader borrows one in-memory buffer (a section or a single object)
//! and keeps an explicit bit offset into it. Every read goes through the
//! bounds-checked [`IDwgStreamReader::read_bits`].

use encoding_rs::Encoding;

use crate::error::{DwgError, Result};

use super::stream_reader::IDwgStreamReader;

/// Bit cursor over a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct DwgStreamReaderBase<'a> {
    data: &'a [u8],
    bit_pos: usize,
    encoding: &'static Encoding,
}

impl<'a> DwgStreamReaderBase<'a> {
    /// Create a new reader at bit 0 of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_pos: 0,
            encoding: encoding_rs::WINDOWS_1252,
        }
    }

    /// Same reader, decoding `TV` strings with `encoding`.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The whole underlying buffer.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

impl IDwgStreamReader for DwgStreamReaderBase<'_> {
    fn position_in_bits(&self) -> usize {
        self.bit_pos
    }

    fn set_position_in_bits(&mut self, position: usize) -> Result<()> {
        let length = self.length_in_bits();
        if position > length {
            return Err(DwgError::TruncatedInput {
                position,
                requested: 0,
                available: length,
            });
        }
        self.bit_pos = position;
        Ok(())
    }

    fn length_in_bits(&self) -> usize {
        self.data.len() * 8
    }

    fn read_bits(&mut self, count: u32) -> Result<u64> {
        let count = count.min(64) as usize;
        let end = self.bit_pos + count;
        if end > self.length_in_bits() {
            return Err(DwgError::TruncatedInput {
                position: self.bit_pos,
                requested: count,
                available: self.length_in_bits(),
            });
        }

        let mut value = 0u64;
        let mut pos = self.bit_pos;
        let mut remaining = count;
        while remaining > 0 {
            let byte = self.data[pos >> 3];
            let offset = pos & 7;
            let take = (8 - offset).min(remaining);
            let bits = (byte >> (8 - offset - take)) & (((1u16 << take) - 1) as u8);
            value = (value << take) | bits as u64;
            pos += take;
            remaining -= take;
        }

        self.bit_pos = end;
        Ok(value)
    }

    fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        if length * 8 > self.remaining_bits() {
            return Err(DwgError::TruncatedInput {
                position: self.bit_pos,
                requested: length * 8,
                available: self.length_in_bits(),
            });
        }
        if self.bit_pos % 8 == 0 {
            let start = self.bit_pos / 8;
            self.bit_pos += length * 8;
            return Ok(self.data[start..start + length].to_vec());
        }
        (0..length).map(|_| self.read_byte()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Vector2, Vector3};

    fn make_reader(data: &[u8]) -> DwgStreamReaderBase<'_> {
        DwgStreamReaderBase::new(data)
    }

    /// Pack a string of '0'/'1' characters MSB-first, zero padded.
    fn pack_bits(bits: &str) -> Vec<u8> {
        let bits: Vec<u8> = bits
            .bytes()
            .filter(|b| *b == b'0' || *b == b'1')
            .map(|b| b - b'0')
            .collect();
        bits.chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, bit)| acc | (bit << (7 - i)))
            })
            .collect()
    }

    fn byte_bits(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:08b}", b)).collect()
    }

    #[test]
    fn test_read_bit() {
        // 0b10110000 = 0xB0
        let mut reader = make_reader(&[0xB0]);
        let bits: Vec<bool> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(bits, [true, false, true, true, false, false, false, false]);
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_fixed_width_fields_at_every_offset() {
        let data = [0x2B, 0x8F, 0x6C];
        let expected_2 = [0, 1, 2, 1, 2, 1, 3, 3, 2];
        let expected_3 = [1, 2, 5, 2, 5, 3, 7, 6, 4];
        let expected_4 = [2, 5, 10, 5, 11, 7, 14, 12, 8];
        for offset in 0..=8 {
            let mut reader = make_reader(&data);
            reader.set_position_in_bits(offset).unwrap();
            assert_eq!(reader.read_2bits().unwrap(), expected_2[offset], "2 bits @{}", offset);
            reader.set_position_in_bits(offset).unwrap();
            assert_eq!(reader.read_3bits().unwrap(), expected_3[offset], "3 bits @{}", offset);
            reader.set_position_in_bits(offset).unwrap();
            assert_eq!(reader.read_4bits().unwrap(), expected_4[offset], "4 bits @{}", offset);
            assert_eq!(reader.position_in_bits(), offset + 4);
        }
    }

    #[test]
    fn test_read_bit_short_opcodes() {
        assert_eq!(make_reader(&[0x30, 0xC3, 0xC0]).read_bit_short().unwrap(), 4035);
        assert_eq!(make_reader(&[0x62, 0xB0, 0xC0]).read_bit_short().unwrap(), 138);
        assert_eq!(make_reader(&[0x81, 0x80, 0x01]).read_bit_short().unwrap(), 0);
        assert_eq!(make_reader(&[0xC1, 0x80, 0x01]).read_bit_short().unwrap(), 256);
    }

    #[test]
    fn test_read_bit_short_unaligned() {
        let data = [0x98, 0x61, 0xE0, 0x00];
        let mut reader = make_reader(&data);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bit_short().unwrap(), 4035);
        assert_eq!(reader.position_in_bits(), 19);
    }

    #[test]
    fn test_read_bit_short_positions() {
        let mut reader = make_reader(&[0x81, 0x80, 0x01]);
        reader.read_bit_short().unwrap();
        assert_eq!(reader.position_in_bits(), 2);

        let mut reader = make_reader(&[0x62, 0xB0, 0xC0]);
        reader.read_bit_short().unwrap();
        assert_eq!(reader.position_in_bits(), 10);
    }

    #[test]
    fn test_read_bit_long() {
        let data = pack_bits(&format!("00{}", byte_bits(&100_000i32.to_le_bytes())));
        assert_eq!(make_reader(&data).read_bit_long().unwrap(), 100_000);
        assert_eq!(make_reader(&[0x62, 0xB0]).read_bit_long().unwrap(), 138);
        assert_eq!(make_reader(&[0x80]).read_bit_long().unwrap(), 0);
        // 11 is a literal 0 for BL, not 256
        assert_eq!(make_reader(&[0xC0]).read_bit_long().unwrap(), 0);
    }

    #[test]
    fn test_read_bit_double() {
        let data = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3C, 0x0F, 0xC0];
        let mut reader = make_reader(&data);
        assert_eq!(reader.read_bit_double().unwrap(), 1.0);
        assert_eq!(reader.position_in_bits(), 66);

        assert_eq!(make_reader(&[0x40]).read_bit_double().unwrap(), 1.0);
        assert_eq!(make_reader(&[0x80]).read_bit_double().unwrap(), 0.0);
        assert_eq!(make_reader(&[0xC0]).read_bit_double().unwrap(), 0.0);
    }

    #[test]
    fn test_read_bit_double_with_default() {
        let def = 1.0f64;

        let mut reader = make_reader(&[0x00]);
        assert_eq!(reader.read_bit_double_with_default(def).unwrap(), def);
        assert_eq!(reader.position_in_bits(), 2);

        let data = pack_bits(&format!("01{}", byte_bits(&[1, 2, 3, 4])));
        let mut patched = def.to_le_bytes();
        patched[0..4].copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(
            make_reader(&data).read_bit_double_with_default(def).unwrap(),
            f64::from_le_bytes(patched)
        );

        let data = pack_bits(&format!("10{}", byte_bits(&[0xAA, 0xBB, 1, 2, 3, 4])));
        let mut patched = def.to_le_bytes();
        patched[4] = 0xAA;
        patched[5] = 0xBB;
        patched[0..4].copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(
            make_reader(&data).read_bit_double_with_default(def).unwrap(),
            f64::from_le_bytes(patched)
        );

        let data = pack_bits(&format!("11{}", byte_bits(&(-2.5f64).to_le_bytes())));
        assert_eq!(make_reader(&data).read_bit_double_with_default(def).unwrap(), -2.5);
    }

    #[test]
    fn test_raw_values_unaligned() {
        let mut bits = String::from("1");
        bits.push_str(&byte_bits(&(-2i16).to_le_bytes()));
        bits.push_str(&byte_bits(&0x1234_5678i32.to_le_bytes()));
        bits.push_str(&byte_bits(&(-7i64).to_le_bytes()));
        bits.push_str(&byte_bits(&3.25f64.to_le_bytes()));
        let data = pack_bits(&bits);

        let mut reader = make_reader(&data);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_raw_short().unwrap(), -2);
        assert_eq!(reader.read_raw_long().unwrap(), 0x1234_5678);
        assert_eq!(reader.read_raw_long_long().unwrap(), -7);
        assert_eq!(reader.read_raw_double().unwrap(), 3.25);
        assert_eq!(reader.position_in_bits(), 1 + 16 + 32 + 64 + 64);
    }

    #[test]
    fn test_read_modular_char() {
        assert_eq!(make_reader(&[0x3F]).read_modular_char().unwrap(), 63);
        assert_eq!(make_reader(&[0x82, 0x01]).read_modular_char().unwrap(), 130);
        assert_eq!(
            make_reader(&[0xE9, 0x97, 0xE6, 0x35]).read_modular_char().unwrap(),
            112_823_273
        );
        assert!(make_reader(&[0x80, 0x80]).read_modular_char().is_err());
    }

    #[test]
    fn test_read_signed_modular_char() {
        assert_eq!(make_reader(&[0x05]).read_signed_modular_char().unwrap(), 5);
        assert_eq!(make_reader(&[0x45]).read_signed_modular_char().unwrap(), -5);
        assert_eq!(make_reader(&[0x82, 0x01]).read_signed_modular_char().unwrap(), 130);
        assert_eq!(make_reader(&[0x82, 0x41]).read_signed_modular_char().unwrap(), -130);
    }

    #[test]
    fn test_read_modular_short() {
        let mut reader = make_reader(&[0x10, 0x00]);
        assert_eq!(reader.read_modular_short().unwrap(), 16);
        assert_eq!(reader.position(), 2);

        let mut reader = make_reader(&[0x31, 0xF4, 0x01, 0x00]);
        assert_eq!(reader.read_modular_short().unwrap(), 0xF431);
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_handle_reference() {
        let mut reader = make_reader(&[0x51, 0x1A, 0x42, 0x01, 0xF2, 0x60]);
        let h = reader.handle_reference().unwrap();
        assert_eq!((h.code, h.counter, h.handle), (5, 1, 0x1A));
        let h = reader.handle_reference().unwrap();
        assert_eq!(h.to_string(), "4.2.1F2");
        assert_eq!(reader.handle_reference_resolved(0x30).unwrap(), 0x31);
    }

    #[test]
    fn test_handle_reference_invalid_code() {
        let mut reader = make_reader(&[0x71, 0x05]);
        assert!(matches!(
            reader.handle_reference_resolved(0x30),
            Err(DwgError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_handle_fixed8() {
        let mut reader = make_reader(&[0x02, 0x01, 0x00]);
        let h = reader.read_handle_fixed8().unwrap();
        assert_eq!(h.handle, 0x100);
        assert_eq!(h.counter, 2);
    }

    #[test]
    fn test_read_variable_text() {
        let mut bits = String::from("01");
        bits.push_str(&byte_bits(&[5]));
        bits.push_str(&byte_bits(b"hello"));
        let data = pack_bits(&bits);
        assert_eq!(make_reader(&data).read_variable_text().unwrap(), "hello");

        // 10 → empty
        assert_eq!(make_reader(&[0x80]).read_variable_text().unwrap(), "");
    }

    #[test]
    fn test_read_variable_text_code_page() {
        let mut bits = String::from("01");
        bits.push_str(&byte_bits(&[2, 0xE9, 0x00]));
        let data = pack_bits(&bits);
        assert_eq!(make_reader(&data).read_variable_text().unwrap(), "é");
    }

    #[test]
    fn test_extrusion_and_thickness() {
        let mut reader = make_reader(&[0xC0]);
        assert_eq!(reader.read_bit_extrusion().unwrap(), Vector3::UNIT_Z);
        assert_eq!(reader.read_bit_thickness().unwrap(), 0.0);
        assert_eq!(reader.position_in_bits(), 2);

        // 0, BD(10)=0.0, BD(10)=0.0, BD(01)=1.0
        let data = pack_bits("0 10 10 01");
        assert_eq!(
            make_reader(&data).read_bit_extrusion().unwrap(),
            Vector3::new(0.0, 0.0, 1.0)
        );
        // 0, BD(01)=1.0
        assert_eq!(make_reader(&pack_bits("0 01")).read_bit_thickness().unwrap(), 1.0);
    }

    #[test]
    fn test_point_readers() {
        let data = pack_bits("01 10");
        assert_eq!(make_reader(&data).read_2bit_double().unwrap(), Vector2::new(1.0, 0.0));

        let data = pack_bits(&format!("00 11{}", byte_bits(&5.0f64.to_le_bytes())));
        let def = Vector2::new(3.0, 4.0);
        let v = make_reader(&data).read_2bit_double_with_default(def).unwrap();
        assert_eq!(v, Vector2::new(3.0, 5.0));
    }

    #[test]
    fn test_truncated_input() {
        let mut reader = make_reader(&[0x00]);
        reader.read_bits(3).unwrap();
        match reader.read_raw_short() {
            Err(DwgError::TruncatedInput { available, .. }) => assert_eq!(available, 8),
            other => panic!("expected TruncatedInput, got {:?}", other),
        }
        assert!(make_reader(&[0x01]).read_bytes(2).is_err());
        assert!(make_reader(&[0x01]).read_sentinel().is_err());
    }

    #[test]
    fn test_alignment_and_crc() {
        let mut reader = make_reader(&[0xFF, 0x34, 0x12]);
        reader.read_bits(3).unwrap();
        assert_eq!(reader.reset_shift().unwrap(), 0x1234);
        assert_eq!(reader.remaining_bits(), 0);

        let mut reader = make_reader(&[0xAA, 0xBB]);
        reader.align_to_byte().unwrap();
        assert_eq!(reader.position(), 0);
        assert!(reader.set_position_in_bits(17).is_err());
    }

    #[test]
    fn test_read_bytes_aligned_and_unaligned() {
        let mut reader = make_reader(&[0x01, 0x02, 0x03]);
        assert_eq!(reader.read_bytes(2).unwrap(), vec![0x01, 0x02]);
        assert_eq!(reader.remaining_bits(), 8);

        let data = pack_bits(&format!("1{}", byte_bits(&[0xAB, 0xCD])));
        let mut reader = make_reader(&data);
        reader.read_bit().unwrap();
        assert_eq!(reader.read_bytes(2).unwrap(), vec![0xAB, 0xCD]);
    }
}
