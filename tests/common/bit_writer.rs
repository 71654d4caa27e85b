//! Bit writer for test fixtures.
//!
//! Used by the integration tests through `common` and by the crate's own
//! unit tests, which mount this file directly. Both parents bring `Vector3`
//! into scope.

#![allow(dead_code)]

use super::Vector3;

/// MSB-first bit writer producing the encodings the reader decodes.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bytes: Vec<u8>,
    len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written.
    pub fn bit_len(&self) -> usize {
        self.len
    }

    /// Written bytes, the last one zero-padded.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn push(&mut self, value: u64, count: usize) {
        for i in (0..count).rev() {
            if self.len % 8 == 0 {
                self.bytes.push(0);
            }
            if (value >> i) & 1 == 1 {
                let last = self.bytes.len() - 1;
                self.bytes[last] |= 0x80 >> (self.len % 8);
            }
            self.len += 1;
        }
    }

    pub fn append(&mut self, other: &BitWriter) {
        for i in 0..other.len {
            let bit = (other.bytes[i / 8] >> (7 - i % 8)) & 1;
            self.push(bit as u64, 1);
        }
    }

    pub fn b(&mut self, value: bool) {
        self.push(value as u64, 1);
    }

    pub fn bb(&mut self, value: u8) {
        self.push(value as u64, 2);
    }

    pub fn raw(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.push(*b as u64, 8);
        }
    }

    pub fn rc(&mut self, value: u8) {
        self.push(value as u64, 8);
    }

    pub fn rs(&mut self, value: i16) {
        self.raw(&value.to_le_bytes());
    }

    pub fn rl(&mut self, value: i32) {
        self.raw(&value.to_le_bytes());
    }

    pub fn rd(&mut self, value: f64) {
        self.raw(&value.to_le_bytes());
    }

    pub fn bs(&mut self, value: i16) {
        match value {
            0 => self.bb(2),
            256 => self.bb(3),
            1..=255 => {
                self.bb(1);
                self.rc(value as u8);
            }
            _ => {
                self.bb(0);
                self.rs(value);
            }
        }
    }

    pub fn bl(&mut self, value: i32) {
        match value {
            0 => self.bb(2),
            1..=255 => {
                self.bb(1);
                self.rc(value as u8);
            }
            _ => {
                self.bb(0);
                self.rl(value);
            }
        }
    }

    pub fn bd(&mut self, value: f64) {
        if value == 1.0 {
            self.bb(1);
        } else if value == 0.0 {
            self.bb(2);
        } else {
            self.bb(0);
            self.rd(value);
        }
    }

    pub fn dd(&mut self, value: f64, default: f64) {
        if value == default {
            self.bb(0);
        } else {
            self.bb(3);
            self.rd(value);
        }
    }

    pub fn bd3(&mut self, v: Vector3) {
        self.bd(v.x);
        self.bd(v.y);
        self.bd(v.z);
    }

    pub fn rd2(&mut self, x: f64, y: f64) {
        self.rd(x);
        self.rd(y);
    }

    pub fn bt(&mut self, value: f64) {
        if value == 0.0 {
            self.b(true);
        } else {
            self.b(false);
            self.bd(value);
        }
    }

    pub fn be(&mut self, v: Vector3) {
        if v == Vector3::UNIT_Z {
            self.b(true);
        } else {
            self.b(false);
            self.bd3(v);
        }
    }

    /// H with the fewest value bytes.
    pub fn h(&mut self, code: u8, value: u64) {
        let bytes: Vec<u8> = value
            .to_be_bytes()
            .iter()
            .copied()
            .skip_while(|b| *b == 0)
            .collect();
        self.rc((code << 4) | bytes.len() as u8);
        self.raw(&bytes);
    }

    /// TV in a single-byte code page.
    pub fn tv(&mut self, text: &str) {
        self.bs(text.len() as i16);
        self.raw(text.as_bytes());
    }
}

/// Unsigned MC, least significant group first.
pub fn modular_char(mut value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let group = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(group);
            return out;
        }
        out.push(group | 0x80);
    }
}

/// Signed MC: the last byte holds 6 data bits and the sign in 0x40.
pub fn signed_modular_char(value: i64) -> Vec<u8> {
    let mut magnitude = value.unsigned_abs();
    let mut out = Vec::new();
    while magnitude >= 0x40 {
        out.push((magnitude & 0x7F) as u8 | 0x80);
        magnitude >>= 7;
    }
    let sign = if value < 0 { 0x40 } else { 0 };
    out.push(magnitude as u8 | sign);
    out
}
