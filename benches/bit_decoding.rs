//! Benchmarks for the bit-level primitives and the object CRC.

use acaddwg::io::dwg::constants::CRC_SEED;
use acaddwg::io::dwg::crc::crc8;
use acaddwg::io::dwg::reader::{DwgStreamReaderBase, IDwgStreamReader};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

/// BS values packed back to back: (00, 4035), (01, 138), (10), (11).
fn bit_short_stream(repeats: usize) -> Vec<u8> {
    // 18 + 10 + 2 + 2 bits = 4 bytes per group
    let group = [0x30, 0xC3, 0xD8, 0xAB];
    group.iter().copied().cycle().take(group.len() * repeats).collect()
}

/// BD values: one raw double (00) followed by three single-opcode values.
fn bit_double_stream(repeats: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(repeats * 9);
    for i in 0..repeats {
        let bits = (1.5f64 + i as f64).to_bits();
        // opcode 00, 64 value bits, then 01 10 11 and padding
        let mut group = [0u8; 9];
        let raw = bits.to_le_bytes();
        for (j, byte) in raw.iter().enumerate() {
            group[j] |= byte >> 2;
            group[j + 1] |= byte << 6;
        }
        group[8] |= 0b0001_1011;
        bytes.extend_from_slice(&group);
    }
    bytes
}

fn bench_bit_short(c: &mut Criterion) {
    let data = bit_short_stream(4096);
    let mut group = c.benchmark_group("bit_short");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("read_4096_groups", |b| {
        b.iter(|| {
            let mut reader = DwgStreamReaderBase::new(black_box(&data));
            let mut sum = 0i64;
            for _ in 0..4096 * 4 {
                sum += reader.read_bit_short().unwrap_or_default() as i64;
            }
            sum
        })
    });
    group.finish();
}

fn bench_bit_double(c: &mut Criterion) {
    let data = bit_double_stream(4096);
    let mut group = c.benchmark_group("bit_double");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("read_4096_groups", |b| {
        b.iter(|| {
            let mut reader = DwgStreamReaderBase::new(black_box(&data));
            let mut sum = 0.0;
            for _ in 0..4096 {
                for _ in 0..4 {
                    sum += reader.read_bit_double().unwrap_or_default();
                }
                let _ = reader.align_to_byte();
            }
            sum
        })
    });
    group.finish();
}

fn bench_crc(c: &mut Criterion) {
    let data: Vec<u8> = (0..64 * 1024).map(|i| (i * 31 % 251) as u8).collect();
    let mut group = c.benchmark_group("crc8");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("64k", |b| b.iter(|| crc8(CRC_SEED, black_box(&data))));
    group.finish();
}

criterion_group!(benches, bench_bit_short, bench_bit_double, bench_crc);
criterion_main!(benches);
