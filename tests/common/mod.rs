//! Shared test utilities for acaddwg integration tests.
//!
//! Fixtures are synthesized in memory with [`builders::DwgFileBuilder`];
//! every test crate imports them via `mod common;`.

#![allow(dead_code)]

pub mod bit_writer;
pub mod builders;

use acaddwg::{DwgDocument, DwgReader, DwgReaderConfiguration, Vector3};

use builders::{circle, layer, layer_control, DwgFileBuilder};

/// Handle of the layer control object in every fixture.
pub const LAYER_CONTROL: u64 = 0x02;
/// Handle of layer "0" in every fixture.
pub const LAYER_0: u64 = 0x10;
/// First handle handed out to fixture entities.
pub const FIRST_ENTITY: u64 = 0x100;

/// Layer flags of layer "0": on and plotting, line weight by layer.
pub const LAYER_0_FLAGS: u16 = 0x02 | 0x10 | (29 << 5);

/// A builder holding the layer table with layer "0".
pub fn drawing() -> DwgFileBuilder {
    DwgFileBuilder::new()
        .object(LAYER_CONTROL, layer_control(LAYER_CONTROL, &[LAYER_0]))
        .object(LAYER_0, layer(LAYER_0, LAYER_CONTROL, "0", LAYER_0_FLAGS, 7))
}

/// Centers and radii of the three-circle drawing.
pub const THREE_CIRCLES: [((f64, f64, f64), f64); 3] = [
    ((0.0, 0.0, 0.0), 16.6),
    ((10.0, 10.0, 10.0), 10.0),
    ((-15.0, 0.0, 0.0), 9.5),
];

/// Layer "0" and three circles.
pub fn three_circles() -> DwgFileBuilder {
    let mut builder = drawing();
    for (i, ((x, y, z), r)) in THREE_CIRCLES.iter().enumerate() {
        let handle = FIRST_ENTITY + i as u64;
        builder.add_object(handle, circle(handle, LAYER_0, Vector3::new(*x, *y, *z), *r));
    }
    builder
}

/// Open a fixture with the default configuration.
pub fn open(bytes: &[u8]) -> acaddwg::Result<DwgDocument> {
    DwgReader::from_bytes(bytes).read()
}

/// Open a fixture with an explicit configuration.
pub fn open_with(bytes: &[u8], config: DwgReaderConfiguration) -> acaddwg::Result<DwgDocument> {
    DwgReader::from_bytes(bytes).with_config(config).read()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_vec_close(actual: Vector3, expected: Vector3) {
    assert_close(actual.x, expected.x);
    assert_close(actual.y, expected.y);
    assert_close(actual.z, expected.z);
}
