//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;

/// Assert a file exists and has exactly `size` bytes; returns its contents.
pub fn assert_file_size(path: &Path, size: usize) -> Vec<u8> {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected output file {}: {e}", path.display()));
    assert_eq!(bytes.len(), size, "Unexpected size of {}", path.display());
    bytes
}

/// Assert a file starts with the little-endian load address.
pub fn assert_load_address(bytes: &[u8], address: u16) {
    assert_eq!(
        &bytes[..2],
        &address.to_le_bytes(),
        "Expected load address ${address:04x}"
    );
}

/// Assert a file is a PNG with the given dimensions.
pub fn assert_png(path: &Path, width: u32, height: u32) {
    let img = image::open(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert_eq!((img.width(), img.height()), (width, height));
}
