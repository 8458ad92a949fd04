#![allow(dead_code)]

/// A small JPEG: SOI, a JFIF APP0 segment, then an APP1 segment whose TIFF
/// header uses `token` and whose IFD0 holds a single ExifIFDPointer entry.
pub fn sample_jpeg(token: &[u8; 2]) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend_from_slice(&[
        0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x48, 0x00,
        0x48, 0x00, 0x00,
    ]);
    data.extend_from_slice(&[0xFF, 0xE1, 0x00, 0x2A]);
    data.extend_from_slice(b"Exif\0\0");
    data.extend_from_slice(token);
    data.extend_from_slice(&[0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01, 0x00]);
    data.extend_from_slice(&[0x87, 0x69, 0x1A, 0x00, 0x00, 0x00, 0x03, 0x00]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// Offset of the APP1 marker byte in [`sample_jpeg`].
pub const APP1_OFFSET: usize = 21;

/// Offset of the IFD marker in [`sample_jpeg`].
pub const IFD_OFFSET: usize = 40;

/// A JPEG with only a JFIF segment and no APP1.
pub fn jpeg_without_exif() -> Vec<u8> {
    vec![
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00,
        0x48, 0x00, 0x48, 0x00, 0x00, 0xFF, 0xD9,
    ]
}
