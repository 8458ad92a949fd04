//! Locating the EXIF block inside a JPEG stream.
//!
//! A JPEG carries EXIF metadata in an APP1 segment: the marker byte `0xE1`,
//! a two-byte segment length, the literal `"Exif\0\0"`, then a TIFF
//! structure whose first two bytes (`"II"` or `"MM"`) set the byte order of
//! everything after them.
//!
//! [`ExifDecoder`] walks that layout in fixed [`Stage`]s over a
//! [`ByteCursor`](crate::ByteCursor) and stops at the header of the EXIF
//! image file directory. Individual tag entries are not decoded.
//!
//! ## Layout
//!
//! - [`structures`]: marker constants, stage outcomes and the findings record
//! - [`decoder`]: the stage sequence itself
//! - `error`: hard failures

mod decoder;
mod error;
mod structures;

pub use decoder::{DecodeOptions, ExifDecoder, decode, decode_with};
pub use error::DecodeError;
pub use structures::*;
