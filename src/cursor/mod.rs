//! Random-access cursor over an in-memory byte buffer.
//!
//! [`ByteCursor`] owns a fixed-length buffer and a position into it. Typed
//! reads and writes honour a runtime [`Endian`] setting which can be switched
//! at any point; switching only changes how later multi-byte values are
//! interpreted, never the bytes already in the buffer.
//!
//! Every operation is bounds-checked up front. A failing call returns
//! [`CursorError`] and leaves both the position and the buffer untouched.
//!
//! ## Example
//!
//! ```
//! use xiff::{ByteCursor, Endian};
//!
//! let mut cursor = ByteCursor::new(vec![0x49, 0x49, 0x2A, 0x00]);
//! assert_eq!(cursor.read_fixed_ascii(2)?, "II");
//! cursor.set_endian(Endian::Little);
//! assert_eq!(cursor.read_u16()?, 42);
//! assert!(!cursor.has_next());
//! # Ok::<(), xiff::CursorError>(())
//! ```

mod error;
mod primitive;

pub use error::CursorError;
pub use primitive::Primitive;

use byteorder::{BigEndian, LittleEndian};
use std::fmt;
use std::io::Cursor;
use std::ops::Range;

/// Byte order applied to multi-byte values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Endian {
    /// Most significant byte first ("MM" in a TIFF header).
    #[default]
    Big,
    /// Least significant byte first ("II" in a TIFF header).
    Little,
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endian::Big => f.write_str("big-endian"),
            Endian::Little => f.write_str("little-endian"),
        }
    }
}

/// Generates the per-type read/write wrappers around [`ByteCursor::read`]
/// and [`ByteCursor::write`].
macro_rules! typed_accessors {
    ($($ty:ty => $read:ident, $write:ident;)*) => {
        $(
            #[doc = concat!("Read one `", stringify!($ty), "` and advance past it.")]
            pub fn $read(&mut self) -> Result<$ty, CursorError> {
                self.read::<$ty>()
            }

            #[doc = concat!("Write one `", stringify!($ty), "` and advance past it.")]
            pub fn $write(&mut self, value: $ty) -> Result<(), CursorError> {
                self.write(value)
            }
        )*
    };
}

/// Endian-aware cursor over an owned, fixed-length byte buffer.
///
/// Invariant: `0 <= position() <= len()` after every call.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    inner: Cursor<Box<[u8]>>,
    endian: Endian,
}

impl ByteCursor {
    /// Take ownership of a complete buffer. The position starts at 0 and the
    /// byte order at [`Endian::Big`].
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self {
            inner: Cursor::new(bytes.into()),
            endian: Endian::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self) -> usize {
        // The position never exceeds the buffer length, which fits in usize.
        self.inner.position() as usize
    }

    /// Move the cursor to `position`.
    ///
    /// Only positions strictly inside the buffer are accepted; parking the
    /// cursor at `len()` is reserved for reads and writes that consume the
    /// final bytes.
    pub fn set_position(&mut self, position: usize) -> Result<(), CursorError> {
        if position >= self.len() {
            return Err(CursorError::InvalidPosition {
                requested: position,
                length: self.len(),
            });
        }
        self.inner.set_position(position as u64);
        Ok(())
    }

    /// Bytes left between the position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.len() - self.position()
    }

    pub fn has_next(&self) -> bool {
        self.position() < self.len()
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    pub fn is_big_endian(&self) -> bool {
        self.endian == Endian::Big
    }

    /// The whole underlying buffer, independent of the position.
    pub fn as_slice(&self) -> &[u8] {
        self.inner.get_ref()
    }

    pub fn into_inner(self) -> Box<[u8]> {
        self.inner.into_inner()
    }

    /// Decode a `T` at the current position using the current byte order.
    pub fn read<T: Primitive>(&mut self) -> Result<T, CursorError> {
        self.require(T::SIZE)?;
        let value = match self.endian {
            Endian::Big => T::read_from::<BigEndian, _>(&mut self.inner),
            Endian::Little => T::read_from::<LittleEndian, _>(&mut self.inner),
        };
        value.map_err(|_| self.out_of_bounds(T::SIZE))
    }

    /// Encode `value` at the current position using the current byte order.
    pub fn write<T: Primitive>(&mut self, value: T) -> Result<(), CursorError> {
        self.require(T::SIZE)?;
        let written = match self.endian {
            Endian::Big => value.write_to::<BigEndian, _>(&mut self.inner),
            Endian::Little => value.write_to::<LittleEndian, _>(&mut self.inner),
        };
        written.map_err(|_| self.out_of_bounds(T::SIZE))
    }

    typed_accessors! {
        u8 => read_u8, write_u8;
        i8 => read_i8, write_i8;
        u16 => read_u16, write_u16;
        i16 => read_i16, write_i16;
        u32 => read_u32, write_u32;
        i32 => read_i32, write_i32;
        u64 => read_u64, write_u64;
        i64 => read_i64, write_i64;
        f32 => read_f32, write_f32;
        f64 => read_f64, write_f64;
    }

    /// Decode exactly `len` bytes as ASCII text.
    pub fn read_fixed_ascii(&mut self, len: usize) -> Result<String, CursorError> {
        self.require(len)?;
        let start = self.position();
        let text = self.as_slice()[start..start + len]
            .iter()
            .map(|&b| ascii_char(b))
            .collect();
        self.inner.set_position((start + len) as u64);
        Ok(text)
    }

    /// Decode ASCII text up to, but not including, `delimiter`.
    ///
    /// Stops at the end of the buffer without error, returning whatever was
    /// consumed. The cursor is left on the delimiter.
    pub fn read_ascii_until(&mut self, delimiter: char) -> String {
        let start = self.position();
        let consumed = self.as_slice()[start..]
            .iter()
            .map(|&b| ascii_char(b))
            .take_while(|&c| c != delimiter)
            .collect::<String>();
        // Every char is one byte, so the char count is the byte count.
        self.inner.set_position((start + consumed.len()) as u64);
        consumed
    }

    /// Decode the bytes in `range` as ASCII text without moving the cursor.
    pub fn read_string_at(&self, range: Range<usize>) -> Result<String, CursorError> {
        let bytes = self
            .as_slice()
            .get(range.clone())
            .ok_or(CursorError::InvalidRange {
                start: range.start,
                end: range.end,
                length: self.len(),
            })?;
        Ok(bytes.iter().map(|&b| ascii_char(b)).collect())
    }

    fn require(&self, needed: usize) -> Result<(), CursorError> {
        if needed > self.remaining() {
            return Err(self.out_of_bounds(needed));
        }
        Ok(())
    }

    fn out_of_bounds(&self, needed: usize) -> CursorError {
        CursorError::OutOfBounds {
            position: self.position(),
            needed,
            length: self.len(),
        }
    }
}

impl From<Vec<u8>> for ByteCursor {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// ASCII decoding drops the high bit, so every byte maps to one ASCII char.
fn ascii_char(byte: u8) -> char {
    char::from(byte & 0x7F)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! round_trip {
        ($name:ident, $ty:ty) => {
            #[test]
            fn $name() {
                for endian in [Endian::Big, Endian::Little] {
                    for value in [0 as $ty, <$ty>::MIN, <$ty>::MAX] {
                        let mut cursor = ByteCursor::new(vec![0u8; 16]);
                        cursor.set_endian(endian);
                        cursor.set_position(3).unwrap();
                        cursor.write(value).unwrap();
                        assert_eq!(cursor.position(), 3 + <$ty as Primitive>::SIZE);
                        cursor.set_position(3).unwrap();
                        assert_eq!(cursor.read::<$ty>().unwrap(), value, "{endian}");
                    }
                }
            }
        };
    }

    round_trip!(round_trip_u8, u8);
    round_trip!(round_trip_i8, i8);
    round_trip!(round_trip_u16, u16);
    round_trip!(round_trip_i16, i16);
    round_trip!(round_trip_u32, u32);
    round_trip!(round_trip_i32, i32);
    round_trip!(round_trip_u64, u64);
    round_trip!(round_trip_i64, i64);
    round_trip!(round_trip_f32, f32);
    round_trip!(round_trip_f64, f64);

    #[test]
    fn endian_controls_decoding_not_contents() {
        let mut cursor = ByteCursor::new(vec![0x12, 0x34, 0x56, 0x78]);
        assert_eq!(cursor.read_u32().unwrap(), 0x1234_5678);

        cursor.set_position(0).unwrap();
        cursor.set_endian(Endian::Little);
        assert_eq!(cursor.read_u32().unwrap(), 0x7856_3412);
        assert_eq!(cursor.as_slice(), &[0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn writes_use_current_endian() {
        let mut cursor = ByteCursor::new(vec![0u8; 4]);
        cursor.write_u16(0x8769).unwrap();
        cursor.set_endian(Endian::Little);
        cursor.write_i16(-2).unwrap();
        assert_eq!(cursor.as_slice(), &[0x87, 0x69, 0xFE, 0xFF]);
    }

    #[test]
    fn short_read_fails_without_moving() {
        let mut cursor = ByteCursor::new(vec![1, 2, 3]);
        cursor.set_position(1).unwrap();

        let err = cursor.read_u32().unwrap_err();
        assert_eq!(
            err,
            CursorError::OutOfBounds {
                position: 1,
                needed: 4,
                length: 3,
            }
        );
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.read_u16().unwrap(), 0x0203);
        assert_eq!(cursor.position(), 3);
        assert!(cursor.read_u8().is_err());
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn short_write_leaves_buffer_unmodified() {
        let mut cursor = ByteCursor::new(vec![0xAA; 5]);
        cursor.set_position(2).unwrap();

        assert!(cursor.write_f64(1.5).is_err());
        assert!(cursor.write_u32(7).is_err());
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.as_slice(), &[0xAA; 5]);
    }

    #[test]
    fn set_position_rejects_length_and_beyond() {
        let mut cursor = ByteCursor::new(vec![0u8; 4]);
        cursor.set_position(3).unwrap();
        assert_eq!(
            cursor.set_position(4),
            Err(CursorError::InvalidPosition {
                requested: 4,
                length: 4,
            })
        );
        assert!(cursor.set_position(100).is_err());
        assert_eq!(cursor.position(), 3);

        let mut empty = ByteCursor::new(Vec::new());
        assert!(empty.is_empty());
        assert!(empty.set_position(0).is_err());
        assert!(!empty.has_next());
    }

    #[test]
    fn read_to_end_reaches_length() {
        let mut cursor = ByteCursor::new(vec![0u8; 2]);
        cursor.read_u16().unwrap();
        assert_eq!(cursor.position(), cursor.len());
        assert_eq!(cursor.remaining(), 0);
        assert!(!cursor.has_next());
    }

    #[test]
    fn fixed_ascii() {
        let mut cursor = ByteCursor::new(b"Exif\0\0MM".to_vec());
        assert_eq!(cursor.read_fixed_ascii(6).unwrap(), "Exif\0\0");
        assert!(cursor.read_fixed_ascii(3).is_err());
        assert_eq!(cursor.position(), 6);
        assert_eq!(cursor.read_fixed_ascii(2).unwrap(), "MM");
    }

    #[test]
    fn ascii_masks_high_bit() {
        let mut cursor = ByteCursor::new(vec![0xC1, 0x42]);
        assert_eq!(cursor.read_fixed_ascii(2).unwrap(), "AB");
    }

    #[test]
    fn string_at_leaves_position_alone() {
        let mut cursor = ByteCursor::new(b"Exif\0\0II*\0".to_vec());
        cursor.set_position(2).unwrap();

        assert_eq!(cursor.read_string_at(6..8).unwrap(), "II");
        assert_eq!(cursor.read_string_at(0..0).unwrap(), "");
        assert_eq!(cursor.position(), 2);

        let mut masked = ByteCursor::new(vec![0xC9, 0xC9]);
        assert_eq!(masked.read_string_at(0..2).unwrap(), "II");
        masked.set_position(1).unwrap();
        assert_eq!(masked.position(), 1);
    }

    #[test]
    fn string_at_rejects_bad_ranges() {
        let cursor = ByteCursor::new(b"Exif".to_vec());

        #[allow(clippy::reversed_empty_ranges)]
        let inverted = cursor.read_string_at(3..1);
        assert_eq!(
            inverted,
            Err(CursorError::InvalidRange {
                start: 3,
                end: 1,
                length: 4,
            })
        );
        assert_eq!(
            cursor.read_string_at(2..5),
            Err(CursorError::InvalidRange {
                start: 2,
                end: 5,
                length: 4,
            })
        );
        assert_eq!(cursor.read_string_at(0..4).unwrap(), "Exif");
    }

    #[test]
    fn ascii_until_stops_on_delimiter() {
        let mut cursor = ByteCursor::new(b"Canon;EOS".to_vec());
        assert_eq!(cursor.read_ascii_until(';'), "Canon");
        assert_eq!(cursor.position(), 5);
        // The delimiter itself is not consumed.
        assert_eq!(cursor.read_ascii_until(';'), "");
        cursor.read_u8().unwrap();
        assert_eq!(cursor.read_ascii_until(';'), "EOS");
        assert!(!cursor.has_next());
        assert_eq!(cursor.read_ascii_until(';'), "");
    }
}
