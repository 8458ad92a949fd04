//! Fixed-width numeric values the cursor knows how to encode and decode.
//!
//! Every multi-byte type goes through `byteorder`, so the byte order is a
//! type parameter here and a runtime [`Endian`](super::Endian) value one
//! level up in [`ByteCursor`](super::ByteCursor).

use byteorder::{ByteOrder, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// A numeric type with a fixed on-wire width.
pub trait Primitive: Sized + Copy {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Decode one value from `reader` using byte order `B`.
    fn read_from<B: ByteOrder, R: Read>(reader: &mut R) -> io::Result<Self>;

    /// Encode `self` into `writer` using byte order `B`.
    fn write_to<B: ByteOrder, W: Write>(self, writer: &mut W) -> io::Result<()>;
}

// Single bytes have no byte order.
impl Primitive for u8 {
    const SIZE: usize = 1;

    fn read_from<B: ByteOrder, R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u8()
    }

    fn write_to<B: ByteOrder, W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self)
    }
}

impl Primitive for i8 {
    const SIZE: usize = 1;

    fn read_from<B: ByteOrder, R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_i8()
    }

    fn write_to<B: ByteOrder, W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_i8(self)
    }
}

macro_rules! impl_primitive {
    ($($ty:ty => $read:ident, $write:ident;)*) => {
        $(
            impl Primitive for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn read_from<B: ByteOrder, R: Read>(reader: &mut R) -> io::Result<Self> {
                    reader.$read::<B>()
                }

                fn write_to<B: ByteOrder, W: Write>(self, writer: &mut W) -> io::Result<()> {
                    writer.$write::<B>(self)
                }
            }
        )*
    };
}

impl_primitive! {
    u16 => read_u16, write_u16;
    i16 => read_i16, write_i16;
    u32 => read_u32, write_u32;
    i32 => read_i32, write_i32;
    u64 => read_u64, write_u64;
    i64 => read_i64, write_i64;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
}

#[cfg(test)]
mod tests {
    use super::Primitive;
    use byteorder::{BigEndian, LittleEndian};
    use std::io::Cursor;

    #[test]
    fn sizes_match_the_wire_width() {
        assert_eq!(<u8 as Primitive>::SIZE, 1);
        assert_eq!(<i16 as Primitive>::SIZE, 2);
        assert_eq!(<f32 as Primitive>::SIZE, 4);
        assert_eq!(<u64 as Primitive>::SIZE, 8);
    }

    #[test]
    fn byte_order_selects_significance() {
        let data = [0x87u8, 0x69];
        let be = u16::read_from::<BigEndian, _>(&mut Cursor::new(&data[..])).unwrap();
        let le = u16::read_from::<LittleEndian, _>(&mut Cursor::new(&data[..])).unwrap();
        assert_eq!(be, 0x8769);
        assert_eq!(le, 0x6987);
    }
}
