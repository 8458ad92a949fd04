//! # xiff
//!
//! Locate the EXIF block of a JPEG image and read its directory header.
//!
//! The crate has two layers:
//!
//! - [`ByteCursor`]: a random-access cursor over an owned byte buffer with
//!   endian-aware reads and writes of every fixed-width numeric type.
//! - [`ExifDecoder`]: a fixed sequence of stages that walks a JPEG stream to
//!   the APP1 segment, detects the TIFF byte order, finds the EXIF IFD marker
//!   at any byte alignment and reads the directory header behind it.
//!
//! Acquisition ([`io`]) is the only asynchronous part: bytes are fetched from
//! a local file or an HTTP(S) URL into memory, then decoded synchronously.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use xiff::{ExifDecoder, ByteCursor, LocalFileReader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reader = LocalFileReader::new(Path::new("photo.jpg"))?;
//!     let bytes = xiff::io::load(&reader, None).await?;
//!
//!     let mut decoder = ExifDecoder::new(ByteCursor::new(bytes));
//!     let findings = decoder.decode()?;
//!     println!(
//!         "{} entries, {}",
//!         findings.directory.entry_count, findings.byte_order
//!     );
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod cursor;
pub mod exif;
pub mod io;

pub use cli::Cli;
pub use cursor::{ByteCursor, CursorError, Endian, Primitive};
pub use exif::{
    DecodeError, DecodeOptions, DirectoryHeader, ExifDecoder, ExifFindings, Stage, StageOutcome,
    StageReport, TagId, Warning, decode, decode_with,
};
pub use io::{HttpReader, LocalFileReader, MemoryReader, ReadAt};
