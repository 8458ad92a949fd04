use std::fmt;

use super::error::DecodeError;
use crate::cursor::Endian;

/// JPEG start-of-image marker.
pub const JPEG_MAGIC: u16 = 0xFFD8;

/// APP1 marker byte; the segment that carries EXIF data.
pub const EXIF_MARKER: u8 = 0xE1;

/// ExifIFDPointer tag id, scanned for at any byte alignment.
pub const IFD_MARKER: u16 = 0x8769;

/// Tag ids of entries found in the EXIF directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
    ExifVersion,
    FlashpixVersion,
    ColorSpace,
}

impl TagId {
    pub const ALL: [TagId; 3] = [TagId::ExifVersion, TagId::FlashpixVersion, TagId::ColorSpace];

    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x9000 => Some(TagId::ExifVersion),
            0xA000 => Some(TagId::FlashpixVersion),
            0xA001 => Some(TagId::ColorSpace),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            TagId::ExifVersion => 0x9000,
            TagId::FlashpixVersion => 0xA000,
            TagId::ColorSpace => 0xA001,
        }
    }
}

/// Literal that opens the APP1 payload.
pub const EXIF_HEADER: &str = "Exif\0\0";

/// TIFF byte order tokens.
pub const BIG_ENDIAN_TOKEN: &str = "MM";
pub const LITTLE_ENDIAN_TOKEN: &str = "II";

/// Decoding stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    MagicCheck,
    MarkerScan,
    SegmentLengthSkip,
    ExifHeaderValidate,
    EndianDetect,
    IfdMarkerScan,
    DirectoryHeaderRead,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::MagicCheck,
        Stage::MarkerScan,
        Stage::SegmentLengthSkip,
        Stage::ExifHeaderValidate,
        Stage::EndianDetect,
        Stage::IfdMarkerScan,
        Stage::DirectoryHeaderRead,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::MagicCheck => "magic check",
            Stage::MarkerScan => "APP1 marker scan",
            Stage::SegmentLengthSkip => "segment length",
            Stage::ExifHeaderValidate => "Exif header",
            Stage::EndianDetect => "byte order detection",
            Stage::IfdMarkerScan => "IFD marker scan",
            Stage::DirectoryHeaderRead => "directory header",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A non-fatal mismatch. Decoding continues past it unless running strict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The stream does not open with `0xFFD8`.
    NotJpeg { magic: u16 },
    /// The APP1 payload does not start with `"Exif\0\0"`.
    BadExifHeader { found: String },
    /// The TIFF byte order token is neither `"II"` nor `"MM"`.
    UnknownByteOrder { token: String, kept: Endian },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NotJpeg { magic } => {
                write!(f, "magic 0x{magic:04X} is not a JPEG start-of-image (0x{JPEG_MAGIC:04X})")
            }
            Warning::BadExifHeader { found } => {
                write!(f, "expected {EXIF_HEADER:?} header, found {found:?}")
            }
            Warning::UnknownByteOrder { token, kept } => {
                write!(f, "unknown byte order token {token:?}, keeping {kept}")
            }
        }
    }
}

/// Result of running one stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    Ok,
    Warn(Warning),
    Fail(DecodeError),
}

/// One executed stage and what came of it.
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
}

/// Header of the image file directory reached after the IFD marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryHeader {
    /// Offset or length field following the marker (4 bytes).
    pub offset_or_length: u32,
    /// Number of directory entries (2 bytes).
    pub entry_count: u16,
}

/// Everything a successful decode found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExifFindings {
    /// First two bytes of the stream, read big-endian.
    pub magic: u16,
    /// Offset of the APP1 marker byte.
    pub exif_marker_offset: usize,
    /// APP1 segment length field as read.
    pub segment_length: u16,
    /// Whether the payload opened with `"Exif\0\0"`.
    pub exif_header_valid: bool,
    /// Byte order named by the TIFF header, if the token was recognised.
    pub detected_byte_order: Option<Endian>,
    /// Byte order used for the directory header.
    pub byte_order: Endian,
    /// Offset of the first byte of the IFD marker.
    pub ifd_marker_offset: usize,
    pub directory: DirectoryHeader,
    pub warnings: Vec<Warning>,
}

impl ExifFindings {
    pub fn is_jpeg(&self) -> bool {
        self.magic == JPEG_MAGIC
    }
}
