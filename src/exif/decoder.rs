//! Stage-by-stage walk from the JPEG start-of-image to the EXIF directory
//! header.
//!
//! ## Stages
//!
//! 1. Magic check: `0xFFD8`, soft.
//! 2. APP1 marker scan: first `0xE1` byte, hard.
//! 3. Segment length: two bytes, discarded.
//! 4. Exif header: `"Exif\0\0"`, soft.
//! 5. Byte order detection: `"II"` or `"MM"`, soft. Unknown tokens keep
//!    big-endian.
//! 6. IFD marker scan: `0x87 0x69` at any byte alignment, hard.
//! 7. Directory header: `u32` offset/length then `u16` entry count, in the
//!    detected byte order.
//!
//! Soft stages report a [`Warning`] and let decoding continue; with
//! [`DecodeOptions::strict`] they fail instead. Running off the end of the
//! buffer inside any stage is a [`DecodeError::Bounds`].

use log::{debug, info, warn};

use super::error::DecodeError;
use super::structures::*;
use crate::cursor::{ByteCursor, CursorError, Endian};

/// Knobs for a single decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Treat every soft mismatch as a hard failure.
    pub strict: bool,
}

/// Values collected while the stages run.
#[derive(Debug, Default)]
struct Progress {
    magic: u16,
    exif_marker_offset: usize,
    segment_length: u16,
    exif_header_valid: bool,
    detected_byte_order: Option<Endian>,
    ifd_marker_offset: usize,
    directory: DirectoryHeader,
    warnings: Vec<Warning>,
}

/// EXIF locator over an exclusively owned [`ByteCursor`].
///
/// Each decoder walks one buffer once; decode another image with another
/// decoder.
///
/// ## Example
///
/// ```
/// use xiff::{ByteCursor, Endian, ExifDecoder};
///
/// let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x20];
/// jpeg.extend_from_slice(b"Exif\0\0II");
/// jpeg.extend_from_slice(&[0x87, 0x69, 0x1A, 0x00, 0x00, 0x00, 0x03, 0x00]);
///
/// let mut decoder = ExifDecoder::new(ByteCursor::new(jpeg));
/// let findings = decoder.decode()?;
/// assert_eq!(findings.byte_order, Endian::Little);
/// assert_eq!(findings.directory.entry_count, 3);
/// # Ok::<(), xiff::DecodeError>(())
/// ```
pub struct ExifDecoder {
    cursor: ByteCursor,
    options: DecodeOptions,
    reports: Vec<StageReport>,
    progress: Progress,
}

impl ExifDecoder {
    pub fn new(cursor: ByteCursor) -> Self {
        Self::with_options(cursor, DecodeOptions::default())
    }

    /// The JPEG container is big-endian, so the cursor is switched to
    /// [`Endian::Big`] here regardless of its previous setting.
    pub fn with_options(mut cursor: ByteCursor, options: DecodeOptions) -> Self {
        cursor.set_endian(Endian::Big);
        Self {
            cursor,
            options,
            reports: Vec::with_capacity(Stage::ALL.len()),
            progress: Progress::default(),
        }
    }

    /// Stages executed so far, including the one that failed, if any.
    pub fn reports(&self) -> &[StageReport] {
        &self.reports
    }

    pub fn cursor(&self) -> &ByteCursor {
        &self.cursor
    }

    pub fn into_cursor(self) -> ByteCursor {
        self.cursor
    }

    /// Run every stage in order, stopping at the first hard failure.
    pub fn decode(&mut self) -> Result<ExifFindings, DecodeError> {
        for stage in Stage::ALL {
            debug!("{stage}: starting at offset {}", self.cursor.position());

            let outcome = match self.run_stage(stage) {
                Ok(StageOutcome::Warn(warning)) if self.options.strict => {
                    StageOutcome::Fail(DecodeError::Rejected { stage, warning })
                }
                Ok(outcome) => outcome,
                Err(source) => StageOutcome::Fail(DecodeError::Bounds { stage, source }),
            };

            self.reports.push(StageReport {
                stage,
                outcome: outcome.clone(),
            });

            match outcome {
                StageOutcome::Ok => {}
                StageOutcome::Warn(warning) => {
                    warn!("{stage}: {warning}");
                    self.progress.warnings.push(warning);
                }
                StageOutcome::Fail(err) => {
                    debug!("{stage}: failed: {err}");
                    return Err(err);
                }
            }
        }

        Ok(self.findings())
    }

    fn run_stage(&mut self, stage: Stage) -> Result<StageOutcome, CursorError> {
        match stage {
            Stage::MagicCheck => self.check_magic(),
            Stage::MarkerScan => self.scan_exif_marker(),
            Stage::SegmentLengthSkip => self.skip_segment_length(),
            Stage::ExifHeaderValidate => self.validate_exif_header(),
            Stage::EndianDetect => self.detect_endian(),
            Stage::IfdMarkerScan => self.scan_ifd_marker(),
            Stage::DirectoryHeaderRead => self.read_directory_header(),
        }
    }

    fn check_magic(&mut self) -> Result<StageOutcome, CursorError> {
        let magic = self.cursor.read_u16()?;
        self.progress.magic = magic;

        if magic != JPEG_MAGIC {
            return Ok(StageOutcome::Warn(Warning::NotJpeg { magic }));
        }
        info!("found JPEG start-of-image");
        Ok(StageOutcome::Ok)
    }

    fn scan_exif_marker(&mut self) -> Result<StageOutcome, CursorError> {
        while self.cursor.has_next() {
            let offset = self.cursor.position();
            if self.cursor.read_u8()? == EXIF_MARKER {
                info!("found APP1 marker at offset {offset}");
                self.progress.exif_marker_offset = offset;
                return Ok(StageOutcome::Ok);
            }
        }

        Ok(StageOutcome::Fail(DecodeError::MissingExifMarker {
            marker: EXIF_MARKER,
        }))
    }

    fn skip_segment_length(&mut self) -> Result<StageOutcome, CursorError> {
        self.progress.segment_length = self.cursor.read_u16()?;
        Ok(StageOutcome::Ok)
    }

    fn validate_exif_header(&mut self) -> Result<StageOutcome, CursorError> {
        let header = self.cursor.read_fixed_ascii(EXIF_HEADER.len())?;
        self.progress.exif_header_valid = header == EXIF_HEADER;

        if !self.progress.exif_header_valid {
            return Ok(StageOutcome::Warn(Warning::BadExifHeader { found: header }));
        }
        Ok(StageOutcome::Ok)
    }

    fn detect_endian(&mut self) -> Result<StageOutcome, CursorError> {
        let token = self.cursor.read_fixed_ascii(2)?;
        let endian = match token.as_str() {
            BIG_ENDIAN_TOKEN => Endian::Big,
            LITTLE_ENDIAN_TOKEN => Endian::Little,
            _ => {
                return Ok(StageOutcome::Warn(Warning::UnknownByteOrder {
                    token,
                    kept: self.cursor.endian(),
                }));
            }
        };

        info!("TIFF header is {endian}");
        self.cursor.set_endian(endian);
        self.progress.detected_byte_order = Some(endian);
        Ok(StageOutcome::Ok)
    }

    /// Slide a two-byte window one byte at a time, so the marker is found
    /// whatever its alignment. The window is always combined big-endian.
    fn scan_ifd_marker(&mut self) -> Result<StageOutcome, CursorError> {
        let searched_from = self.cursor.position();

        while self.cursor.remaining() >= 2 {
            let offset = self.cursor.position();
            let high = self.cursor.read_u8()?;
            let low = self.cursor.read_u8()?;

            if (u16::from(high) << 8) | u16::from(low) == IFD_MARKER {
                info!("found IFD marker at offset {offset}");
                self.progress.ifd_marker_offset = offset;
                return Ok(StageOutcome::Ok);
            }
            self.cursor.set_position(offset + 1)?;
        }

        Ok(StageOutcome::Fail(DecodeError::MissingIfdMarker {
            marker: IFD_MARKER,
            searched_from,
        }))
    }

    fn read_directory_header(&mut self) -> Result<StageOutcome, CursorError> {
        let offset_or_length = self.cursor.read_u32()?;
        let entry_count = self.cursor.read_u16()?;
        debug!("directory header: offset/length {offset_or_length}, {entry_count} entries");

        self.progress.directory = DirectoryHeader {
            offset_or_length,
            entry_count,
        };
        Ok(StageOutcome::Ok)
    }

    fn findings(&self) -> ExifFindings {
        let progress = &self.progress;
        ExifFindings {
            magic: progress.magic,
            exif_marker_offset: progress.exif_marker_offset,
            segment_length: progress.segment_length,
            exif_header_valid: progress.exif_header_valid,
            detected_byte_order: progress.detected_byte_order,
            byte_order: self.cursor.endian(),
            ifd_marker_offset: progress.ifd_marker_offset,
            directory: progress.directory,
            warnings: progress.warnings.clone(),
        }
    }
}

/// Decode `bytes` with default options.
pub fn decode(bytes: impl Into<Box<[u8]>>) -> Result<ExifFindings, DecodeError> {
    decode_with(bytes, DecodeOptions::default())
}

pub fn decode_with(
    bytes: impl Into<Box<[u8]>>,
    options: DecodeOptions,
) -> Result<ExifFindings, DecodeError> {
    ExifDecoder::with_options(ByteCursor::new(bytes), options).decode()
}
