use thiserror::Error;

use super::structures::{Stage, Warning};
use crate::cursor::CursorError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("{stage} failed: truncated input")]
    Bounds {
        stage: Stage,
        #[source]
        source: CursorError,
    },
    #[error("{} failed: no APP1 marker (0x{marker:02X}) found before end of buffer", Stage::MarkerScan)]
    MissingExifMarker { marker: u8 },
    #[error(
        "{} failed: no IFD marker (0x{marker:04X}) found after offset {searched_from}",
        Stage::IfdMarkerScan
    )]
    MissingIfdMarker { marker: u16, searched_from: usize },
    #[error("{stage} failed: rejected in strict mode: {warning}")]
    Rejected { stage: Stage, warning: Warning },
}

impl DecodeError {
    /// Stage the decode stopped at.
    pub fn stage(&self) -> Stage {
        match self {
            DecodeError::Bounds { stage, .. } | DecodeError::Rejected { stage, .. } => *stage,
            DecodeError::MissingExifMarker { .. } => Stage::MarkerScan,
            DecodeError::MissingIfdMarker { .. } => Stage::IfdMarkerScan,
        }
    }

    /// True for errors caused by malformed or missing markers rather than
    /// running off the end of the buffer.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, DecodeError::Bounds { .. })
    }
}
