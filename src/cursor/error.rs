use thiserror::Error;

/// Raised when a cursor operation would step outside its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("out of bounds: need {needed} bytes at position {position}, buffer holds {length}")]
    OutOfBounds {
        position: usize,
        needed: usize,
        length: usize,
    },
    #[error("invalid position {requested}: must be below buffer length {length}")]
    InvalidPosition { requested: usize, length: usize },
    #[error("invalid range {start}..{end} for buffer of length {length}")]
    InvalidRange {
        start: usize,
        end: usize,
        length: usize,
    },
}
