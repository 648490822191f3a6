use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    /// `write()` on a frame with no payload; use `write_zero()` for empty frames.
    #[error("frame has no payload")]
    ZeroLength,
    #[error("frame write failed: {0}")]
    Io(#[from] io::Error),
    /// An auto-flush inside `append_buf` failed after `accepted` input bytes
    /// were taken. The full frame stays buffered for the next flush.
    #[error("frame write failed after {accepted} bytes were accepted: {source}")]
    Partial {
        accepted: usize,
        #[source]
        source: io::Error,
    },
}

impl EncodeError {
    pub(crate) fn accepted(self, accepted: usize) -> Self {
        match self {
            Self::Io(source) => Self::Partial { accepted, source },
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("reader returned {got} bytes for a {requested}-byte read")]
    ReadTooMuch { requested: usize, got: usize },
    #[error("frame read failed: {0}")]
    Io(#[from] io::Error),
    #[error("frame consumer failed: {0}")]
    Consumer(#[source] io::Error),
}
