//! 64-byte framing for byte-oriented links with partial reads.
//!
//! Each frame is one header byte (final bit, delimiter bit, 6-bit length)
//! followed by up to 63 payload bytes. The [`Encoder`] writes frames to any
//! [`std::io::Write`]; the [`Decoder`] pulls them from any [`std::io::Read`],
//! tolerating short and empty reads, and reports each complete frame to a
//! [`FrameConsumer`].

pub mod config;
pub mod consumer;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod header;

#[cfg(feature = "node")]
mod node;

pub use consumer::{FrameConsumer, FrameEvent, MessageCollector};
pub use decoder::{Decoder, ReadStatus};
pub use encoder::Encoder;
pub use error::{DecodeError, EncodeError};
pub use header::FrameHeader;
