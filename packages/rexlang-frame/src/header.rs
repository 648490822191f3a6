//! The one-byte frame header: final bit, delimiter bit, 6-bit payload length.

use crate::config::{DELIMITER_BIT, FINAL_BIT, LEN_MASK};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHeader(u8);

impl FrameHeader {
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Header for a frame of `len` payload bytes; lengths above 63 are masked.
    #[must_use]
    pub const fn new(len: u8, is_final: bool, is_delimited: bool) -> Self {
        let mut byte = len & LEN_MASK;
        if is_final {
            byte |= FINAL_BIT;
        }
        if is_delimited {
            byte |= DELIMITER_BIT;
        }
        Self(byte)
    }

    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Payload length in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        (self.0 & LEN_MASK) as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn is_final(self) -> bool {
        self.0 & FINAL_BIT != 0
    }

    #[must_use]
    pub const fn is_delimited(self) -> bool {
        self.0 & DELIMITER_BIT != 0
    }

    pub(crate) fn set_flag(&mut self, bit: u8, on: bool) {
        if on {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        self.0 = (self.0 & !LEN_MASK) | (len as u8 & LEN_MASK);
    }
}
