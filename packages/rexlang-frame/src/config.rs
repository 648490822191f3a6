//! Frame layout constants.

/// Header byte plus the largest payload.
pub const MAX_FRAME_LEN: usize = 64;
pub const MAX_PAYLOAD_LEN: usize = MAX_FRAME_LEN - 1;

// Header bits
pub const FINAL_BIT: u8 = 0x80;
pub const DELIMITER_BIT: u8 = 0x40;
pub const LEN_MASK: u8 = 0x3F;
