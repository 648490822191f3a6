//! Frame encoder. Buffers one frame at a time and writes it to the sink when
//! it fills, or when the caller flushes it.

use crate::config::{DELIMITER_BIT, FINAL_BIT, MAX_FRAME_LEN};
use crate::error::EncodeError;
use crate::header::FrameHeader;
use std::io::Write;

pub struct Encoder<W> {
    frame: [u8; MAX_FRAME_LEN],
    /// Next free byte in `frame`; 1 means no payload yet.
    index: usize,
    header: FrameHeader,
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            frame: [0; MAX_FRAME_LEN],
            index: 1,
            header: FrameHeader::default(),
            writer,
        }
    }

    /// Drop the in-progress frame, payload and header bits alike.
    pub fn reset(&mut self) {
        self.index = 1;
        self.header = FrameHeader::default();
    }

    /// Mark the next flushed frame as the last of the stream.
    pub fn set_final(&mut self, is_final: bool) {
        self.header.set_flag(FINAL_BIT, is_final);
    }

    /// Mark the next flushed frame as starting a new message.
    pub fn set_delimited(&mut self, is_delimited: bool) {
        self.header.set_flag(DELIMITER_BIT, is_delimited);
    }

    /// Payload bytes buffered in the in-progress frame.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.index - 1
    }

    pub fn append_u8(&mut self, byte: u8) -> Result<(), EncodeError> {
        if self.index == MAX_FRAME_LEN {
            // a previous auto-flush failed; retry before taking more
            self.flush()?;
        }
        self.frame[self.index] = byte;
        self.index += 1;
        self.flush_if_full()
    }

    /// Append `bytes`, flushing each frame as it fills.
    ///
    /// If a flush fails the error is `Partial` and carries how many bytes of
    /// `bytes` were taken. Resume with `append_buf(&bytes[accepted..])`; the
    /// retained full frame goes out first.
    pub fn append_buf(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        let mut accepted = 0;
        while accepted < bytes.len() {
            if self.index == MAX_FRAME_LEN {
                self.flush().map_err(|e| e.accepted(accepted))?;
            }
            let n = (MAX_FRAME_LEN - self.index).min(bytes.len() - accepted);
            self.frame[self.index..self.index + n]
                .copy_from_slice(&bytes[accepted..accepted + n]);
            self.index += n;
            accepted += n;
            self.flush_if_full().map_err(|e| e.accepted(accepted))?;
        }
        Ok(())
    }

    fn flush_if_full(&mut self) -> Result<(), EncodeError> {
        if self.index == MAX_FRAME_LEN {
            self.flush()
        } else {
            Ok(())
        }
    }

    /// Flush the in-progress frame. Fails with `ZeroLength` if it has no payload.
    pub fn write(&mut self) -> Result<(), EncodeError> {
        if self.pending() == 0 {
            return Err(EncodeError::ZeroLength);
        }
        self.flush()
    }

    /// Flush the in-progress frame even if it has no payload.
    pub fn write_zero(&mut self) -> Result<(), EncodeError> {
        self.flush()
    }

    /// Append `payload` and end the stream: the frame carrying the last
    /// payload bytes (or an empty frame) gets the final bit.
    pub fn write_message(&mut self, payload: &[u8]) -> Result<(), EncodeError> {
        self.append_buf(payload)?;
        self.set_final(true);
        self.write_zero()
    }

    fn flush(&mut self) -> Result<(), EncodeError> {
        let len = self.pending();
        self.header.set_len(len);
        self.frame[0] = self.header.to_byte();
        self.writer.write_all(&self.frame[..self.index])?;
        tracing::trace!(
            len,
            is_final = self.header.is_final(),
            is_delimited = self.header.is_delimited(),
            "frame flushed"
        );
        self.reset();
        Ok(())
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Give back the sink. A partially built frame is discarded.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_frame_of_62_bytes() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.append_buf(&[0xAA; 62]).unwrap();
        encoder.set_final(true);
        encoder.write().unwrap();
        let out = encoder.into_inner();
        assert_eq!(out.len(), 63);
        assert_eq!(out[0], 0xBE);
    }

    #[test]
    fn auto_flush_at_63_keeps_sticky_bits() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.set_final(true);
        encoder.append_buf(&[0x55; 63]).unwrap();
        assert_eq!(encoder.pending(), 0);
        assert_eq!(encoder.get_ref()[0], 0xBF);
        assert_eq!(encoder.get_ref().len(), 64);
        // bits were cleared by the flush
        encoder.write_zero().unwrap();
        assert_eq!(encoder.get_ref()[64], 0x00);
    }

    #[test]
    fn write_requires_payload() {
        let mut encoder = Encoder::new(Vec::new());
        assert!(matches!(encoder.write(), Err(EncodeError::ZeroLength)));
        encoder.write_zero().unwrap();
        assert_eq!(encoder.into_inner(), vec![0x00]);
    }

    #[test]
    fn repeated_empty_frames_are_bare_headers() {
        let mut encoder = Encoder::new(Vec::new());
        for _ in 0..64 {
            encoder.write_zero().unwrap();
        }
        assert_eq!(encoder.into_inner(), vec![0u8; 64]);
    }

    #[test]
    fn reset_discards_frame() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.set_delimited(true);
        encoder.append_u8(1).unwrap();
        encoder.reset();
        encoder.append_u8(2).unwrap();
        encoder.write().unwrap();
        assert_eq!(encoder.into_inner(), vec![0x01, 0x02]);
    }

    #[test]
    fn message_spanning_frames_marks_only_last_final() {
        let payload: Vec<u8> = (0..70).collect();
        let mut encoder = Encoder::new(Vec::new());
        encoder.write_message(&payload).unwrap();
        let out = encoder.into_inner();
        assert_eq!(out[0], 0x3F);
        assert_eq!(out[64], 0x80 | 7);
        assert_eq!(&out[65..], &payload[63..]);
    }

    struct FailingSink {
        fail: bool,
        written: Vec<u8>,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.fail {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "down"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn io_error_keeps_frame_for_retry() {
        let mut encoder = Encoder::new(FailingSink {
            fail: true,
            written: Vec::new(),
        });
        encoder.append_buf(&[1, 2, 3]).unwrap();
        assert!(matches!(encoder.write(), Err(EncodeError::Io(_))));
        assert_eq!(encoder.pending(), 3);
        encoder.get_mut().fail = false;
        encoder.write().unwrap();
        assert_eq!(encoder.into_inner().written, vec![0x03, 1, 2, 3]);
    }

    #[test]
    fn failed_auto_flush_reports_accepted_bytes() {
        let payload: Vec<u8> = (0..70).collect();
        let mut encoder = Encoder::new(FailingSink {
            fail: true,
            written: Vec::new(),
        });
        let accepted = match encoder.append_buf(&payload) {
            Err(EncodeError::Partial { accepted, .. }) => accepted,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(accepted, 63);
        assert_eq!(encoder.pending(), 63);

        encoder.get_mut().fail = false;
        encoder.append_buf(&payload[accepted..]).unwrap();
        encoder.write().unwrap();
        let written = encoder.into_inner().written;
        assert_eq!(written.len(), 64 + 1 + 7);
        assert_eq!(written[0], 0x3F);
        assert_eq!(&written[1..64], &payload[..63]);
        assert_eq!(written[64], 0x07);
        assert_eq!(&written[65..], &payload[63..]);
    }
}
