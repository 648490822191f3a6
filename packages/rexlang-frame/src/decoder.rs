//! Frame decoder. Pulls frames from a byte source that may return short or
//! empty reads, and reports each complete frame to a `FrameConsumer`.

use crate::config::MAX_FRAME_LEN;
use crate::consumer::FrameConsumer;
use crate::error::DecodeError;
use crate::header::FrameHeader;
use std::io::{self, ErrorKind, Read};

/// Outcome of one `read_frame_step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadStatus {
    /// The source had nothing to give; decoder state is unchanged.
    NoData,
    /// Bytes were consumed but the frame is not complete yet.
    Partial,
    /// A frame was delivered to the consumer.
    Complete(FrameHeader),
}

pub struct Decoder<R> {
    frame: [u8; MAX_FRAME_LEN],
    /// Bytes of the current frame received so far, header included.
    index: usize,
    reader: R,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            frame: [0; MAX_FRAME_LEN],
            index: 0,
            reader,
        }
    }

    /// Forget any partially received frame.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// True while a frame is partially received.
    #[must_use]
    pub fn in_frame(&self) -> bool {
        self.index > 0
    }

    /// Make progress on the current frame.
    ///
    /// With no header buffered, reads exactly one byte and, if that yields a
    /// header, carries on into the payload in the same call. Once the payload
    /// is complete the consumer sees the frame and the decoder resets.
    ///
    /// A call that reads a header byte but no payload bytes returns
    /// `Partial`, not `NoData`; `NoData` means this call consumed nothing.
    pub fn read_frame_step<C>(&mut self, consumer: &mut C) -> Result<ReadStatus, DecodeError>
    where
        C: FrameConsumer + ?Sized,
    {
        let mut progressed = false;
        if self.index == 0 {
            if self.fill(0, 1)? == 0 {
                return Ok(ReadStatus::NoData);
            }
            self.index = 1;
            progressed = true;
        }

        let header = FrameHeader::from_byte(self.frame[0]);
        let end = 1 + header.len();
        if self.index < end {
            let n = self.fill(self.index, end)?;
            if n == 0 {
                return Ok(if progressed {
                    ReadStatus::Partial
                } else {
                    ReadStatus::NoData
                });
            }
            self.index += n;
            if self.index < end {
                return Ok(ReadStatus::Partial);
            }
        }

        let delivered = deliver(header, &self.frame[1..end], consumer);
        self.reset();
        tracing::trace!(
            len = header.len(),
            is_final = header.is_final(),
            is_delimited = header.is_delimited(),
            "frame decoded"
        );
        delivered
            .map(|()| ReadStatus::Complete(header))
            .map_err(DecodeError::Consumer)
    }

    /// Step until the source runs dry. Returns the number of frames delivered.
    pub fn drain<C>(&mut self, consumer: &mut C) -> Result<usize, DecodeError>
    where
        C: FrameConsumer + ?Sized,
    {
        let mut frames = 0;
        loop {
            match self.read_frame_step(consumer)? {
                ReadStatus::NoData => return Ok(frames),
                ReadStatus::Partial => {}
                ReadStatus::Complete(_) => frames += 1,
            }
        }
    }

    /// Read into `frame[start..end]`. Zero means nothing available.
    fn fill(&mut self, start: usize, end: usize) -> Result<usize, DecodeError> {
        let requested = end - start;
        loop {
            match self.reader.read(&mut self.frame[start..end]) {
                Ok(got) if got > requested => {
                    return Err(DecodeError::ReadTooMuch { requested, got });
                }
                Ok(got) => return Ok(got),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(0),
                Err(e) => return Err(DecodeError::Io(e)),
            }
        }
    }

    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

fn deliver<C>(header: FrameHeader, payload: &[u8], consumer: &mut C) -> io::Result<()>
where
    C: FrameConsumer + ?Sized,
{
    if header.is_delimited() {
        consumer.delimiter()?;
    }
    if !payload.is_empty() {
        consumer.data(payload)?;
    }
    if header.is_final() {
        consumer.final_frame()?;
    }
    Ok(())
}
