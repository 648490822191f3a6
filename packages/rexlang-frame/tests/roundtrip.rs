//! Encoder output fed back through the decoder over differently chunked sources.

use rexlang_frame::{
    Decoder, EncodeError, Encoder, FrameEvent, MessageCollector, ReadStatus,
};
use std::io::{self, Read};

/// Returns at most `chunk` bytes per call.
struct Chunked<'a> {
    bytes: &'a [u8],
    chunk: usize,
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.bytes.len());
        buf[..n].copy_from_slice(&self.bytes[..n]);
        self.bytes = &self.bytes[n..];
        Ok(n)
    }
}

fn decode_all(bytes: &[u8], chunk: usize) -> Vec<FrameEvent> {
    let mut decoder = Decoder::new(Chunked { bytes, chunk });
    let mut events = Vec::new();
    decoder.drain(&mut events).unwrap();
    events
}

#[test]
fn message_delimiter_message() {
    let mut encoder = Encoder::new(Vec::new());
    encoder.append_u8(0x01).unwrap();
    encoder.write().unwrap();
    encoder.set_final(true);
    encoder.set_delimited(true);
    encoder.append_u8(0x02).unwrap();
    encoder.write().unwrap();
    let bytes = encoder.into_inner();
    assert_eq!(bytes, vec![0x01, 0x01, 0xC1, 0x02]);

    let expected = vec![
        FrameEvent::Data(vec![1]),
        FrameEvent::Delimiter,
        FrameEvent::Data(vec![2]),
        FrameEvent::Final,
    ];
    assert_eq!(decode_all(&bytes, 64), expected);
    assert_eq!(decode_all(&bytes, 1), expected);
}

#[test]
fn chunking_does_not_change_events() {
    let mut encoder = Encoder::new(Vec::new());
    let first: Vec<u8> = (0..=199).collect();
    encoder.append_buf(&first).unwrap();
    encoder.write().unwrap();
    encoder.set_delimited(true);
    encoder.write_message(b"status ok").unwrap();
    let bytes = encoder.into_inner();

    let whole = decode_all(&bytes, bytes.len());
    for chunk in [1, 2, 3, 7, 63, 64, 65] {
        assert_eq!(decode_all(&bytes, chunk), whole, "chunk {chunk}");
    }

    let mut collector = MessageCollector::new();
    let mut decoder = Decoder::new(&bytes[..]);
    decoder.drain(&mut collector).unwrap();
    assert!(collector.is_finished());
    assert_eq!(collector.take_messages(), vec![first, b"status ok".to_vec()]);
}

#[test]
fn empty_frames_and_zero_length_write() {
    let mut encoder = Encoder::new(Vec::new());
    assert!(matches!(encoder.write(), Err(EncodeError::ZeroLength)));
    encoder.set_delimited(true);
    encoder.write_zero().unwrap();
    encoder.set_final(true);
    encoder.set_delimited(true);
    encoder.write_zero().unwrap();
    let bytes = encoder.into_inner();
    assert_eq!(bytes, vec![0x40, 0xC0]);
    assert_eq!(
        decode_all(&bytes, 1),
        vec![FrameEvent::Delimiter, FrameEvent::Delimiter, FrameEvent::Final]
    );
}

#[test]
fn decoder_waits_for_more_bytes() {
    let mut decoder = Decoder::new(io::empty());
    let mut events: Vec<FrameEvent> = Vec::new();
    assert_eq!(decoder.read_frame_step(&mut events).unwrap(), ReadStatus::NoData);
    assert!(!decoder.in_frame());
}

#[test]
fn program_travels_as_one_message() {
    // A VM program carried host-to-device, as the request layer would send it.
    let program = [0x40, 0x3F, 0x80, 0x00, 0x2C, 0x6F, 0x00, 0x00];
    let mut encoder = Encoder::new(Vec::new());
    encoder.write_message(&program).unwrap();
    let bytes = encoder.into_inner();
    assert_eq!(bytes[0], 0x80 | program.len() as u8);

    let mut collector = MessageCollector::new();
    Decoder::new(Chunked { bytes: &bytes, chunk: 3 })
        .drain(&mut collector)
        .unwrap();
    assert_eq!(collector.take_messages(), vec![program.to_vec()]);
}
