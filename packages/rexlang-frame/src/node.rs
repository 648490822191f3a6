use crate::consumer::FrameEvent;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::collections::VecDeque;

fn codec_error(e: impl std::fmt::Display) -> Error {
    Error::new(Status::GenericFailure, e.to_string())
}

#[napi(object)]
pub struct DecodedEvent {
    /// "data", "delimiter" or "final"
    pub kind: String,
    pub data: Option<Buffer>,
}

impl From<FrameEvent> for DecodedEvent {
    fn from(event: FrameEvent) -> Self {
        match event {
            FrameEvent::Data(bytes) => Self {
                kind: "data".to_string(),
                data: Some(Buffer::from(bytes)),
            },
            FrameEvent::Delimiter => Self {
                kind: "delimiter".to_string(),
                data: None,
            },
            FrameEvent::Final => Self {
                kind: "final".to_string(),
                data: None,
            },
        }
    }
}

/// Encoder writing into an internal buffer; `takeFrames` drains it.
#[napi]
pub struct FrameEncoder {
    inner: Encoder<Vec<u8>>,
}

#[napi]
impl FrameEncoder {
    #[napi(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Encoder::new(Vec::new()),
        }
    }

    #[napi]
    pub fn append(&mut self, data: Buffer) -> Result<()> {
        self.inner.append_buf(data.as_ref()).map_err(codec_error)
    }

    #[napi]
    pub fn set_final(&mut self, is_final: bool) {
        self.inner.set_final(is_final);
    }

    #[napi]
    pub fn set_delimited(&mut self, is_delimited: bool) {
        self.inner.set_delimited(is_delimited);
    }

    #[napi]
    pub fn write(&mut self) -> Result<()> {
        self.inner.write().map_err(codec_error)
    }

    #[napi]
    pub fn write_zero(&mut self) -> Result<()> {
        self.inner.write_zero().map_err(codec_error)
    }

    #[napi]
    pub fn write_message(&mut self, payload: Buffer) -> Result<()> {
        self.inner.write_message(payload.as_ref()).map_err(codec_error)
    }

    #[napi]
    pub fn take_frames(&mut self) -> Buffer {
        Buffer::from(std::mem::take(self.inner.get_mut()))
    }
}

/// Decoder over bytes pushed in with `feed`.
#[napi]
pub struct FrameDecoder {
    inner: Decoder<VecDeque<u8>>,
}

#[napi]
impl FrameDecoder {
    #[napi(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Decoder::new(VecDeque::new()),
        }
    }

    #[napi]
    pub fn feed(&mut self, bytes: Buffer) {
        self.inner.get_mut().extend(bytes.as_ref());
    }

    /// Decode every complete frame fed so far.
    #[napi]
    pub fn drain(&mut self) -> Result<Vec<DecodedEvent>> {
        let mut events: Vec<FrameEvent> = Vec::new();
        self.inner.drain(&mut events).map_err(codec_error)?;
        Ok(events.into_iter().map(DecodedEvent::from).collect())
    }

    #[napi]
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}
