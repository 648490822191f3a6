//! Receivers for decoded frame events.

use serde::{Deserialize, Serialize};
use std::io;

/// Callbacks fired for each complete frame, in the order `delimiter`,
/// `data` (only for non-empty payloads), `final_frame`.
pub trait FrameConsumer {
    fn data(&mut self, payload: &[u8]) -> io::Result<()>;
    fn delimiter(&mut self) -> io::Result<()>;
    fn final_frame(&mut self) -> io::Result<()>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum FrameEvent {
    Data(Vec<u8>),
    Delimiter,
    Final,
}

/// Records every event.
impl FrameConsumer for Vec<FrameEvent> {
    fn data(&mut self, payload: &[u8]) -> io::Result<()> {
        self.push(FrameEvent::Data(payload.to_vec()));
        Ok(())
    }

    fn delimiter(&mut self) -> io::Result<()> {
        self.push(FrameEvent::Delimiter);
        Ok(())
    }

    fn final_frame(&mut self) -> io::Result<()> {
        self.push(FrameEvent::Final);
        Ok(())
    }
}

/// Reassembles delimiter-separated messages.
///
/// Payload accumulates into the current message; a delimiter closes it and
/// starts the next; a final frame closes it and marks the stream finished.
/// Empty messages are not recorded.
#[derive(Clone, Debug, Default)]
pub struct MessageCollector {
    current: Vec<u8>,
    messages: Vec<Vec<u8>>,
    finished: bool,
}

impl MessageCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn close_current(&mut self) {
        if !self.current.is_empty() {
            self.messages.push(std::mem::take(&mut self.current));
        }
    }

    /// True once a final frame has been seen.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Bytes of the message still being received.
    #[must_use]
    pub fn partial(&self) -> &[u8] {
        &self.current
    }

    /// Completed messages, oldest first, leaving none behind.
    pub fn take_messages(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.messages)
    }
}

impl FrameConsumer for MessageCollector {
    fn data(&mut self, payload: &[u8]) -> io::Result<()> {
        self.current.extend_from_slice(payload);
        Ok(())
    }

    fn delimiter(&mut self) -> io::Result<()> {
        self.close_current();
        Ok(())
    }

    fn final_frame(&mut self) -> io::Result<()> {
        self.close_current();
        self.finished = true;
        Ok(())
    }
}
