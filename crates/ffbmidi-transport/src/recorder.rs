use std::io::ErrorKind;

use crate::error::{Result, TransportError};
use crate::traits::SerialSink;

/// One primitive observed by a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// A complete buffer handed to `write_all`.
    Write(Vec<u8>),
    /// A `delay_ms` call; no time actually elapses.
    Delay(u32),
}

/// In-memory sink that records every write and delay without touching
/// hardware or sleeping.
///
/// Can be armed to fail after a number of successful writes, which is how
/// failure propagation is exercised without a real link.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Vec<SinkEvent>,
    fail_after_writes: Option<usize>,
    writes: usize,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder whose write number `n + 1` (and every later one)
    /// fails with a broken-pipe error.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after_writes: Some(n),
            ..Self::default()
        }
    }

    /// Every event in call order.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// The buffers passed to `write_all`, in order.
    pub fn messages(&self) -> Vec<&[u8]> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Write(bytes) => Some(bytes.as_slice()),
                SinkEvent::Delay(_) => None,
            })
            .collect()
    }

    /// All written bytes concatenated, as they would appear on the wire.
    pub fn written(&self) -> Vec<u8> {
        self.messages().concat()
    }

    /// The delays requested, in order.
    pub fn delays(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Delay(ms) => Some(*ms),
                SinkEvent::Write(_) => None,
            })
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
        self.writes = 0;
    }
}

impl SerialSink for Recorder {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        if self.fail_after_writes.is_some_and(|limit| self.writes >= limit) {
            return Err(TransportError::Io(std::io::Error::new(
                ErrorKind::BrokenPipe,
                "recorder armed to fail",
            )));
        }
        self.writes += 1;
        self.events.push(SinkEvent::Write(bytes.to_vec()));
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.events.push(SinkEvent::Delay(ms));
        Ok(())
    }
}
