use ffbmidi_transport::SerialSink;
use tracing::{debug, trace};

use crate::codec::{Frame, Sequence, Step};
use crate::error::Result;

/// Writes complete frames and sequences to a [`SerialSink`].
///
/// Frames are fully encoded before they reach the writer, so a failing sink
/// never sees a partial message from this layer.
pub struct FrameWriter<S> {
    inner: S,
}

impl<S: SerialSink> FrameWriter<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Write one frame (blocking).
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.inner.write_all(frame.as_bytes())?;
        debug!(kind = frame.kind().name(), len = frame.len(), "frame written");
        trace!(bytes = %frame, "frame bytes");
        Ok(())
    }

    /// Play a sequence in order, honoring every delay.
    ///
    /// Stops at the first sink failure; later steps are not attempted.
    pub fn play(&mut self, sequence: &Sequence) -> Result<()> {
        for step in sequence.steps() {
            match step {
                Step::Send(frame) => self.write_frame(frame)?,
                Step::Delay(ms) => {
                    self.inner.delay_ms(*ms)?;
                    debug!(ms = *ms, "delay elapsed");
                }
            }
        }
        Ok(())
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Mutably borrow the underlying sink.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> std::fmt::Debug for FrameWriter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameWriter").finish_non_exhaustive()
    }
}
