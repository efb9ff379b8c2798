use crate::error::Result;

/// A blocking, serialized byte sink with a millisecond delay primitive.
///
/// Implementations must write each buffer completely before returning and
/// must not reorder writes. Delays block the caller for at least `ms`
/// milliseconds. Neither primitive retries on failure; errors surface to the
/// caller as-is.
pub trait SerialSink {
    /// Write every byte of `bytes` to the link.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32) -> Result<()>;
}

impl<S: SerialSink + ?Sized> SerialSink for &mut S {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_all(bytes)
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        (**self).delay_ms(ms)
    }
}

impl<S: SerialSink + ?Sized> SerialSink for Box<S> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_all(bytes)
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        (**self).delay_ms(ms)
    }
}
