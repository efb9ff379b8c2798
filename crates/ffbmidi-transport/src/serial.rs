use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, info, trace};

use crate::error::{Result, TransportError};
use crate::traits::SerialSink;

/// MIDI line rate.
pub const DEFAULT_BAUD: u32 = 31_250;

/// Upper bound on a single blocked write before it fails with `TimedOut`.
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(1);

/// Sink over an opened serial port.
pub type SerialPortSink = BlockingSerial<Box<dyn SerialPort>>;

/// Blocking serial sink over any `Write` stream.
///
/// Each `write_all` pushes the whole buffer and flushes before returning, so
/// the device sees complete messages in call order. Delays use
/// `std::thread::sleep`.
pub struct BlockingSerial<W> {
    inner: W,
    path: Option<PathBuf>,
}

impl<W: Write> BlockingSerial<W> {
    /// Wrap an already-open stream.
    pub fn new(inner: W) -> Self {
        Self { inner, path: None }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the sink and return the inner stream.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Device path this sink was opened from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
    }
}

impl BlockingSerial<Box<dyn SerialPort>> {
    /// Open a serial port at `baud`, 8N1, no flow control.
    ///
    /// Fails for paths that are not terminals.
    pub fn open(path: impl AsRef<Path>, baud: u32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let port = serialport::new(path.to_string_lossy(), baud)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(WRITE_TIMEOUT)
            .open()
            .map_err(|source| TransportError::Open {
                path: path.clone(),
                source,
            })?;

        info!(?path, baud, "opened serial port");

        Ok(Self {
            inner: port,
            path: Some(path),
        })
    }
}

impl<W: Write> SerialSink for BlockingSerial<W> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let mut offset = 0usize;
        while offset < bytes.len() {
            match self.inner.write(&bytes[offset..]) {
                Ok(0) => return Err(TransportError::Closed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(TransportError::Io(err)),
            }
        }
        trace!(len = bytes.len(), "serial write");

        self.flush()
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        debug!(ms, "serial delay");
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
        Ok(())
    }
}

impl<W> std::fmt::Debug for BlockingSerial<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingSerial")
            .field("path", &self.path)
            .finish()
    }
}
