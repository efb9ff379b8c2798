//! Blocking serial byte-sink abstraction.
//!
//! The force-feedback link is a single serial channel. Everything above this
//! crate talks to it through [`SerialSink`], which offers exactly two
//! primitives:
//! - write a complete buffer (blocking)
//! - sleep for a number of milliseconds (blocking)
//!
//! Two sinks ship here: [`BlockingSerial`] for serial ports opened through
//! `serialport` (or any `std::io::Write`), and [`Recorder`] which captures
//! the event stream in memory for tests and dry runs.

pub mod error;
pub mod recorder;
pub mod serial;
pub mod traits;

pub use error::{Result, TransportError};
pub use recorder::{Recorder, SinkEvent};
pub use serial::{BlockingSerial, SerialPortSink, DEFAULT_BAUD, WRITE_TIMEOUT};
pub use traits::SerialSink;
