use std::path::Path;

use ffbmidi_frame::{FrameConfig, Result};
use ffbmidi_transport::{BlockingSerial, SerialPortSink};

use crate::device::Device;

/// Open a serial port at `baud` with the default (lenient) encoder.
pub fn open(path: impl AsRef<Path>, baud: u32) -> Result<Device<SerialPortSink>> {
    open_with_config(path, baud, FrameConfig::default())
}

/// Open a serial port at `baud` with explicit encoder configuration.
pub fn open_with_config(
    path: impl AsRef<Path>,
    baud: u32,
    config: FrameConfig,
) -> Result<Device<SerialPortSink>> {
    let sink = BlockingSerial::open(path, baud)?;
    Ok(Device::with_config(sink, config))
}
