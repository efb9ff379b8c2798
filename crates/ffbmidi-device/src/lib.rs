//! High-level force-feedback device facade.
//!
//! This is the "just works" layer: open a serial device node, run the init
//! handshake, define effects and play them. Effect slot bookkeeping stays
//! with the caller.

pub mod connector;
pub mod device;

pub use connector::{open, open_with_config};
pub use device::Device;
pub use ffbmidi_frame::{FrameError, Result};
