//! Command encoder for MIDI-framed force-feedback devices.
//!
//! # Crate Structure
//!
//! - [`transport`]: Blocking serial sink abstraction and a recording sink
//! - [`frame`]: 7-bit packing, checksums, effect model and frame assembly
//! - [`device`]: High-level device facade (behind `device` feature)

/// Re-export transport types.
pub mod transport {
    pub use ffbmidi_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use ffbmidi_frame::*;
}

/// Re-export device types (requires `device` feature).
#[cfg(feature = "device")]
pub mod device {
    pub use ffbmidi_device::*;
}
