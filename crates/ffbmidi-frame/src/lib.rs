//! Frame encoding for a MIDI-framed force-feedback protocol.
//!
//! Every outbound message is built here as a complete byte buffer before it
//! touches the link:
//! - 14-bit fields travel as two 7-bit halves, low first
//! - effect definitions are SysEx frames with an additive 7-bit checksum
//! - multi-message operations carry their mandated delays as data
//!
//! No inbound parsing, no retries.

pub mod bitpack;
pub mod checksum;
pub mod codec;
pub mod effect;
pub mod error;
pub mod protocol;
pub mod writer;

pub use bitpack::{join14, split14, MAX_14BIT, MAX_7BIT};
pub use checksum::{checksum, verify};
pub use codec::{
    encode_autocenter, encode_descriptor, encode_effect, encode_init, encode_modify, encode_play,
    encode_stop, Encoder, Frame, FrameConfig, FrameKind, Sequence, Step,
};
pub use effect::{
    Category, Condition, ConditionKind, Effect, EffectBody, EffectDescriptor, EffectTail,
    EffectType, Friction, Periodic, TypeTag, Waveform,
};
pub use error::{FrameError, Result};
pub use protocol::{param, ALL_EFFECTS};
pub use writer::FrameWriter;
