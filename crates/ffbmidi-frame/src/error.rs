/// Errors that can occur while encoding or writing frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The effect type (code or name) is not one the device understands.
    #[error("invalid effect type {0}")]
    InvalidEffectType(crate::effect::TypeTag),

    /// A field does not fit its wire width (strict mode only).
    #[error("{field} out of range ({value}, max {max})")]
    ValueOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// The sink failed to write or delay.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] ffbmidi_transport::TransportError),
}

pub type Result<T> = std::result::Result<T, FrameError>;
