use ffbmidi_frame::{
    Effect, EffectDescriptor, Encoder, FrameConfig, FrameWriter, Result, Sequence,
};
use ffbmidi_transport::SerialSink;
use tracing::{debug, info};

/// A force-feedback device reachable through a serial sink.
///
/// Every call encodes its complete message(s) first and only then writes,
/// so encoding errors never leave a partial message on the link.
pub struct Device<S> {
    writer: FrameWriter<S>,
    encoder: Encoder,
}

impl<S: SerialSink> Device<S> {
    /// Wrap a sink with the default (lenient) encoder.
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, FrameConfig::default())
    }

    pub fn with_config(sink: S, config: FrameConfig) -> Self {
        Self {
            writer: FrameWriter::new(sink),
            encoder: Encoder::new(config),
        }
    }

    /// Run the startup handshake. Blocks for the mandated delays.
    pub fn init(&mut self) -> Result<()> {
        self.writer.play(&self.encoder.init())?;
        info!("device initialized");
        Ok(())
    }

    /// Enable or disable the built-in centering spring.
    pub fn set_autocenter(&mut self, enabled: bool) -> Result<()> {
        self.writer.play(&self.encoder.autocenter(enabled))?;
        debug!(enabled, "autocenter set");
        Ok(())
    }

    /// Play an already-encoded sequence, delays included.
    pub fn send(&mut self, sequence: &Sequence) -> Result<()> {
        self.writer.play(sequence)?;
        debug!(messages = sequence.message_count(), "sequence sent");
        Ok(())
    }

    /// Upload an effect definition.
    pub fn define_effect(&mut self, effect: &Effect) -> Result<()> {
        let frame = self.encoder.effect(effect)?;
        self.writer.write_frame(&frame)?;
        debug!(effect_type = %effect.effect_type(), "effect defined");
        Ok(())
    }

    /// Upload an effect from a raw descriptor.
    pub fn define_raw(&mut self, desc: &EffectDescriptor) -> Result<()> {
        let frame = self.encoder.descriptor(desc)?;
        self.writer.write_frame(&frame)
    }

    pub fn play(&mut self, effect_id: u8) -> Result<()> {
        let frame = self.encoder.play(effect_id)?;
        self.writer.write_frame(&frame)
    }

    pub fn stop(&mut self, effect_id: u8) -> Result<()> {
        let frame = self.encoder.stop(effect_id)?;
        self.writer.write_frame(&frame)
    }

    /// Change one parameter of a defined effect. See
    /// [`ffbmidi_frame::param`] for the codes.
    pub fn modify(&mut self, effect_id: u8, param: u8, value: u16) -> Result<()> {
        let frame = self.encoder.modify(effect_id, param, value)?;
        self.writer.write_frame(&frame)
    }

    pub fn config(&self) -> &FrameConfig {
        self.encoder.config()
    }

    /// Borrow the underlying sink.
    pub fn sink(&self) -> &S {
        self.writer.get_ref()
    }

    /// Mutably borrow the underlying sink.
    pub fn sink_mut(&mut self) -> &mut S {
        self.writer.get_mut()
    }

    /// Consume the device and return the sink.
    pub fn into_inner(self) -> S {
        self.writer.into_inner()
    }
}

impl<S> std::fmt::Debug for Device<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("config", self.encoder.config())
            .finish_non_exhaustive()
    }
}
