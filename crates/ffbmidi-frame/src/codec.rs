use bytes::{BufMut, Bytes, BytesMut};

use crate::bitpack::{check_u14, check_u7, mask7, put_u14};
use crate::checksum::checksum;
use crate::effect::{Effect, EffectDescriptor, EffectTail};
use crate::error::Result;
use crate::protocol::{
    RegisterPoke, ANTICENTER_MAX, AUTOCENTER_OFF_DELAY_MS, AUTOCENTER_OFF_MODE,
    AUTOCENTER_ON_MODE, CHECKSUM_START, CMD_DEFINE_EFFECT, CONTROL_CHANGE, EFFECT_HEADER_LEN,
    EFFECT_OPAQUE, EFFECT_PLAY, EFFECT_STOP, EFFECT_TRAILER_LEN, INIT_CONFIG,
    INIT_CONFIG_DELAY_MS, INIT_MODE, INIT_MODE_DELAY_MS, INIT_REGISTERS, PROGRAM_CHANGE,
    REGISTER_WRITE, SYSEX_END, SYSEX_PREFIX, SYSEX_START,
};

/// What a frame does on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// `C5 mode`
    ProgramChange,
    /// `B5 register value`
    ControlChange,
    /// `A5 offset value`
    RegisterWrite,
    /// One or more `{B5 reg 7F} {A5 offset value}` pairs.
    RegisterBlock,
    /// Fixed SysEx block without checksum.
    SysEx,
    /// Checksummed effect-definition SysEx.
    EffectDefinition,
    /// `B5 param id A5 lo hi`
    Modify,
}

impl FrameKind {
    pub fn name(self) -> &'static str {
        match self {
            FrameKind::ProgramChange => "program-change",
            FrameKind::ControlChange => "control-change",
            FrameKind::RegisterWrite => "register-write",
            FrameKind::RegisterBlock => "register-block",
            FrameKind::SysEx => "sysex",
            FrameKind::EffectDefinition => "effect-definition",
            FrameKind::Modify => "modify",
        }
    }
}

/// One complete message as transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    kind: FrameKind,
    bytes: Bytes,
}

impl Frame {
    pub fn new(kind: FrameKind, bytes: impl Into<Bytes>) -> Self {
        Self {
            kind,
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Space-separated uppercase hex, e.g. `B5 20 05`.
    pub fn to_hex(&self) -> String {
        self.bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One step of a [`Sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Send(Frame),
    /// Blocking wait, in milliseconds, before the next step.
    Delay(u32),
}

/// Ordered messages and the delays the device needs between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) -> &mut Self {
        self.steps.push(Step::Send(frame));
        self
    }

    pub fn delay(&mut self, ms: u32) -> &mut Self {
        self.steps.push(Step::Delay(ms));
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.steps.iter().filter_map(|step| match step {
            Step::Send(frame) => Some(frame),
            Step::Delay(_) => None,
        })
    }

    pub fn message_count(&self) -> usize {
        self.frames().count()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                Step::Delay(ms) => Some(*ms),
                Step::Send(_) => None,
            })
            .collect()
    }

    /// Bytes of every message concatenated.
    pub fn wire_bytes(&self) -> Vec<u8> {
        self.frames()
            .flat_map(|frame| frame.as_bytes().iter().copied())
            .collect()
    }
}

impl From<Frame> for Sequence {
    fn from(frame: Frame) -> Self {
        Self {
            steps: vec![Step::Send(frame)],
        }
    }
}

impl IntoIterator for Sequence {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Configuration for the encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameConfig {
    /// Reject out-of-width fields with `ValueOutOfRange` instead of
    /// truncating them. Default: false.
    pub strict: bool,
}

impl FrameConfig {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Encoder applying a [`FrameConfig`] to the free `encode_*` functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    config: FrameConfig,
}

impl Encoder {
    pub fn new(config: FrameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    pub fn init(&self) -> Sequence {
        encode_init()
    }

    pub fn autocenter(&self, enabled: bool) -> Sequence {
        encode_autocenter(enabled)
    }

    pub fn effect(&self, effect: &Effect) -> Result<Frame> {
        if self.config.strict {
            effect.check_range()?;
        }
        Ok(encode_effect(effect))
    }

    pub fn descriptor(&self, desc: &EffectDescriptor) -> Result<Frame> {
        self.effect(&Effect::try_from(desc)?)
    }

    pub fn play(&self, effect_id: u8) -> Result<Frame> {
        self.check_id(effect_id)?;
        Ok(encode_play(effect_id))
    }

    pub fn stop(&self, effect_id: u8) -> Result<Frame> {
        self.check_id(effect_id)?;
        Ok(encode_stop(effect_id))
    }

    pub fn modify(&self, effect_id: u8, param: u8, value: u16) -> Result<Frame> {
        if self.config.strict {
            check_u7("effect_id", effect_id)?;
            check_u7("param", param)?;
            check_u14("value", value)?;
        }
        Ok(encode_modify(effect_id, param, value))
    }

    fn check_id(&self, effect_id: u8) -> Result<()> {
        if self.config.strict {
            check_u7("effect_id", effect_id)?;
        }
        Ok(())
    }
}

/// Startup handshake: mode select, configuration block, register pokes.
pub fn encode_init() -> Sequence {
    let mut seq = Sequence::new();
    seq.push(program_change(INIT_MODE))
        .delay(INIT_MODE_DELAY_MS)
        .push(Frame::new(FrameKind::SysEx, Bytes::from_static(&INIT_CONFIG)))
        .delay(INIT_CONFIG_DELAY_MS)
        .push(register_block(&INIT_REGISTERS));
    seq
}

/// Turn the centering spring on, or on-then-off.
///
/// Enabling is a single program change. Disabling sends the same program
/// change, waits, pokes the anticenter register to maximum, and selects the
/// off mode.
pub fn encode_autocenter(enabled: bool) -> Sequence {
    let mut seq = Sequence::from(program_change(AUTOCENTER_ON_MODE));
    if !enabled {
        seq.delay(AUTOCENTER_OFF_DELAY_MS)
            .push(Frame::new(
                FrameKind::ControlChange,
                ANTICENTER_MAX.select().to_vec(),
            ))
            .push(Frame::new(
                FrameKind::RegisterWrite,
                ANTICENTER_MAX.write().to_vec(),
            ))
            .push(program_change(AUTOCENTER_OFF_MODE));
    }
    seq
}

/// Build a checksummed effect-definition frame.
///
/// Wire format:
/// ```text
/// F0 00 01 0A 01 | 23 | type | 7F | duration lo hi | buttons lo hi | tail | sum | F7
///                 ^-- checksummed from here through the tail
/// ```
pub fn encode_effect(effect: &Effect) -> Frame {
    let body = &effect.body;
    let mut dst =
        BytesMut::with_capacity(EFFECT_HEADER_LEN + body.tail_len() + EFFECT_TRAILER_LEN);
    dst.put_u8(SYSEX_START);
    dst.put_slice(&SYSEX_PREFIX);
    dst.put_u8(CMD_DEFINE_EFFECT);
    dst.put_u8(effect.effect_type().code());
    dst.put_u8(EFFECT_OPAQUE);
    put_u14(&mut dst, effect.duration);
    put_u14(&mut dst, effect.button_mask);
    body.append_tail(&mut dst);

    let sum = checksum(&dst[CHECKSUM_START..]);
    dst.put_u8(sum);
    dst.put_u8(SYSEX_END);

    Frame::new(FrameKind::EffectDefinition, dst.freeze())
}

/// Resolve a raw descriptor and encode it.
///
/// Fails with `InvalidEffectType` before building anything if the type code
/// or name is unknown.
pub fn encode_descriptor(desc: &EffectDescriptor) -> Result<Frame> {
    Ok(encode_effect(&Effect::try_from(desc)?))
}

pub fn encode_play(effect_id: u8) -> Frame {
    control_change(EFFECT_PLAY, effect_id)
}

pub fn encode_stop(effect_id: u8) -> Frame {
    control_change(EFFECT_STOP, effect_id)
}

/// Change one parameter of a defined effect: `B5 param id A5 lo hi`.
pub fn encode_modify(effect_id: u8, param: u8, value: u16) -> Frame {
    let mut dst = BytesMut::with_capacity(6);
    dst.put_u8(CONTROL_CHANGE);
    dst.put_u8(mask7(param));
    dst.put_u8(mask7(effect_id));
    dst.put_u8(REGISTER_WRITE);
    put_u14(&mut dst, value);
    Frame::new(FrameKind::Modify, dst.freeze())
}

fn program_change(mode: u8) -> Frame {
    Frame::new(FrameKind::ProgramChange, vec![PROGRAM_CHANGE, mask7(mode)])
}

fn control_change(register: u8, value: u8) -> Frame {
    Frame::new(
        FrameKind::ControlChange,
        vec![CONTROL_CHANGE, mask7(register), mask7(value)],
    )
}

fn register_block(pokes: &[RegisterPoke]) -> Frame {
    let mut dst = BytesMut::with_capacity(pokes.len() * RegisterPoke::LEN);
    for poke in pokes {
        dst.put_slice(&poke.select());
        dst.put_slice(&poke.write());
    }
    Frame::new(FrameKind::RegisterBlock, dst.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::verify;
    use crate::effect::{
        Condition, ConditionKind, EffectType, Friction, Periodic, TypeTag, Waveform,
    };
    use crate::error::FrameError;

    fn constant() -> Periodic {
        Periodic {
            waveform: Waveform::Constant,
            direction: 270,
            strength: 0x60,
            sample_rate: 100,
            attack_level: 0x10,
            attack_time: 200,
            fade_time: 150,
            fade_level: 0x05,
            frequency: 1,
            amplitude: 0x3fff,
        }
    }

    #[test]
    fn init_sequence() {
        let seq = encode_init();
        assert_eq!(seq.message_count(), 3);
        assert_eq!(seq.delays(), vec![20, 57]);

        let steps = seq.steps();
        assert!(matches!(&steps[0], Step::Send(f) if f.as_bytes() == [0xc5, 0x01]));
        assert_eq!(steps[1], Step::Delay(20));
        assert!(matches!(
            &steps[2],
            Step::Send(f) if f.as_bytes() == [0xf0, 0x00, 0x01, 0x0a, 0x01, 0x10, 0x05, 0x6b, 0xf7]
        ));
        assert_eq!(steps[3], Step::Delay(57));

        let Step::Send(block) = &steps[4] else {
            panic!("expected register block");
        };
        assert_eq!(block.kind(), FrameKind::RegisterBlock);
        assert_eq!(block.len(), INIT_REGISTERS.len() * 6);
        assert_eq!(&block.as_bytes()[..6], &[0xb5, 0x40, 0x7f, 0xa5, 0x72, 0x57]);
        assert_eq!(
            &block.as_bytes()[block.len() - 6..],
            &[0xb5, 0x74, 0x7f, 0xa5, 0x7e, 0x01]
        );
    }

    #[test]
    fn init_register_block_is_exact() {
        #[rustfmt::skip]
        const EXPECTED: [u8; 84] = [
            0xb5, 0x40, 0x7f, 0xa5, 0x72, 0x57,
            0xb5, 0x44, 0x7f, 0xa5, 0x3c, 0x43,
            0xb5, 0x48, 0x7f, 0xa5, 0x7e, 0x00,
            0xb5, 0x4c, 0x7f, 0xa5, 0x04, 0x00,
            0xb5, 0x50, 0x7f, 0xa5, 0x02, 0x00,
            0xb5, 0x54, 0x7f, 0xa5, 0x02, 0x00,
            0xb5, 0x58, 0x7f, 0xa5, 0x00, 0x7e,
            0xb5, 0x5c, 0x7f, 0xa5, 0x3c, 0x00,
            0xb5, 0x60, 0x7f, 0xa5, 0x14, 0x65,
            0xb5, 0x64, 0x7f, 0xa5, 0x7e, 0x6b,
            0xb5, 0x68, 0x7f, 0xa5, 0x36, 0x00,
            0xb5, 0x6c, 0x7f, 0xa5, 0x28, 0x00,
            0xb5, 0x70, 0x7f, 0xa5, 0x66, 0x4c,
            0xb5, 0x74, 0x7f, 0xa5, 0x7e, 0x01,
        ];

        let seq = encode_init();
        let block = seq.frames().last().expect("init ends with the register block");
        assert_eq!(block.as_bytes(), &EXPECTED[..]);
    }

    #[test]
    fn autocenter_on_is_one_message() {
        let seq = encode_autocenter(true);
        assert_eq!(seq.message_count(), 1);
        assert!(seq.delays().is_empty());
        assert_eq!(seq.wire_bytes(), vec![0xc5, 0x01]);
    }

    #[test]
    fn autocenter_off_is_four_messages_after_a_delay() {
        let seq = encode_autocenter(false);
        assert_eq!(seq.message_count(), 4);
        assert_eq!(seq.steps()[1], Step::Delay(70));
        assert_eq!(seq.delays(), vec![70]);
        assert_eq!(
            seq.wire_bytes(),
            vec![0xc5, 0x01, 0xb5, 0x7c, 0x7f, 0xa5, 0x7f, 0x00, 0xc5, 0x06]
        );
    }

    #[test]
    fn periodic_layout() {
        let effect = Effect::periodic(constant())
            .with_duration(1000)
            .with_button_mask(0x01);
        let frame = encode_effect(&effect);
        let b = frame.as_bytes();

        assert_eq!(frame.len(), 34);
        assert_eq!(&b[..8], &[0xf0, 0x00, 0x01, 0x0a, 0x01, 0x23, 0x12, 0x7f]);
        assert_eq!(&b[8..12], &[0x68, 0x07, 0x01, 0x00]);
        assert_eq!(&b[12..15], &[0x0e, 0x02, 0x60]);
        assert_eq!(&b[15..19], &[0x64, 0x00, 0x10, 0x4e]);
        assert_eq!(&b[19..23], &[0x10, 0x48, 0x01, 0x7f]);
        assert_eq!(&b[23..26], &[0x16, 0x01, 0x05]);
        assert_eq!(&b[26..32], &[0x01, 0x00, 0x7f, 0x7f, 0x01, 0x01]);
        assert_eq!(b[33], 0xf7);
        assert!(verify(b));
    }

    #[test]
    fn condition_and_friction_lengths() {
        for kind in [ConditionKind::Spring, ConditionKind::Damper, ConditionKind::Inertia] {
            let frame = encode_effect(&Effect::condition(Condition {
                kind,
                strength_x: 0x40,
                strength_y: 0x20,
                offset_x: 100,
                offset_y: 200,
            }));
            assert_eq!(frame.len(), 22);
            assert_eq!(frame.as_bytes()[6], EffectType::from(kind).code());
            assert!(verify(frame.as_bytes()));
        }

        let frame = encode_effect(&Effect::friction(Friction {
            strength_x: 0x7f,
            strength_y: 0x01,
        }));
        assert_eq!(frame.len(), 18);
        assert_eq!(&frame.as_bytes()[12..16], &[0x7f, 0x00, 0x01, 0x00]);
        assert!(verify(frame.as_bytes()));
    }

    #[test]
    fn friction_checksum_by_hand() {
        let frame = encode_effect(&Effect::friction(Friction {
            strength_x: 0x10,
            strength_y: 0x10,
        }));
        // 23 + 10 + 7F + 0 + 0 + 0 + 0 + 10 + 0 + 10 + 0 = 0xD2 -> 0x52 -> 0x2E
        assert_eq!(frame.as_bytes()[16], 0x2e);
    }

    #[test]
    fn lenient_mode_truncates() {
        let frame = encode_effect(&Effect::friction(Friction {
            strength_x: 0xff,
            strength_y: 0x80,
        }));
        assert_eq!(&frame.as_bytes()[12..16], &[0x7f, 0x00, 0x00, 0x00]);
        assert!(frame.as_bytes()[1..frame.len() - 1].iter().all(|b| *b <= 0x7f));
    }

    #[test]
    fn strict_mode_rejects_wide_fields() {
        let encoder = Encoder::new(FrameConfig::strict());
        let err = encoder
            .effect(&Effect::friction(Friction {
                strength_x: 0x80,
                strength_y: 0,
            }))
            .unwrap_err();
        assert!(matches!(err, FrameError::ValueOutOfRange { field: "strength_x", .. }));

        assert!(encoder.play(0x80).is_err());
        assert!(encoder.stop(0x7f).is_ok());
        assert!(encoder.modify(5, 0x64, 0x4000).is_err());
        assert!(encoder.modify(5, 0x80, 1).is_err());
    }

    #[test]
    fn descriptor_with_unknown_type_builds_nothing() {
        let desc = EffectDescriptor {
            effect_type: 0x03.into(),
            ..EffectDescriptor::default()
        };
        assert!(matches!(
            encode_descriptor(&desc),
            Err(FrameError::InvalidEffectType(TypeTag::Code(0x03)))
        ));
        assert!(Encoder::default().descriptor(&desc).is_err());
    }

    #[test]
    fn control_messages() {
        assert_eq!(encode_play(5).as_bytes(), &[0xb5, 0x20, 0x05]);
        assert_eq!(encode_stop(5).as_bytes(), &[0xb5, 0x30, 0x05]);
        assert_eq!(
            encode_modify(5, 0x64, 300).as_bytes(),
            &[0xb5, 0x64, 0x05, 0xa5, 0x2c, 0x02]
        );
        assert_eq!(encode_modify(5, 0x64, 300).kind(), FrameKind::Modify);
    }

    #[test]
    fn frame_hex() {
        assert_eq!(encode_play(5).to_hex(), "B5 20 05");
        assert_eq!(format!("{}", encode_stop(0x7f)), "B5 30 7F");
    }
}
