//! Effect descriptors.
//!
//! [`Effect`] is the typed form: a category variant that can only carry the
//! fields its layout has. [`EffectDescriptor`] is the flat, raw form used
//! for external input; converting it checks the type code.

use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::bitpack::{check_u14, check_u7, put_u14, put_u7};
use crate::error::{FrameError, Result};
use crate::protocol::{
    AXIS_PAD, CONDITION_TAIL_LEN, FRICTION_TAIL_LEN, PERIODIC_ENVELOPE_PAD, PERIODIC_FIXED,
    PERIODIC_TAIL_LEN, PERIODIC_TRAILER,
};

/// Effect type codes understood by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectType {
    Sine,
    Square,
    Ramp,
    Triangle,
    SawtoothDown,
    SawtoothUp,
    Spring,
    Damper,
    Inertia,
    Friction,
    Constant,
}

/// Field layout family of an effect type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Periodic,
    Condition,
    Friction,
}

impl EffectType {
    pub const ALL: [EffectType; 11] = [
        EffectType::Sine,
        EffectType::Square,
        EffectType::Ramp,
        EffectType::Triangle,
        EffectType::SawtoothDown,
        EffectType::SawtoothUp,
        EffectType::Spring,
        EffectType::Damper,
        EffectType::Inertia,
        EffectType::Friction,
        EffectType::Constant,
    ];

    /// Wire code.
    pub fn code(self) -> u8 {
        match self {
            EffectType::Sine => 0x02,
            EffectType::Square => 0x05,
            EffectType::Ramp => 0x06,
            EffectType::Triangle => 0x08,
            EffectType::SawtoothDown => 0x0a,
            EffectType::SawtoothUp => 0x0b,
            EffectType::Spring => 0x0d,
            EffectType::Damper => 0x0e,
            EffectType::Inertia => 0x0f,
            EffectType::Friction => 0x10,
            EffectType::Constant => 0x12,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.code() == code)
    }

    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            EffectType::Sine => "sine",
            EffectType::Square => "square",
            EffectType::Ramp => "ramp",
            EffectType::Triangle => "triangle",
            EffectType::SawtoothDown => "sawtooth-down",
            EffectType::SawtoothUp => "sawtooth-up",
            EffectType::Spring => "spring",
            EffectType::Damper => "damper",
            EffectType::Inertia => "inertia",
            EffectType::Friction => "friction",
            EffectType::Constant => "constant",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }

    pub fn category(self) -> Category {
        match self {
            EffectType::Spring | EffectType::Damper | EffectType::Inertia => Category::Condition,
            EffectType::Friction => Category::Friction,
            _ => Category::Periodic,
        }
    }
}

impl TryFrom<u8> for EffectType {
    type Error = FrameError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code).ok_or(FrameError::InvalidEffectType(TypeTag::Code(code)))
    }
}

impl TryFrom<&TypeTag> for EffectType {
    type Error = FrameError;

    fn try_from(tag: &TypeTag) -> Result<Self> {
        let found = match tag {
            TypeTag::Code(code) => Self::from_code(*code),
            TypeTag::Name(name) => Self::from_name(name),
        };
        found.ok_or_else(|| FrameError::InvalidEffectType(tag.clone()))
    }
}

impl std::fmt::Display for EffectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Waveform of a periodic effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Constant,
    Sine,
    Square,
    Ramp,
    Triangle,
    SawtoothDown,
    SawtoothUp,
}

impl From<Waveform> for EffectType {
    fn from(waveform: Waveform) -> Self {
        match waveform {
            Waveform::Constant => EffectType::Constant,
            Waveform::Sine => EffectType::Sine,
            Waveform::Square => EffectType::Square,
            Waveform::Ramp => EffectType::Ramp,
            Waveform::Triangle => EffectType::Triangle,
            Waveform::SawtoothDown => EffectType::SawtoothDown,
            Waveform::SawtoothUp => EffectType::SawtoothUp,
        }
    }
}

impl TryFrom<EffectType> for Waveform {
    type Error = FrameError;

    fn try_from(ty: EffectType) -> Result<Self> {
        match ty {
            EffectType::Constant => Ok(Waveform::Constant),
            EffectType::Sine => Ok(Waveform::Sine),
            EffectType::Square => Ok(Waveform::Square),
            EffectType::Ramp => Ok(Waveform::Ramp),
            EffectType::Triangle => Ok(Waveform::Triangle),
            EffectType::SawtoothDown => Ok(Waveform::SawtoothDown),
            EffectType::SawtoothUp => Ok(Waveform::SawtoothUp),
            EffectType::Spring | EffectType::Damper | EffectType::Inertia | EffectType::Friction => {
                Err(FrameError::InvalidEffectType(ty.into()))
            }
        }
    }
}

/// Kind of a two-axis condition effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Spring,
    Damper,
    Inertia,
}

impl From<ConditionKind> for EffectType {
    fn from(kind: ConditionKind) -> Self {
        match kind {
            ConditionKind::Spring => EffectType::Spring,
            ConditionKind::Damper => EffectType::Damper,
            ConditionKind::Inertia => EffectType::Inertia,
        }
    }
}

impl TryFrom<EffectType> for ConditionKind {
    type Error = FrameError;

    fn try_from(ty: EffectType) -> Result<Self> {
        match ty {
            EffectType::Spring => Ok(ConditionKind::Spring),
            EffectType::Damper => Ok(ConditionKind::Damper),
            EffectType::Inertia => Ok(ConditionKind::Inertia),
            other => Err(FrameError::InvalidEffectType(other.into())),
        }
    }
}

/// Constant, sine, square, ramp, triangle and sawtooth effects.
///
/// Envelope note: with an infinite duration, stop/play resumes the envelope
/// where it left off; with a finite one it restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodic {
    pub waveform: Waveform,
    /// Degrees.
    pub direction: u16,
    pub strength: u8,
    /// Hz; the device default is usually 100.
    pub sample_rate: u16,
    pub attack_level: u8,
    pub attack_time: u16,
    pub fade_time: u16,
    pub fade_level: u8,
    pub frequency: u16,
    pub amplitude: u16,
}

/// Spring, damper and inertia effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub kind: ConditionKind,
    pub strength_x: u8,
    pub strength_y: u8,
    pub offset_x: u16,
    pub offset_y: u16,
}

/// Friction effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Friction {
    pub strength_x: u8,
    pub strength_y: u8,
}

/// Category-specific part of an effect-definition frame.
pub trait EffectTail {
    fn effect_type(&self) -> EffectType;

    /// Bytes appended by [`append_tail`](Self::append_tail).
    fn tail_len(&self) -> usize;

    /// Append the tail. Out-of-width fields are truncated.
    fn append_tail(&self, dst: &mut BytesMut);

    /// Fail on the first field that [`append_tail`](Self::append_tail)
    /// would truncate.
    fn check_range(&self) -> Result<()>;
}

impl EffectTail for Periodic {
    fn effect_type(&self) -> EffectType {
        self.waveform.into()
    }

    fn tail_len(&self) -> usize {
        PERIODIC_TAIL_LEN
    }

    fn append_tail(&self, dst: &mut BytesMut) {
        put_u14(dst, self.direction);
        put_u7(dst, self.strength);
        put_u14(dst, self.sample_rate);
        dst.put_slice(&PERIODIC_FIXED);
        put_u7(dst, self.attack_level);
        put_u14(dst, self.attack_time);
        dst.put_u8(PERIODIC_ENVELOPE_PAD);
        put_u14(dst, self.fade_time);
        put_u7(dst, self.fade_level);
        put_u14(dst, self.frequency);
        put_u14(dst, self.amplitude);
        dst.put_slice(&PERIODIC_TRAILER);
    }

    fn check_range(&self) -> Result<()> {
        check_u14("direction", self.direction)?;
        check_u7("strength", self.strength)?;
        check_u14("sample_rate", self.sample_rate)?;
        check_u7("attack_level", self.attack_level)?;
        check_u14("attack_time", self.attack_time)?;
        check_u14("fade_time", self.fade_time)?;
        check_u7("fade_level", self.fade_level)?;
        check_u14("frequency", self.frequency)?;
        check_u14("amplitude", self.amplitude)
    }
}

impl EffectTail for Condition {
    fn effect_type(&self) -> EffectType {
        self.kind.into()
    }

    fn tail_len(&self) -> usize {
        CONDITION_TAIL_LEN
    }

    fn append_tail(&self, dst: &mut BytesMut) {
        put_u7(dst, self.strength_x);
        dst.put_u8(AXIS_PAD);
        put_u7(dst, self.strength_y);
        dst.put_u8(AXIS_PAD);
        put_u14(dst, self.offset_x);
        put_u14(dst, self.offset_y);
    }

    fn check_range(&self) -> Result<()> {
        check_u7("strength_x", self.strength_x)?;
        check_u7("strength_y", self.strength_y)?;
        check_u14("offset_x", self.offset_x)?;
        check_u14("offset_y", self.offset_y)
    }
}

impl EffectTail for Friction {
    fn effect_type(&self) -> EffectType {
        EffectType::Friction
    }

    fn tail_len(&self) -> usize {
        FRICTION_TAIL_LEN
    }

    fn append_tail(&self, dst: &mut BytesMut) {
        put_u7(dst, self.strength_x);
        dst.put_u8(AXIS_PAD);
        put_u7(dst, self.strength_y);
        dst.put_u8(AXIS_PAD);
    }

    fn check_range(&self) -> Result<()> {
        check_u7("strength_x", self.strength_x)?;
        check_u7("strength_y", self.strength_y)
    }
}

/// Category payload of an [`Effect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectBody {
    Periodic(Periodic),
    Condition(Condition),
    Friction(Friction),
}

impl EffectBody {
    fn tail(&self) -> &dyn EffectTail {
        match self {
            EffectBody::Periodic(body) => body,
            EffectBody::Condition(body) => body,
            EffectBody::Friction(body) => body,
        }
    }
}

impl EffectTail for EffectBody {
    fn effect_type(&self) -> EffectType {
        self.tail().effect_type()
    }

    fn tail_len(&self) -> usize {
        self.tail().tail_len()
    }

    fn append_tail(&self, dst: &mut BytesMut) {
        self.tail().append_tail(dst)
    }

    fn check_range(&self) -> Result<()> {
        self.tail().check_range()
    }
}

/// A complete effect definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    /// In 2 ms units; 0 plays until stopped.
    pub duration: u16,
    /// Buttons that trigger the effect; 0 means play it manually.
    pub button_mask: u16,
    pub body: EffectBody,
}

impl Effect {
    /// Infinite, manually triggered effect.
    pub fn new(body: EffectBody) -> Self {
        Self {
            duration: 0,
            button_mask: 0,
            body,
        }
    }

    pub fn periodic(periodic: Periodic) -> Self {
        Self::new(EffectBody::Periodic(periodic))
    }

    pub fn condition(condition: Condition) -> Self {
        Self::new(EffectBody::Condition(condition))
    }

    pub fn friction(friction: Friction) -> Self {
        Self::new(EffectBody::Friction(friction))
    }

    pub fn with_duration(mut self, duration: u16) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_button_mask(mut self, button_mask: u16) -> Self {
        self.button_mask = button_mask;
        self
    }

    pub fn effect_type(&self) -> EffectType {
        self.body.effect_type()
    }

    /// Fail if any field, common or category-specific, exceeds its width.
    pub fn check_range(&self) -> Result<()> {
        check_u14("duration", self.duration)?;
        check_u14("button_mask", self.button_mask)?;
        self.body.check_range()
    }
}

/// Effect type as written in a descriptor: a wire code or a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeTag {
    Code(u8),
    Name(String),
}

impl Default for TypeTag {
    fn default() -> Self {
        TypeTag::Code(0)
    }
}

impl From<u8> for TypeTag {
    fn from(code: u8) -> Self {
        TypeTag::Code(code)
    }
}

impl From<EffectType> for TypeTag {
    fn from(ty: EffectType) -> Self {
        TypeTag::Code(ty.code())
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Code(code) => write!(f, "0x{code:02x}"),
            TypeTag::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// Flat effect record with a raw type tag, as read from JSON.
///
/// Fields the type's layout does not use are ignored. The `type` field
/// accepts the numeric code or the kebab-case name; either is only checked
/// on conversion to [`Effect`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectDescriptor {
    #[serde(rename = "type")]
    pub effect_type: TypeTag,
    pub duration: u16,
    pub button_mask: u16,
    pub direction: u16,
    pub strength: u8,
    pub sample_rate: u16,
    pub attack_level: u8,
    pub attack_time: u16,
    pub fade_time: u16,
    pub fade_level: u8,
    pub frequency: u16,
    pub amplitude: u16,
    pub strength_x: u8,
    pub strength_y: u8,
    pub offset_x: u16,
    pub offset_y: u16,
}

impl TryFrom<&EffectDescriptor> for Effect {
    type Error = FrameError;

    fn try_from(desc: &EffectDescriptor) -> Result<Self> {
        let ty = EffectType::try_from(&desc.effect_type)?;
        let body = match ty.category() {
            Category::Condition => EffectBody::Condition(Condition {
                kind: ConditionKind::try_from(ty)?,
                strength_x: desc.strength_x,
                strength_y: desc.strength_y,
                offset_x: desc.offset_x,
                offset_y: desc.offset_y,
            }),
            Category::Friction => EffectBody::Friction(Friction {
                strength_x: desc.strength_x,
                strength_y: desc.strength_y,
            }),
            Category::Periodic => EffectBody::Periodic(Periodic {
                waveform: Waveform::try_from(ty)?,
                direction: desc.direction,
                strength: desc.strength,
                sample_rate: desc.sample_rate,
                attack_level: desc.attack_level,
                attack_time: desc.attack_time,
                fade_time: desc.fade_time,
                fade_level: desc.fade_level,
                frequency: desc.frequency,
                amplitude: desc.amplitude,
            }),
        };

        Ok(Effect {
            duration: desc.duration,
            button_mask: desc.button_mask,
            body,
        })
    }
}
