//! Protocol constants.
//!
//! Every magic byte the encoder emits lives here so the tables can be
//! audited against captures independently of the assembly code.

use std::ops::RangeInclusive;

// Status bytes (channel 6 on the device's MIDI port).

/// Program change.
pub const PROGRAM_CHANGE: u8 = 0xc5;
/// Control change.
pub const CONTROL_CHANGE: u8 = 0xb5;
/// Register write, follows a control change selecting the register.
pub const REGISTER_WRITE: u8 = 0xa5;

/// System exclusive start.
pub const SYSEX_START: u8 = 0xf0;
/// System exclusive end.
pub const SYSEX_END: u8 = 0xf7;
/// Manufacturer/device prefix following `F0`.
pub const SYSEX_PREFIX: [u8; 4] = [0x00, 0x01, 0x0a, 0x01];

/// SysEx command byte: define an effect.
pub const CMD_DEFINE_EFFECT: u8 = 0x23;

/// Control-change register: start playing an effect.
pub const EFFECT_PLAY: u8 = 0x20;
/// Control-change register: stop an effect.
pub const EFFECT_STOP: u8 = 0x30;

/// Effect ID addressing every effect at once.
pub const ALL_EFFECTS: u8 = 0x7f;
/// Effect IDs the device can hold.
pub const EFFECT_IDS: RangeInclusive<u8> = 2..=40;
/// Number of effect slots.
pub const EFFECT_MEMORY_SIZE: usize = 39;
/// Effects that may play at the same time.
pub const MAX_SIMULTANEOUS_EFFECTS: usize = 10;

// Init handshake.

/// Mode selected by the first init message.
pub const INIT_MODE: u8 = 0x01;
/// Delay after the mode program change.
pub const INIT_MODE_DELAY_MS: u32 = 20;
/// Fixed SysEx configuration block.
pub const INIT_CONFIG: [u8; 9] = [0xf0, 0x00, 0x01, 0x0a, 0x01, 0x10, 0x05, 0x6b, 0xf7];
/// Delay after the configuration block.
pub const INIT_CONFIG_DELAY_MS: u32 = 57;

/// One `{B5 register 7F} {A5 offset value}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterPoke {
    pub register: u8,
    pub offset: u8,
    pub value: u8,
}

impl RegisterPoke {
    /// Wire size of one poke.
    pub const LEN: usize = 6;

    pub const fn new(register: u8, offset: u8, value: u8) -> Self {
        Self {
            register,
            offset,
            value,
        }
    }

    /// Control-change half.
    pub const fn select(&self) -> [u8; 3] {
        [CONTROL_CHANGE, self.register, 0x7f]
    }

    /// Register-write half.
    pub const fn write(&self) -> [u8; 3] {
        [REGISTER_WRITE, self.offset, self.value]
    }
}

/// Device offset registers written by the last init message.
pub const INIT_REGISTERS: [RegisterPoke; 14] = [
    RegisterPoke::new(0x40, 0x72, 0x57),
    RegisterPoke::new(0x44, 0x3c, 0x43),
    RegisterPoke::new(0x48, 0x7e, 0x00),
    RegisterPoke::new(0x4c, 0x04, 0x00),
    RegisterPoke::new(0x50, 0x02, 0x00),
    RegisterPoke::new(0x54, 0x02, 0x00),
    RegisterPoke::new(0x58, 0x00, 0x7e),
    RegisterPoke::new(0x5c, 0x3c, 0x00),
    RegisterPoke::new(0x60, 0x14, 0x65),
    RegisterPoke::new(0x64, 0x7e, 0x6b),
    RegisterPoke::new(0x68, 0x36, 0x00),
    RegisterPoke::new(0x6c, 0x28, 0x00),
    RegisterPoke::new(0x70, 0x66, 0x4c),
    RegisterPoke::new(0x74, 0x7e, 0x01),
];

// Autocenter.

/// Program change turning the centering spring on.
pub const AUTOCENTER_ON_MODE: u8 = 0x01;
/// Program change following the anticenter poke.
pub const AUTOCENTER_OFF_MODE: u8 = 0x06;
/// Delay between the on program change and the anticenter poke.
pub const AUTOCENTER_OFF_DELAY_MS: u32 = 70;
/// Anticenter force at maximum.
pub const ANTICENTER_MAX: RegisterPoke = RegisterPoke::new(0x7c, 0x7f, 0x00);

// Effect-definition layout.

/// Index of the first checksummed byte (the command byte).
pub const CHECKSUM_START: usize = 1 + SYSEX_PREFIX.len();
/// Header length: `F0`, prefix, command, type, opaque byte, duration, buttons.
pub const EFFECT_HEADER_LEN: usize = CHECKSUM_START + 1 + 1 + 1 + 2 + 2;
/// Checksum plus `F7`.
pub const EFFECT_TRAILER_LEN: usize = 2;

/// Header byte 7. No known meaning; the device expects it.
pub const EFFECT_OPAQUE: u8 = 0x7f;
/// Padding after each single-byte axis strength.
pub const AXIS_PAD: u8 = 0x00;
/// Two bytes between sample rate and attack level in periodic effects.
pub const PERIODIC_FIXED: [u8; 2] = [0x10, 0x4e];
/// Byte between attack time and fade time. Must be 0x7f.
pub const PERIODIC_ENVELOPE_PAD: u8 = 0x7f;
/// Last two body bytes of periodic effects.
pub const PERIODIC_TRAILER: [u8; 2] = [0x01, 0x01];

/// Tail lengths per category.
pub const PERIODIC_TAIL_LEN: usize = 20;
pub const CONDITION_TAIL_LEN: usize = 8;
pub const FRICTION_TAIL_LEN: usize = 4;

/// Parameter codes accepted by a modify message.
///
/// Condition effects reuse `0x48..=0x54` for their own fields.
pub mod param {
    pub const DURATION: u8 = 0x40;
    pub const BUTTON_MASK: u8 = 0x44;

    pub const DIRECTION: u8 = 0x48;
    pub const GAIN: u8 = 0x4c;
    pub const ATTACK_TIME: u8 = 0x5c;
    pub const FADE_TIME: u8 = 0x60;
    pub const ATTACK_LEVEL: u8 = 0x64;
    pub const SUSTAIN_LEVEL: u8 = 0x68;
    pub const FADE_LEVEL: u8 = 0x6c;
    pub const FREQUENCY: u8 = 0x70;
    /// Also the start value of a ramp.
    pub const AMPLITUDE: u8 = 0x74;
    pub const RAMP_END: u8 = 0x78;
    pub const DEVICE_GAIN: u8 = 0x7c;

    pub const STRENGTH_X: u8 = 0x48;
    pub const STRENGTH_Y: u8 = 0x4c;
    pub const OFFSET_X: u8 = 0x50;
    pub const OFFSET_Y: u8 = 0x54;

    /// Name/code table used for lookups by name.
    pub const NAMES: [(&str, u8); 17] = [
        ("duration", DURATION),
        ("button-mask", BUTTON_MASK),
        ("direction", DIRECTION),
        ("gain", GAIN),
        ("attack-time", ATTACK_TIME),
        ("fade-time", FADE_TIME),
        ("attack-level", ATTACK_LEVEL),
        ("sustain-level", SUSTAIN_LEVEL),
        ("fade-level", FADE_LEVEL),
        ("frequency", FREQUENCY),
        ("amplitude", AMPLITUDE),
        ("ramp-end", RAMP_END),
        ("device-gain", DEVICE_GAIN),
        ("strength-x", STRENGTH_X),
        ("strength-y", STRENGTH_Y),
        ("offset-x", OFFSET_X),
        ("offset-y", OFFSET_Y),
    ];

    /// Look up a parameter code by its kebab-case name.
    pub fn by_name(name: &str) -> Option<u8> {
        NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, code)| *code)
    }
}
