use ffbmidi_frame::checksum::sum7;
use ffbmidi_frame::protocol::CHECKSUM_START;
use ffbmidi_frame::{
    encode_descriptor, encode_effect, encode_modify, join14, split14, verify, Condition,
    ConditionKind, Effect, EffectBody, EffectDescriptor, EffectType, FrameError, Friction,
    Periodic, TypeTag, Waveform, MAX_14BIT,
};
use proptest::prelude::*;

fn waveform() -> impl Strategy<Value = Waveform> {
    prop_oneof![
        Just(Waveform::Constant),
        Just(Waveform::Sine),
        Just(Waveform::Square),
        Just(Waveform::Ramp),
        Just(Waveform::Triangle),
        Just(Waveform::SawtoothDown),
        Just(Waveform::SawtoothUp),
    ]
}

fn condition_kind() -> impl Strategy<Value = ConditionKind> {
    prop_oneof![
        Just(ConditionKind::Spring),
        Just(ConditionKind::Damper),
        Just(ConditionKind::Inertia),
    ]
}

fn periodic() -> impl Strategy<Value = Periodic> {
    (
        waveform(),
        any::<u16>(),
        any::<u8>(),
        any::<u16>(),
        any::<u8>(),
        any::<u16>(),
        any::<u16>(),
        any::<u8>(),
        any::<u16>(),
        any::<u16>(),
    )
        .prop_map(
            |(
                waveform,
                direction,
                strength,
                sample_rate,
                attack_level,
                attack_time,
                fade_time,
                fade_level,
                frequency,
                amplitude,
            )| Periodic {
                waveform,
                direction,
                strength,
                sample_rate,
                attack_level,
                attack_time,
                fade_time,
                fade_level,
                frequency,
                amplitude,
            },
        )
}

fn body() -> impl Strategy<Value = EffectBody> {
    prop_oneof![
        periodic().prop_map(EffectBody::Periodic),
        (condition_kind(), any::<u8>(), any::<u8>(), any::<u16>(), any::<u16>()).prop_map(
            |(kind, strength_x, strength_y, offset_x, offset_y)| {
                EffectBody::Condition(Condition {
                    kind,
                    strength_x,
                    strength_y,
                    offset_x,
                    offset_y,
                })
            }
        ),
        (any::<u8>(), any::<u8>()).prop_map(|(strength_x, strength_y)| {
            EffectBody::Friction(Friction {
                strength_x,
                strength_y,
            })
        }),
    ]
}

fn effect() -> impl Strategy<Value = Effect> {
    (any::<u16>(), any::<u16>(), body()).prop_map(|(duration, button_mask, body)| Effect {
        duration,
        button_mask,
        body,
    })
}

proptest! {
    #[test]
    fn split_then_join_is_identity(v in 0u16..=MAX_14BIT) {
        let (lo, hi) = split14(v);
        prop_assert!(lo <= 0x7f && hi <= 0x7f);
        prop_assert_eq!(join14(lo, hi), v);
    }

    #[test]
    fn wide_values_truncate_modulo_16384(v in (MAX_14BIT + 1)..=u16::MAX) {
        prop_assert_eq!(split14(v), split14(v % 16384));
    }

    #[test]
    fn effect_frames_checksum_to_zero(effect in effect()) {
        let frame = encode_effect(&effect);
        let bytes = frame.as_bytes();
        prop_assert_eq!(sum7(&bytes[CHECKSUM_START..bytes.len() - 1]), 0);
        prop_assert!(verify(bytes));
    }

    #[test]
    fn effect_frames_have_category_length(effect in effect()) {
        let expected = match effect.body {
            EffectBody::Periodic(_) => 34,
            EffectBody::Condition(_) => 22,
            EffectBody::Friction(_) => 18,
        };
        prop_assert_eq!(encode_effect(&effect).len(), expected);
    }

    #[test]
    fn effect_frames_are_seven_bit_between_delimiters(effect in effect()) {
        let frame = encode_effect(&effect);
        let bytes = frame.as_bytes();
        prop_assert_eq!(bytes[0], 0xf0);
        prop_assert_eq!(bytes[bytes.len() - 1], 0xf7);
        prop_assert!(bytes[1..bytes.len() - 1].iter().all(|b| *b <= 0x7f));
    }

    #[test]
    fn header_fields_reconstruct(effect in effect()) {
        let frame = encode_effect(&effect);
        let b = frame.as_bytes();
        prop_assert_eq!(b[6], effect.effect_type().code());
        prop_assert_eq!(join14(b[8], b[9]), effect.duration & MAX_14BIT);
        prop_assert_eq!(join14(b[10], b[11]), effect.button_mask & MAX_14BIT);
    }

    #[test]
    fn modify_carries_value_halves(id in 0u8..=0x7f, param in 0u8..=0x7f, value in any::<u16>()) {
        let frame = encode_modify(id, param, value);
        let b = frame.as_bytes();
        prop_assert_eq!(&b[..4], &[0xb5, param, id, 0xa5]);
        prop_assert_eq!(join14(b[4], b[5]), value & MAX_14BIT);
    }

    #[test]
    fn unknown_type_codes_are_rejected(code in any::<u8>()) {
        let desc = EffectDescriptor { effect_type: code.into(), ..EffectDescriptor::default() };
        match EffectType::from_code(code) {
            Some(_) => prop_assert!(encode_descriptor(&desc).is_ok()),
            None => prop_assert!(matches!(
                encode_descriptor(&desc),
                Err(FrameError::InvalidEffectType(TypeTag::Code(c))) if c == code
            )),
        }
    }
}
