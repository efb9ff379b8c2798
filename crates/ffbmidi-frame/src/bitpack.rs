//! 7-bit-safe packing.
//!
//! The MSB of every data byte is reserved for status bytes, so each byte
//! carries 7 bits of payload. 14-bit quantities travel as a low/high pair of
//! 7-bit halves, low half first.

use bytes::BufMut;

use crate::error::{FrameError, Result};

/// Largest value a single data byte can carry.
pub const MAX_7BIT: u8 = 0x7f;

/// Largest value a two-byte field can carry.
pub const MAX_14BIT: u16 = 0x3fff;

/// Low 7 bits of `value`.
#[inline]
pub fn lo7(value: u16) -> u8 {
    (value & 0x7f) as u8
}

/// Bits 7..14 of `value`.
#[inline]
pub fn hi7(value: u16) -> u8 {
    ((value >> 7) & 0x7f) as u8
}

/// Clear the reserved MSB of a single-byte field.
#[inline]
pub fn mask7(value: u8) -> u8 {
    value & MAX_7BIT
}

/// Split a 14-bit value into `(lo, hi)` 7-bit halves.
///
/// Bits above 14 are dropped silently, so `split14(v) == split14(v % 16384)`.
#[inline]
pub fn split14(value: u16) -> (u8, u8) {
    (lo7(value), hi7(value))
}

/// Reassemble a value produced by [`split14`].
#[inline]
pub fn join14(lo: u8, hi: u8) -> u16 {
    (u16::from(mask7(hi)) << 7) | u16::from(mask7(lo))
}

/// Append a 14-bit field, low half first.
pub fn put_u14<B: BufMut>(dst: &mut B, value: u16) {
    let (lo, hi) = split14(value);
    dst.put_u8(lo);
    dst.put_u8(hi);
}

/// Append a single-byte field with its MSB cleared.
pub fn put_u7<B: BufMut>(dst: &mut B, value: u8) {
    dst.put_u8(mask7(value));
}

/// Reject a single-byte field that would lose bits on the wire.
pub fn check_u7(field: &'static str, value: u8) -> Result<()> {
    if value > MAX_7BIT {
        return Err(FrameError::ValueOutOfRange {
            field,
            value: u32::from(value),
            max: u32::from(MAX_7BIT),
        });
    }
    Ok(())
}

/// Reject a two-byte field that would lose bits on the wire.
pub fn check_u14(field: &'static str, value: u16) -> Result<()> {
    if value > MAX_14BIT {
        return Err(FrameError::ValueOutOfRange {
            field,
            value: u32::from(value),
            max: u32::from(MAX_14BIT),
        });
    }
    Ok(())
}
