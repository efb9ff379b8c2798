//! Additive 7-bit checksum for effect-definition frames.

use crate::protocol::{CHECKSUM_START, SYSEX_END, SYSEX_START};

/// Checksum byte for `body`: the value that brings the 7-bit sum of
/// `body` plus itself to zero.
pub fn checksum(body: &[u8]) -> u8 {
    let sum = sum7(body);
    (0x80 - sum) & 0x7f
}

/// Sum of `bytes` modulo 128.
pub fn sum7(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b)) & 0x7f
}

/// Check a complete effect-definition frame.
///
/// Returns false for anything that is not `F0 .. checksum F7` or too short
/// to carry a checksummed body.
pub fn verify(frame: &[u8]) -> bool {
    let len = frame.len();
    if len < CHECKSUM_START + 2 || frame[0] != SYSEX_START || frame[len - 1] != SYSEX_END {
        return false;
    }
    sum7(&frame[CHECKSUM_START..len - 1]) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_zeroes_the_sum() {
        let body = [0x23, 0x0d, 0x7f, 0x10, 0x00];
        let sum = checksum(&body);
        let mut all = body.to_vec();
        all.push(sum);
        assert_eq!(sum7(&all), 0);
    }

    #[test]
    fn zero_sum_gives_zero_checksum() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum(&[0x40, 0x40]), 0);
    }

    #[test]
    fn checksum_is_seven_bit() {
        for b in 0..=u8::MAX {
            assert!(checksum(&[b]) <= 0x7f);
        }
    }

    #[test]
    fn verify_rejects_tampered_frames() {
        let mut frame = vec![0xf0, 0x00, 0x01, 0x0a, 0x01, 0x23, 0x10];
        let sum = checksum(&frame[CHECKSUM_START..]);
        frame.push(sum);
        frame.push(0xf7);
        assert!(verify(&frame));

        frame[6] = 0x11;
        assert!(!verify(&frame));
    }

    #[test]
    fn verify_rejects_unframed_input() {
        assert!(!verify(&[]));
        assert!(!verify(&[0xc5, 0x01]));
        assert!(!verify(&[0xf0, 0x00, 0x01, 0x0a, 0x01, 0x00, 0x00]));
    }
}
