//! CRC-16/CCITT as computed by the AVR `_crc_ccitt_update` routine.
//!
//! Both ends seed the running value with [`CRC_INIT`] and feed it the `LEN`
//! byte followed by every payload byte. The transmitter appends the result
//! low byte first; the receiver recomputes and compares.

use crate::consts::CRC_INIT;

/// Folds one byte into a running CRC-16/CCITT value.
pub fn crc_ccitt_update(crc: u16, data: u8) -> u16 {
    let mut d = u16::from(data);
    d ^= lo8(crc);
    d ^= d << 4;
    d &= 0xff; // only the low byte takes part in the next step

    ((d << 8) | hi8(crc)) ^ (d >> 4) ^ (d << 3)
}

/// Computes the CRC of a whole slice, seeded with [`CRC_INIT`].
pub fn crc16_ccitt(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(CRC_INIT, |crc, &b| crc_ccitt_update(crc, b))
}

/// Returns `true` if `crc` is the checksum of `bytes`.
pub fn verify(bytes: &[u8], crc: u16) -> bool {
    crc16_ccitt(bytes) == crc
}

fn lo8(x: u16) -> u16 {
    x & 0xff
}

fn hi8(x: u16) -> u16 {
    x >> 8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LEN_FIELD_OVERHEAD, MAX_PAYLOAD_LEN};

    #[test]
    fn test_empty_input_is_init() {
        assert_eq!(crc16_ccitt(&[]), CRC_INIT);
    }

    #[test]
    fn test_known_check_value() {
        // CRC-16/MCRF4XX check value (reflected 0x1021, init 0xffff, no xorout)
        assert_eq!(crc16_ccitt(b"123456789"), 0x6f91);
    }

    #[test]
    fn test_update_matches_slice_fold() {
        let data = [0x08, 0x00, 0xdf, 0x00, 0xa3, 0x02];
        let mut crc = CRC_INIT;
        for &b in &data {
            crc = crc_ccitt_update(crc, b);
        }
        assert_eq!(crc, crc16_ccitt(&data));
    }

    #[test]
    fn test_verify_accepts_own_checksum() {
        let data = b"telemetry";
        assert!(verify(data, crc16_ccitt(data)));
    }

    /// `LEN` followed by `len - 1` bytes of a fixed pseudo-random pattern.
    fn frame_body(len: usize) -> Vec<u8> {
        let mut body: Vec<u8> = (0..len)
            .map(|i| (i as u8).wrapping_mul(151).wrapping_add(29))
            .collect();
        body[0] = (len - 1) as u8 + LEN_FIELD_OVERHEAD;
        body
    }

    #[test]
    fn test_single_bit_flip_in_data_is_detected() {
        for len in 1..=MAX_PAYLOAD_LEN + 1 {
            let data = frame_body(len);
            let crc = crc16_ccitt(&data);
            for byte in 0..data.len() {
                for bit in 0..8 {
                    let mut corrupted = data.clone();
                    corrupted[byte] ^= 1 << bit;
                    assert!(
                        !verify(&corrupted, crc),
                        "len {len}: flip at {byte}:{bit} went unnoticed"
                    );
                }
            }
        }
    }

    #[test]
    fn test_single_bit_flip_in_checksum_is_detected() {
        for len in 1..=MAX_PAYLOAD_LEN + 1 {
            let data = frame_body(len);
            let crc = crc16_ccitt(&data);
            for bit in 0..16 {
                assert!(!verify(&data, crc ^ (1 << bit)), "len {len}: bit {bit}");
            }
        }
    }
}
