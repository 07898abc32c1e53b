//! Manchester line coding for the telemetry link.
//!
//! Every data bit is sent as two half-bit line levels whose transition
//! direction carries the value:
//!
//! | Data bit | First half | Second half |
//! |----------|------------|-------------|
//! | `1`      | low        | high        |
//! | `0`      | high       | low         |
//!
//! Bytes are sent most-significant bit first.
//!
//! ## Receive polarity
//!
//! The pulse classifier records the level seen *after* each edge, so the
//! receiver's sample stream is the complement of the transmitted half-bits.
//! [`decode_bits`] works on that sample stream: a sample pair `(1, 0)` is a
//! data `1` and `(0, 1)` is a data `0`.
//!
//! ## Invalid pairs
//!
//! `(0, 0)` and `(1, 1)` cannot come out of the encoder. They are decoded as
//! `0` and counted, never rejected on the spot. The frame CRC is what decides
//! whether a packet is usable.

use heapless::Vec;

use crate::consts::HALF_BITS_PER_BYTE;
use crate::error::{Buffer, LinkError};

/// What a pair of received samples stands for.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum PairKind {
    /// Samples `(1, 0)`.
    One,
    /// Samples `(0, 1)`.
    Zero,
    /// Samples `(0, 0)` or `(1, 1)`.
    Invalid,
}

/// Totals collected while decoding one sample stream.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct DecodeSummary {
    /// Number of bytes appended to the output buffer.
    pub bytes: usize,
    /// Number of `(0, 0)` / `(1, 1)` pairs that were decoded leniently.
    pub invalid_pairs: usize,
}

/// Encodes one byte into its sixteen transmitted half-bit levels, MSB first.
///
/// `true` is a high line level.
pub fn encode_byte(byte: u8) -> [bool; HALF_BITS_PER_BYTE] {
    let mut levels = [false; HALF_BITS_PER_BYTE];
    for (i, half) in levels.chunks_exact_mut(2).enumerate() {
        let bit = byte & (0x80 >> i) != 0;
        // 1 => low then high, 0 => high then low
        half[0] = !bit;
        half[1] = bit;
    }
    levels
}

/// Classifies a pair of received samples.
pub fn classify_pair(first: bool, second: bool) -> PairKind {
    match (first, second) {
        (true, false) => PairKind::One,
        (false, true) => PairKind::Zero,
        _ => PairKind::Invalid,
    }
}

/// Decodes a pair of received samples to a data bit, leniently.
///
/// Invalid pairs decode as `0`.
pub fn decode_pair(first: bool, second: bool) -> bool {
    classify_pair(first, second) == PairKind::One
}

/// Decodes a received sample stream into bytes, MSB first.
///
/// Samples are consumed two at a time. A single trailing sample that would
/// complete a byte is decoded from its first half alone: the closing half of
/// the last bit can merge into the idle gap after the frame. Any other
/// trailing samples that do not make up a whole byte are dropped.
///
/// # Errors
/// Returns [`LinkError::BufferOverflow`] if `out` fills up before the stream
/// is exhausted. Bytes decoded up to that point stay in `out`.
pub fn decode_bits<const N: usize>(
    bits: &[bool],
    out: &mut Vec<u8, N>,
) -> Result<DecodeSummary, LinkError> {
    let mut summary = DecodeSummary::default();
    let mut byte: u8 = 0;
    let mut filled: u8 = 0;

    for pair in bits.chunks(2) {
        let bit = match *pair {
            [first, second] => match classify_pair(first, second) {
                PairKind::One => true,
                PairKind::Zero => false,
                PairKind::Invalid => {
                    summary.invalid_pairs += 1;
                    false
                }
            },
            [first] if filled == 7 => first,
            _ => break,
        };

        byte = (byte << 1) | u8::from(bit);
        filled += 1;
        if filled == 8 {
            out.push(byte)
                .map_err(|_| LinkError::BufferOverflow(Buffer::Decoded))?;
            summary.bytes += 1;
            byte = 0;
            filled = 0;
        }
    }
    Ok(summary)
}
