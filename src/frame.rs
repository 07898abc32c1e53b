//! Packet framing.
//!
//! A frame on the wire, in transmission order:
//!
//! ```text
//! [00][00][03][LEN][payload ...][CRC_LO][CRC_HI]
//! ```
//!
//! - `LEN` is the payload length plus 3: it counts itself, the payload and
//!   the CRC trailer.
//! - The CRC is CRC-16/CCITT over `LEN` and the payload, seeded with
//!   [`CRC_INIT`](crate::consts::CRC_INIT), sent low byte first.
//!
//! The receiver only decodes from the byte after the sync vector, so
//! [`parse`] takes the bytes starting at `LEN`.

use heapless::Vec;

use crate::consts::{
    CRC_INIT, CRC_LEN, LEN_FIELD_OVERHEAD, MAX_FRAME_LEN, MAX_PAYLOAD_LEN, PREAMBLE, SYNC_BYTE,
};
use crate::crc::{crc16_ccitt, crc_ccitt_update};
use crate::error::{Buffer, LinkError};

/// Offset of the `LEN` byte within a built frame.
pub const LEN_OFFSET: usize = PREAMBLE.len() + 1;

/// Smallest buffer [`parse`] accepts: `LEN` plus the CRC trailer.
pub const MIN_PARSE_LEN: usize = 1 + CRC_LEN;

/// Builds a complete frame around `payload`.
///
/// # Errors
/// [`LinkError::BufferOverflow`] if `payload` is longer than
/// [`MAX_PAYLOAD_LEN`].
pub fn build(payload: &[u8]) -> Result<Vec<u8, MAX_FRAME_LEN>, LinkError> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(LinkError::BufferOverflow(Buffer::Transmit));
    }

    let mut frame: Vec<u8, MAX_FRAME_LEN> = Vec::new();
    frame.extend_from_slice(&PREAMBLE).map_err(overflow)?;
    frame.push(SYNC_BYTE).map_err(overflow)?;

    let len = payload.len() as u8 + LEN_FIELD_OVERHEAD;
    let mut crc = crc_ccitt_update(CRC_INIT, len);
    frame.push(len).map_err(overflow)?;

    for &b in payload {
        crc = crc_ccitt_update(crc, b);
        frame.push(b).map_err(overflow)?;
    }

    frame.extend_from_slice(&crc.to_le_bytes()).map_err(overflow)?;
    Ok(frame)
}

fn overflow<E>(_: E) -> LinkError {
    LinkError::BufferOverflow(Buffer::Transmit)
}

/// A received frame, split into its fields, with both CRC values kept.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct ParsedFrame<'a> {
    /// The leading `LEN` byte as received.
    pub length: u8,
    /// Everything between `LEN` and the CRC trailer.
    pub payload: &'a [u8],
    /// CRC recomputed over `LEN` and the payload.
    pub computed_crc: u16,
    /// CRC carried in the trailer.
    pub received_crc: u16,
}

impl ParsedFrame<'_> {
    /// Whether the recomputed CRC matches the trailer.
    pub fn crc_ok(&self) -> bool {
        self.computed_crc == self.received_crc
    }

    /// Turns a CRC disagreement into [`LinkError::ChecksumMismatch`].
    pub fn check(&self) -> Result<(), LinkError> {
        if self.crc_ok() {
            Ok(())
        } else {
            Err(LinkError::ChecksumMismatch {
                computed: self.computed_crc,
                received: self.received_crc,
            })
        }
    }

    /// Whether the `LEN` byte agrees with the number of bytes received.
    ///
    /// The receiver does not enforce this; the CRC already covers `LEN`.
    pub fn length_consistent(&self) -> bool {
        usize::from(self.length) == self.payload.len() + usize::from(LEN_FIELD_OVERHEAD)
    }
}

/// Splits decoded bytes, starting at `LEN`, into a [`ParsedFrame`].
///
/// The last two bytes are taken as the CRC trailer whatever `LEN` says, and
/// the payload is handed back whether or not the CRC matches.
///
/// # Errors
/// [`LinkError::LengthMismatch`] if fewer than [`MIN_PARSE_LEN`] bytes are
/// given.
pub fn parse(bytes: &[u8]) -> Result<ParsedFrame<'_>, LinkError> {
    if bytes.len() < MIN_PARSE_LEN {
        return Err(LinkError::LengthMismatch {
            expected: MIN_PARSE_LEN,
            received: bytes.len(),
        });
    }
    let (body, trailer) = bytes.split_at(bytes.len() - CRC_LEN);
    Ok(ParsedFrame {
        length: body[0],
        payload: &body[1..],
        computed_crc: crc16_ccitt(body),
        received_crc: u16::from_le_bytes([trailer[0], trailer[1]]),
    })
}
