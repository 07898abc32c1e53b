//! Constants used across the link implementation.
//!
//! This module defines the wire-level framing bytes, the sync vector the
//! receiver searches for, and the capacities of the fixed-size buffers used
//! on both sides of the link.
//!
//! ## Key Concepts
//!
//! - **Preamble**: Two zero bytes. Manchester coded, they become a run of
//!   alternating half-bits that lets the receiver settle on pulse widths.
//! - **Sync byte**: `0x03`. Its Manchester line image ends in the pattern
//!   `0xA5`, which is what the receiver actually matches.
//! - **Buffer sizing**: The raw sample buffer bounds how many line bits one
//!   reception window may hold; the decoded buffer bounds how many bytes one
//!   frame may decode to. Every loop in the receive path is bounded by these.

/// Number of zero bytes sent ahead of the sync byte.
pub const PREAMBLE_LEN: usize = 2;

/// The preamble bytes.
pub const PREAMBLE: [u8; PREAMBLE_LEN] = [0x00, 0x00];

/// The sync byte transmitted after the preamble.
pub const SYNC_BYTE: u8 = 0x03;

/// The line-level image of the tail of the sync byte.
///
/// `0x03` is `0b0000_0011`; its last four data bits encode to the half-bits
/// `10 10 01 01`, i.e. `0xA5`. Since the preamble never produces two equal
/// adjacent half-bits, the first occurrence marks the end of the sync byte.
pub const SYNC_VECTOR: u8 = 0xA5;

/// Initial value of the running CRC for each packet.
pub const CRC_INIT: u16 = 0xffff;

/// Length in bytes of the CRC trailer.
pub const CRC_LEN: usize = 2;

/// Bytes added to the payload length to form the `LEN` field.
///
/// The `LEN` field counts itself, the payload, and the two CRC bytes.
pub const LEN_FIELD_OVERHEAD: u8 = 3;

/// Capacity of the raw line-bit buffer on the receiver.
///
/// Large enough for every half-bit of a [`MAX_FRAME_LEN`] frame.
pub const RAW_BUF_LEN: usize = 576;

/// Capacity of the decoded byte buffer on the receiver.
pub const DECODED_BUF_LEN: usize = 32;

/// Maximum payload length that still fits in the receiver's decoded buffer.
///
/// The decoded buffer holds `LEN`, the payload and the two CRC bytes.
pub const MAX_PAYLOAD_LEN: usize = DECODED_BUF_LEN - 1 - CRC_LEN;

/// Maximum length of a full frame: preamble, sync, `LEN`, payload and CRC.
pub const MAX_FRAME_LEN: usize = PREAMBLE_LEN + 1 + 1 + MAX_PAYLOAD_LEN + CRC_LEN;

/// Number of line half-bits produced per data byte.
pub const HALF_BITS_PER_BYTE: usize = 16;

const _: () = assert!(MAX_FRAME_LEN * HALF_BITS_PER_BYTE <= RAW_BUF_LEN);
