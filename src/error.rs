//! Error types for the link.
//!
//! Every error here is scoped to a single packet attempt: the receiver
//! reports it, throws the attempt away and goes back to sampling.

use thiserror::Error;

/// Identifies which fixed-capacity buffer ran out of room.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Buffer {
    /// The receiver's raw line-sample buffer.
    Raw,
    /// The receiver's decoded byte buffer.
    Decoded,
    /// The transmitter's frame buffer.
    Transmit,
}

/// Errors produced while framing, decoding or driving the link.
#[derive(Error, PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum LinkError {
    /// The CRC recomputed over `LEN` and payload disagrees with the trailer.
    #[error("CRC mismatch, computed {computed:#06x}, received {received:#06x}")]
    ChecksumMismatch {
        /// CRC recomputed by the receiver.
        computed: u16,
        /// CRC carried in the frame trailer.
        received: u16,
    },

    /// The decoded data is not the expected number of bytes.
    #[error("expected to receive {expected} bytes, but received {received} bytes")]
    LengthMismatch {
        /// Number of bytes required.
        expected: usize,
        /// Number of bytes available.
        received: usize,
    },

    /// A fixed-capacity buffer would have been overrun.
    #[error("{0:?} buffer overflow")]
    BufferOverflow(Buffer),

    /// The GPIO collaborator reported an error.
    #[error("pin access failed")]
    Pin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LinkError::ChecksumMismatch {
            computed: 0x1234,
            received: 0x00ff,
        };
        assert_eq!(
            err.to_string(),
            "CRC mismatch, computed 0x1234, received 0x00ff"
        );
        let err = LinkError::LengthMismatch {
            expected: 5,
            received: 3,
        };
        assert_eq!(
            err.to_string(),
            "expected to receive 5 bytes, but received 3 bytes"
        );
        assert_eq!(
            LinkError::BufferOverflow(Buffer::Raw).to_string(),
            "Raw buffer overflow"
        );
    }
}
