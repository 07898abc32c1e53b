//! Reporting decode results to the outside world.
//!
//! The receiver has nothing to return to: it runs inside a timer interrupt.
//! Instead it hands a [`LinkEvent`] to a [`ReportSink`] at each stage of a
//! decode. What the sink does with it (UART, RTT, a test vector) is up to the
//! application. [`LogSink`] renders events through the crate's `log`/`defmt`
//! backend.

use crate::error::LinkError;
use crate::record::SensorRecord;

/// Something the receiver wants the application to know.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum LinkEvent {
    /// An idle pulse ended a reception window with enough samples to decode.
    PacketStart {
        /// Running packet counter, wrapping.
        index: u8,
        /// Samples collected in the window.
        raw_bits: usize,
    },
    /// Result of the sync search: the sample index where `LEN` starts, or
    /// `None` when decoding falls back to the start of the window.
    Sync(Option<usize>),
    /// Invalid Manchester pairs were decoded leniently.
    InvalidPairs(usize),
    /// Both CRC values of the received frame.
    Checksum {
        /// CRC recomputed by the receiver.
        computed: u16,
        /// CRC carried in the frame trailer.
        received: u16,
    },
    /// A record was decoded from a verified frame.
    Decoded(SensorRecord),
    /// The packet attempt was discarded.
    Rejected(LinkError),
}

/// Receives [`LinkEvent`]s from the receiver.
pub trait ReportSink {
    /// Called synchronously from the decode path; keep it short.
    fn report(&mut self, event: LinkEvent);
}

impl<F> ReportSink for F
where
    F: FnMut(LinkEvent),
{
    fn report(&mut self, event: LinkEvent) {
        (self)(event)
    }
}

/// A [`ReportSink`] that writes every event to the log.
///
/// Compiles to nothing unless the `log` or `defmt-0-3` feature is enabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::PacketStart { index, raw_bits } => {
                debug!("= Packet {} = raw bits ({})", index, raw_bits)
            }
            LinkEvent::Sync(Some(start)) => debug!("data starts at bit {}", start),
            LinkEvent::Sync(None) => warn!("sync vector not found, decoding from bit 0"),
            LinkEvent::InvalidPairs(count) => debug!("{} invalid manchester pairs", count),
            LinkEvent::Checksum { computed, received } if computed == received => {
                debug!("CRC verified")
            }
            LinkEvent::Checksum { computed, received } => {
                warn!(
                    "CRC mismatch, expected {:#x}, got {:#x}",
                    computed, received
                )
            }
            LinkEvent::Decoded(record) => info!(
                "Decoded data: status {} temp {} humidity {}",
                record.status, record.temp, record.humidity
            ),
            LinkEvent::Rejected(LinkError::LengthMismatch { expected, received }) => warn!(
                "Expected to receive {} bytes, but received {} bytes.",
                expected, received
            ),
            LinkEvent::Rejected(err) => warn!("packet dropped: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |event: LinkEvent| seen.push(event);
            sink.report(LinkEvent::Sync(None));
            sink.report(LinkEvent::InvalidPairs(2));
        }
        assert_eq!(seen, [LinkEvent::Sync(None), LinkEvent::InvalidPairs(2)]);
    }

    #[test]
    fn test_log_sink_accepts_every_event() {
        let mut sink = LogSink;
        for event in [
            LinkEvent::PacketStart {
                index: 0,
                raw_bits: 175,
            },
            LinkEvent::Sync(Some(48)),
            LinkEvent::Sync(None),
            LinkEvent::InvalidPairs(1),
            LinkEvent::Checksum {
                computed: 1,
                received: 1,
            },
            LinkEvent::Checksum {
                computed: 1,
                received: 2,
            },
            LinkEvent::Decoded(SensorRecord::new(0, 223, 675)),
            LinkEvent::Rejected(LinkError::Pin),
        ] {
            sink.report(event);
        }
    }
}
