//! Receiver link driver.
//!
//! This module provides the [`Receiver`] struct, which turns a sampled input
//! pin into decoded [`SensorRecord`]s. All of the work happens in
//! [`tick()`](Receiver::tick), which must be called at a fixed rate (the
//! configured `tick_hz`), usually from a timer interrupt:
//!
//! 1. The [`PulseClassifier`] turns edges into line samples in the raw buffer.
//! 2. An idle pulse ends the reception window. If it holds more than
//!    `min_raw_bits` samples, the window is decoded on the spot: sync search,
//!    Manchester decode, frame parse, CRC check, record decode.
//! 3. The raw buffer is reset whatever the decode outcome.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use manchester433::config::LinkConfig;
//! use manchester433::report::LogSink;
//! use manchester433::rx::Receiver;
//!
//! fn main() {
//!     # let rx_pin = Pin::new(&[PinTransaction::get(PinState::Low)]);
//!     let mut receiver = Receiver::new(rx_pin, LogSink, LinkConfig::default());
//!
//!     loop {
//!         let _ = receiver.tick(); // Called at 8097 Hz by a timer interrupt
//!         # break; // For testing purposes
//!     }
//!     # receiver.rx.done();
//! }
//! ```
//!
//! ## Design Notes
//!
//! Decoding runs to completion inside the tick that triggered it, with the
//! receiver borrowed mutably for the whole time. When the receiver lives in a
//! `critical_section::Mutex` (see [`crate::timer`]) no other tick can run
//! until the decode is finished. Every loop is bounded by the fixed buffer
//! capacities in [`crate::consts`].

use core::convert::Infallible;

use embedded_hal::digital::InputPin;
use heapless::Vec;

use crate::config::LinkConfig;
use crate::consts::{DECODED_BUF_LEN, RAW_BUF_LEN};
use crate::error::{Buffer, LinkError};
use crate::frame;
use crate::manchester::decode_bits;
use crate::pulse::{Pulse, PulseClassifier};
use crate::record::SensorRecord;
use crate::report::{LinkEvent, ReportSink};
use crate::sync::find_sync;

/// What one sample produced: nothing, or the outcome of a packet attempt.
pub type Outcome = Option<Result<SensorRecord, LinkError>>;

/// All mutable state of the receive path.
///
/// Owned by a single [`Receiver`]; the tick path is its only writer.
#[derive(Debug, Default)]
pub struct ReceiverState {
    /// Edge detector and pulse-width counter.
    classifier: PulseClassifier,

    /// Line samples collected since the last idle pulse.
    raw: Vec<bool, RAW_BUF_LEN>,

    /// Bytes decoded from the current window.
    decoded: Vec<u8, DECODED_BUF_LEN>,

    /// Number of decodes attempted, wrapping.
    pub packet_counter: u8,

    /// Number of records decoded from verified frames.
    pub rx_good: u16,

    /// Number of packet attempts discarded.
    pub rx_bad: u16,

    /// The last record decoded and not yet read.
    last_record: Option<SensorRecord>,
}

impl ReceiverState {
    /// Creates an empty state with the line assumed idle low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples collected in the current reception window.
    pub fn raw_bits(&self) -> &[bool] {
        &self.raw
    }

    /// The edge detector, for inspecting the current level and pulse width.
    pub fn classifier(&self) -> &PulseClassifier {
        &self.classifier
    }

    /// Bytes decoded by the most recent decode.
    pub fn decoded_bytes(&self) -> &[u8] {
        &self.decoded
    }

    /// Discards the current reception window.
    pub fn reset(&mut self) {
        self.raw.clear();
    }

    /// Takes the last decoded record, if any.
    pub fn take_record(&mut self) -> Option<SensorRecord> {
        self.last_record.take()
    }

    /// Feeds one tick's sample through the pulse classifier.
    ///
    /// Returns the outcome of a packet attempt when this sample ended one,
    /// either by triggering a decode or by overflowing the raw buffer.
    pub fn on_sample<S: ReportSink>(
        &mut self,
        sample: bool,
        config: &LinkConfig,
        sink: &mut S,
    ) -> Outcome {
        let pulse = self.classifier.update(sample, &config.thresholds)?;
        match pulse {
            Pulse::Noise => None,
            Pulse::Single(_) | Pulse::Double(_) => {
                if self.raw.extend_from_slice(pulse.bits()).is_ok() {
                    return None;
                }
                let err = LinkError::BufferOverflow(Buffer::Raw);
                self.reset();
                self.reject(err, sink);
                Some(Err(err))
            }
            Pulse::Idle => {
                let outcome = if self.raw.len() > config.min_raw_bits {
                    Some(self.decode(sink))
                } else {
                    if !self.raw.is_empty() {
                        trace!("dropping {} stray samples", self.raw.len());
                    }
                    None
                };
                self.reset();
                outcome
            }
        }
    }

    /// Decodes the current reception window.
    ///
    /// Reports every stage to `sink` and ends with either
    /// [`LinkEvent::Decoded`] or [`LinkEvent::Rejected`]. A verified record is
    /// also latched for [`take_record`](Self::take_record). The raw buffer is
    /// left untouched.
    pub fn decode<S: ReportSink>(&mut self, sink: &mut S) -> Result<SensorRecord, LinkError> {
        let index = self.packet_counter;
        self.packet_counter = self.packet_counter.wrapping_add(1);
        sink.report(LinkEvent::PacketStart {
            index,
            raw_bits: self.raw.len(),
        });

        match self.decode_window(sink) {
            Ok(record) => {
                self.rx_good = self.rx_good.wrapping_add(1);
                self.last_record = Some(record);
                sink.report(LinkEvent::Decoded(record));
                Ok(record)
            }
            Err(err) => {
                self.reject(err, sink);
                Err(err)
            }
        }
    }

    fn decode_window<S: ReportSink>(&mut self, sink: &mut S) -> Result<SensorRecord, LinkError> {
        let sync = find_sync(&self.raw);
        sink.report(LinkEvent::Sync(sync));

        // Without a sync vector, decode from the start and let the CRC judge.
        let start = sync.unwrap_or(0);
        self.decoded.clear();
        let summary = decode_bits(&self.raw[start..], &mut self.decoded)?;
        if summary.invalid_pairs > 0 {
            sink.report(LinkEvent::InvalidPairs(summary.invalid_pairs));
        }

        let frame = frame::parse(&self.decoded)?;
        sink.report(LinkEvent::Checksum {
            computed: frame.computed_crc,
            received: frame.received_crc,
        });
        if !frame.length_consistent() {
            debug!(
                "LEN byte {} disagrees with {} payload bytes",
                frame.length,
                frame.payload.len()
            );
        }

        let record = SensorRecord::from_payload(frame.payload)?;
        frame.check()?;
        Ok(record)
    }

    fn reject<S: ReportSink>(&mut self, err: LinkError, sink: &mut S) {
        self.rx_bad = self.rx_bad.wrapping_add(1);
        sink.report(LinkEvent::Rejected(err));
    }
}

/// A pulse-width Manchester receiver on one input pin.
///
/// ## Type Parameters
///
/// - `RX`: A type implementing [`embedded_hal::digital::InputPin`] wired to the
///   radio module's data output
/// - `S`: The [`ReportSink`] that receives decode events
///
/// ## Notes
///
/// - Only one `Receiver` should be driven from an interrupt at a time.
/// - You are responsible for calling `tick()` at `config.tick_hz`.
#[derive(Debug)]
pub struct Receiver<RX, S>
where
    RX: InputPin,
    S: ReportSink,
{
    /// RX pin
    pub rx: RX,
    /// Destination of decode events
    pub sink: S,
    /// Timing and trigger settings
    pub config: LinkConfig,
    /// Sampling and decode state
    pub state: ReceiverState,
}

impl<RX, S> Receiver<RX, S>
where
    RX: InputPin,
    S: ReportSink,
{
    /// Creates a new `Receiver` on the given pin.
    ///
    /// # Arguments
    /// - `rx`: The input pin connected to the receiver module.
    /// - `sink`: Where decode events are reported.
    /// - `config`: Link timing; `config.tick_hz` must match the rate `tick()`
    ///   is called at.
    pub fn new(rx: RX, sink: S, config: LinkConfig) -> Self {
        Self {
            rx,
            sink,
            config,
            state: ReceiverState::new(),
        }
    }

    /// Samples the RX pin and advances the receive state machine by one tick.
    ///
    /// A failed pin read counts as "no change" so it can never fake an edge.
    pub fn tick(&mut self) -> Outcome {
        let level = self.state.classifier.last_level();
        let sample = self.rx.is_high().unwrap_or(level);
        self.sample(sample)
    }

    /// Advances the receive state machine with an externally read sample.
    pub fn sample(&mut self, level: bool) -> Outcome {
        self.state.on_sample(level, &self.config, &mut self.sink)
    }

    /// Returns the last verified record, or `WouldBlock` if none arrived since
    /// the previous call.
    ///
    /// ```rust,ignore
    /// let record = nb::block!(receiver.read()).unwrap();
    /// ```
    pub fn read(&mut self) -> nb::Result<SensorRecord, Infallible> {
        self.state.take_record().ok_or(nb::Error::WouldBlock)
    }
}
