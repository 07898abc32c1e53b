//! Link timing configuration.
//!
//! Both ends have to agree on the half-bit duration. The transmitter only
//! needs that and the gap between packets; the receiver needs its own tick
//! rate, from which the pulse classification windows follow.

use crate::pulse::PulseThresholds;
use crate::timer::ticks_per_half_bit;

/// Receiver tick rate used by [`LinkConfig::default`], in Hz.
pub const DEFAULT_TICK_HZ: u32 = 8_097;

/// Half-bit duration used by [`LinkConfig::default`], in microseconds.
pub const DEFAULT_HALF_BIT_US: u32 = 2_000;

/// Idle time between transmissions used by [`LinkConfig::default`], in milliseconds.
pub const DEFAULT_GAP_MS: u32 = 3_000;

/// Minimum number of samples a reception window must exceed before a decode
/// is attempted.
pub const DEFAULT_MIN_RAW_BITS: usize = 30;

/// Timing and trigger settings shared by [`Transmitter`](crate::tx::Transmitter)
/// and [`Receiver`](crate::rx::Receiver).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct LinkConfig {
    /// Rate at which the receiver's `tick()` is called, in Hz.
    pub tick_hz: u32,
    /// Duration of one Manchester half-bit, in microseconds.
    pub half_bit_us: u32,
    /// Idle time the transmitter waits after each packet, in milliseconds.
    pub gap_ms: u32,
    /// Pulse classification windows, in receiver ticks.
    pub thresholds: PulseThresholds,
    /// A reception window must hold more samples than this to be decoded.
    pub min_raw_bits: usize,
}

impl LinkConfig {
    /// Creates a configuration for the given receiver tick rate and
    /// half-bit duration, deriving the classification windows.
    pub const fn new(tick_hz: u32, half_bit_us: u32) -> Self {
        Self {
            tick_hz,
            half_bit_us,
            gap_ms: DEFAULT_GAP_MS,
            thresholds: PulseThresholds::for_half_bit(ticks_per_half_bit(tick_hz, half_bit_us)),
            min_raw_bits: DEFAULT_MIN_RAW_BITS,
        }
    }

    /// Sets the idle time between transmissions.
    pub const fn with_gap_ms(mut self, gap_ms: u32) -> Self {
        self.gap_ms = gap_ms;
        self
    }

    /// Replaces the derived classification windows.
    pub const fn with_thresholds(mut self, thresholds: PulseThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Nominal receiver ticks per half-bit.
    pub const fn ticks_per_half_bit(&self) -> u16 {
        ticks_per_half_bit(self.tick_hz, self.half_bit_us)
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_HZ, DEFAULT_HALF_BIT_US)
    }
}
