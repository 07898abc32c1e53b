//! Timer and tick-loop utilities for the link drivers.
//!
//! The receiver needs `tick()` called at a fixed rate. This employs two
//! approaches: an interrupt service routine using `critical_section::with`
//! (`timer-isr` feature), or a busy-loop delay timer (`delay-loop` feature).
//!
//! Contains helpers for polling- and ISR-based scheduling, including:
//! - `compute_ocr_value`: runtime OCR calculator
//! - `const_ocr_value`: compile-time OCR calculator
//! - `ticks_per_half_bit`: receiver ticks per Manchester half-bit
//! - `run_receive_tick_loop` / `run_transmit_loop`: blocking driver loops for
//!   `DelayNs` (feature `delay-loop`)
//! - `global_receiver_tick` and `tick_link_receiver!()`: interrupt-based tick
//!   callback wrappers (feature `timer-isr`)
//!
//! For an AVR timer in CTC mode the tick rate is
//! `f_cpu / (prescaler * (OCR + 1))`. A few values for the default 8097 Hz
//! tick:
//!
//! | F_CPU     | PRESCALER | OCR |
//! |-----------|-----------|-----|
//! | 4.34 MHz  |         8 |  66 |
//! | 8 MHz     |         8 | 123 |
//! | 16 MHz    |         8 | 246 |

use libm::round;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// 1,000,000 microseconds = 1 second
pub const MICROSECONDS_PER_SECOND: u32 = 1_000_000;

/// Computes the OCR value for an AVR timer (CTC mode)
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 8, 64, 256)
/// - `tick_hz`: desired tick rate in Hz (e.g., 8097)
///
/// # Returns
/// - OCR value for OCRnA (rounds to nearest integer)
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, tick_hz: u32) -> u16 {
    let counts = f_cpu as f64 / (prescaler as f64 * tick_hz as f64);
    (round(counts) as u16).saturating_sub(1)
}

/// Compile-time OCR value calculator
///
/// Same as [`compute_ocr_value`] using integer arithmetic.
pub const fn const_ocr_value(f_cpu: u32, prescaler: u32, tick_hz: u32) -> u16 {
    let divisor = prescaler as u64 * tick_hz as u64;
    let counts = (f_cpu as u64 + divisor / 2) / divisor;
    (counts as u16).saturating_sub(1)
}

/// Compute receiver ticks per half-bit, rounded down
///
/// Saturates at `u16::MAX`.
///
/// # Arguments
/// - `tick_hz`: receiver tick rate in Hz
/// - `half_bit_us`: Manchester half-bit duration in microseconds
pub const fn ticks_per_half_bit(tick_hz: u32, half_bit_us: u32) -> u16 {
    let ticks = tick_hz as u64 * half_bit_us as u64 / MICROSECONDS_PER_SECOND as u64;
    if ticks > u16::MAX as u64 {
        u16::MAX
    } else {
        ticks as u16
    }
}
