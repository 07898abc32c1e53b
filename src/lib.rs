//! # manchester433
//!
//! A portable, no_std Rust telemetry link for cheap 433 MHz OOK radio modules
//! such as the FS1000A and XY-MK-5V.
//!
//! One node samples a sensor and sends a small [`SensorRecord`](record::SensorRecord)
//! every few seconds; the other node samples its receiver pin at a fixed rate,
//! recovers the packet from pulse widths and checks it against a CRC.
//!
//! The link is built from:
//! - `embedded-hal` traits for digital I/O and timing
//! - Manchester line coding, MSB first
//! - a `00 00 03` preamble and sync header, a length byte and a CRC-CCITT trailer
//! - a pulse-width classifier and sync search on the receive side
//! - interrupt-safe receiver access with `critical-section`
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support |
//! | `delay-loop`          | Blocking tick and transmit loops on `embedded_hal::delay::DelayNs` |
//! | `timer-isr` (default) | Global receiver for a timer interrupt, behind `critical_section::with` |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Frame format
//!
//! ```text
//! +------+------+------+-----+-------------+--------+--------+
//! | 0x00 | 0x00 | 0x03 | LEN | payload ... | CRC lo | CRC hi |
//! +------+------+------+-----+-------------+--------+--------+
//! ```
//!
//! `LEN` is the payload length plus 3. The CRC covers `LEN` and the payload.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use manchester433::config::LinkConfig;
//! use manchester433::report::LogSink;
//! use manchester433::rx::Receiver;
//!
//! let mut receiver = Receiver::new(rx_pin, LogSink, LinkConfig::default());
//! loop {
//!     let _ = receiver.tick(); // Call at 8097 Hz
//! }
//! ```
//!
//! And on the other end:
//!
//! ```rust,ignore
//! use manchester433::tx::Transmitter;
//!
//! let mut transmitter = Transmitter::new(tx_pin, LinkConfig::default());
//! transmitter.run_cycle(&SensorRecord::new(0, 223, 675), &mut delay)?;
//! ```
//!
//! ## Integration Notes
//!
//! - Both ends must agree on `half_bit_us`; the receiver's `tick_hz` must
//!   give it about 16 ticks per half-bit with the default windows
//! - Only one receiver instance should be active at a time in interrupt-driven mode
//! - Nothing allocates; every buffer is a fixed-capacity `heapless::Vec`

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub use heapless;

#[macro_use]
mod fmt;

pub mod config;
pub mod consts;
pub mod crc;
pub mod error;
pub mod frame;
pub mod manchester;
pub mod pulse;
pub mod record;
pub mod report;
pub mod rx;
pub mod sync;
pub mod timer;
pub mod tx;
