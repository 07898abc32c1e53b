//! Transmitter link driver.
//!
//! [`Transmitter`] frames a payload into its transmit buffer and bit-bangs
//! it out of an output pin, one Manchester half-bit at a time, timed with a
//! blocking [`DelayNs`]. Nothing here is interrupt driven: a transmission
//! blocks for `16 * half_bit_us` per frame byte, then the pin is left low.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use manchester433::config::LinkConfig;
//! use manchester433::record::SensorRecord;
//! use manchester433::tx::Transmitter;
//!
//! # let tx_pin = Pin::new(&[PinTransaction::set(PinState::Low)]);
//! let mut transmitter = Transmitter::new(tx_pin, LinkConfig::default());
//! let record = SensorRecord::new(0, 223, 675);
//! assert_eq!(transmitter.load_record(&record), Ok(11));
//! // transmitter.send(&mut delay)?;
//! # transmitter.tx.done();
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::Vec;

use crate::config::LinkConfig;
use crate::consts::MAX_FRAME_LEN;
use crate::error::LinkError;
use crate::frame;
use crate::manchester::encode_byte;
use crate::record::SensorRecord;

/// A bit-banged Manchester transmitter on one output pin.
///
/// ## Type Parameters
///
/// - `TX`: A type implementing [`embedded_hal::digital::OutputPin`] driving
///   the radio module's data input (high = carrier on)
#[derive(Debug)]
pub struct Transmitter<TX>
where
    TX: OutputPin,
{
    /// TX pin
    pub tx: TX,
    /// Timing settings
    pub config: LinkConfig,
    /// The framed packet waiting to be sent
    pub tx_buf: Vec<u8, MAX_FRAME_LEN>,
    /// Counter of completed transmissions.
    pub tx_good: u16,
}

impl<TX> Transmitter<TX>
where
    TX: OutputPin,
{
    /// Creates a new `Transmitter` on the given pin.
    ///
    /// # Notes
    /// TX is driven `LOW` initially (carrier off).
    pub fn new(tx: TX, config: LinkConfig) -> Self {
        let mut tx = tx;
        if tx.set_low().is_err() {
            warn!("could not drive TX low, line state unknown");
        }
        Self {
            tx,
            config,
            tx_buf: Vec::new(),
            tx_good: 0,
        }
    }

    fn write_tx(&mut self, level: bool) -> Result<(), LinkError> {
        if level {
            self.tx.set_high().map_err(|_| LinkError::Pin)
        } else {
            self.tx.set_low().map_err(|_| LinkError::Pin)
        }
    }

    /// Frames `payload` into the transmit buffer, replacing what was there.
    ///
    /// # Returns
    /// The frame length in bytes.
    ///
    /// # Errors
    /// [`LinkError::BufferOverflow`] if the payload does not fit in a frame.
    pub fn load(&mut self, payload: &[u8]) -> Result<usize, LinkError> {
        self.tx_buf = frame::build(payload)?;
        Ok(self.tx_buf.len())
    }

    /// Frames a [`SensorRecord`] into the transmit buffer.
    pub fn load_record(&mut self, record: &SensorRecord) -> Result<usize, LinkError> {
        self.load(&record.to_bytes())
    }

    /// Sends one byte, MSB first, holding each half-bit for `half_bit_us`.
    pub fn transmit_byte<D: DelayNs>(
        &mut self,
        byte: u8,
        delay: &mut D,
    ) -> Result<(), LinkError> {
        for level in encode_byte(byte) {
            self.write_tx(level)?;
            delay.delay_us(self.config.half_bit_us);
        }
        Ok(())
    }

    /// Sends the whole transmit buffer, then drives the pin low.
    pub fn send<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), LinkError> {
        for i in 0..self.tx_buf.len() {
            let byte = self.tx_buf[i];
            self.transmit_byte(byte, delay)?;
        }
        self.write_tx(false)?;
        self.tx_good = self.tx_good.wrapping_add(1);
        Ok(())
    }

    /// Keeps the line quiet for `gap_ms`.
    ///
    /// The receiver relies on this gap to close its reception window.
    pub fn idle_gap<D: DelayNs>(&mut self, delay: &mut D) {
        delay.delay_ms(self.config.gap_ms);
    }

    /// One full transmit cycle: frame `record`, send it, wait out the gap.
    pub fn run_cycle<D: DelayNs>(
        &mut self,
        record: &SensorRecord,
        delay: &mut D,
    ) -> Result<(), LinkError> {
        let _ = self.load_record(record)?;
        self.send(delay)?;
        self.idle_gap(delay);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[derive(Default)]
    struct RecordingDelay {
        total_ns: u64,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn set(level: bool) -> PinTransaction {
        PinTransaction::set(if level { PinState::High } else { PinState::Low })
    }

    #[test]
    fn test_transmitter_initialization() {
        let tx = PinMock::new(&[set(false)]);
        let mut transmitter = Transmitter::new(tx, LinkConfig::default());
        assert!(transmitter.tx_buf.is_empty());
        assert_eq!(transmitter.tx_good, 0);
        transmitter.tx.done();
    }

    #[test]
    fn test_transmit_byte_levels_and_timing() {
        // 0xa0 = 1010_0000
        let levels = [
            false, true, true, false, false, true, true, false, true, false, true, false, true,
            false, true, false,
        ];
        let mut expectations = vec![set(false)];
        expectations.extend(levels.iter().map(|&l| set(l)));
        let tx = PinMock::new(&expectations);
        let mut delay = RecordingDelay::default();

        let mut transmitter = Transmitter::new(tx, LinkConfig::default());
        transmitter.transmit_byte(0xa0, &mut delay).unwrap();

        assert_eq!(delay.total_ns, 16 * 2_000_000);
        transmitter.tx.done();
    }

    #[derive(Debug)]
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn test_pin_failures_surface_as_errors() {
        let mut transmitter = Transmitter::new(BrokenPin, LinkConfig::default());
        let mut delay = RecordingDelay::default();
        assert_eq!(
            transmitter.transmit_byte(0x55, &mut delay),
            Err(LinkError::Pin)
        );
        assert_eq!(delay.total_ns, 0);

        let _ = transmitter.load(&[1, 2, 3]).unwrap();
        assert_eq!(transmitter.send(&mut delay), Err(LinkError::Pin));
        assert_eq!(transmitter.tx_good, 0);
    }

    #[test]
    fn test_load_record_frames_payload() {
        let tx = PinMock::new(&[set(false)]);
        let mut transmitter = Transmitter::new(tx, LinkConfig::default());
        let len = transmitter
            .load_record(&SensorRecord::new(0, 223, 675))
            .unwrap();
        assert_eq!(len, 11);
        assert_eq!(&transmitter.tx_buf[..9], &[0, 0, 3, 8, 0, 0xdf, 0, 0xa3, 2]);
        transmitter.tx.done();
    }

    #[test]
    fn test_load_rejects_oversized_payload() {
        let tx = PinMock::new(&[set(false)]);
        let mut transmitter = Transmitter::new(tx, LinkConfig::default());
        assert!(transmitter.load(&[0u8; 64]).is_err());
        transmitter.tx.done();
    }

    #[test]
    fn test_run_cycle_sends_frame_then_idles() {
        let record = SensorRecord::new(0, 223, 675);
        let frame = frame::build(&record.to_bytes()).unwrap();

        let mut expectations = vec![set(false)];
        for &b in frame.iter() {
            expectations.extend(encode_byte(b).iter().map(|&l| set(l)));
        }
        expectations.push(set(false));
        let tx = PinMock::new(&expectations);
        let mut delay = RecordingDelay::default();

        let config = LinkConfig::default().with_gap_ms(250);
        let mut transmitter = Transmitter::new(tx, config);
        transmitter.run_cycle(&record, &mut delay).unwrap();

        assert_eq!(transmitter.tx_good, 1);
        assert_eq!(delay.total_ns, 11 * 16 * 2_000_000 + 250 * 1_000_000);
        transmitter.tx.done();
    }
}
