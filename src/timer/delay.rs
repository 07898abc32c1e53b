use crate::record::SensorRecord;
use crate::report::ReportSink;
use crate::rx::Receiver;
use crate::tx::Transmitter;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// Runs a blocking loop that repeatedly calls `tick()` on the provided receiver.
///
/// This is a simple timing loop for use in environments where interrupts are
/// unavailable or undesired. The loop body takes longer than `tick_us`, so
/// pick `tick_us` slightly below `1 / tick_hz` and tune it on the target.
///
/// # Arguments
/// - `receiver`: A mutable reference to a `Receiver` instance.
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `tick_us`: The delay between each tick call, in microseconds (e.g. 123 for ~8 kHz).
///
/// # Example
/// ```rust,ignore
/// use manchester433::timer::run_receive_tick_loop;
/// let mut receiver = Receiver::new(rx, LogSink, LinkConfig::default());
/// run_receive_tick_loop(&mut receiver, &mut delay, 123);
/// ```
///
/// # Notes
/// - This loop will never return; it is intended for single-purpose polling firmware.
/// - Decoded records reach the application through the receiver's sink.
pub fn run_receive_tick_loop<D, RX, S>(
    receiver: &mut Receiver<RX, S>,
    delay: &mut D,
    tick_us: u32,
) -> !
where
    D: DelayNs,
    RX: InputPin,
    S: ReportSink,
{
    loop {
        let _ = receiver.tick();
        delay.delay_us(tick_us);
    }
}

/// Runs the transmitter forever: read a record, send it, wait out the gap.
///
/// # Arguments
/// - `transmitter`: A mutable reference to a `Transmitter` instance.
/// - `delay`: A delay provider implementing `DelayNs`.
/// - `next_record`: Called once per cycle for the record to send.
///
/// # Notes
/// - A failed cycle is logged and the loop carries on with the next one.
pub fn run_transmit_loop<D, TX, F>(
    transmitter: &mut Transmitter<TX>,
    delay: &mut D,
    mut next_record: F,
) -> !
where
    D: DelayNs,
    TX: OutputPin,
    F: FnMut() -> SensorRecord,
{
    loop {
        let record = next_record();
        if let Err(err) = transmitter.run_cycle(&record, delay) {
            warn!("transmit failed: {}", err);
            transmitter.idle_gap(delay);
        }
    }
}
