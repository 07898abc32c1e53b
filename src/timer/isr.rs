use crate::config::LinkConfig;
use crate::record::SensorRecord;
use crate::report::ReportSink;
use crate::rx::Receiver;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::InputPin;

/// A [`Receiver`] shared between `main` and the timer interrupt.
pub type GlobalReceiver<RX, S> = Mutex<RefCell<Option<Receiver<RX, S>>>>;

/// Used to initialize the global static `Receiver` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use manchester433::report::LogSink;
/// use manchester433::timer::{GlobalReceiver, global_receiver_init};
/// use some_hal::PD2;
///
/// static RECEIVER: GlobalReceiver<PD2, LogSink> = global_receiver_init::<PD2, LogSink>();
/// ```
pub const fn global_receiver_init<RX: InputPin, S: ReportSink>() -> GlobalReceiver<RX, S> {
    Mutex::new(RefCell::new(None))
}

/// Installs a new `Receiver` in the global slot, replacing any previous one.
///
/// # Arguments
/// * The global static `Receiver`
/// * The rx pin
/// * The sink that receives decode events
/// * The link timing, whose `tick_hz` must match the timer interrupt rate
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     global_receiver_setup(&RECEIVER, rx, LogSink, LinkConfig::default());
/// }
/// ```
pub fn global_receiver_setup<RX: InputPin, S: ReportSink>(
    global_receiver: &'static GlobalReceiver<RX, S>,
    rx: RX,
    sink: S,
    config: LinkConfig,
) {
    critical_section::with(|cs| {
        let _ = global_receiver
            .borrow(cs)
            .replace(Some(Receiver::new(rx, sink, config)));
    });
}

/// Runs the tick at each interrupt
///
/// Does nothing until [`global_receiver_setup`] has been called.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIMER1_COMPA() {
///     global_receiver_tick(&RECEIVER);
/// }
/// ```
pub fn global_receiver_tick<RX: InputPin, S: ReportSink>(
    global_receiver: &'static GlobalReceiver<RX, S>,
) {
    critical_section::with(|cs| {
        if let Some(receiver) = global_receiver.borrow(cs).borrow_mut().as_mut() {
            let _ = receiver.tick();
        }
    });
}

/// Takes the last decoded record out of the global `Receiver`.
pub fn global_receiver_read<RX: InputPin, S: ReportSink>(
    global_receiver: &'static GlobalReceiver<RX, S>,
) -> Option<SensorRecord> {
    critical_section::with(|cs| {
        global_receiver
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .and_then(|receiver| receiver.state.take_record())
    })
}
