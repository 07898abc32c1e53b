/// Declares a static global `LINK_RECEIVER` instance protected by a
/// `critical_section` mutex.
///
/// Both the main thread and the timer ISR reach the receiver through this
/// singleton.
///
/// # Arguments
/// - `$rx`: The concrete type of the RX pin (must implement `InputPin`)
/// - `$sink`: The concrete type of the event sink (must implement `ReportSink`)
///
/// # Example
/// ```rust,ignore
/// init_link_receiver!(MyRxPinType, manchester433::report::LogSink);
/// ```
#[macro_export]
macro_rules! init_link_receiver {
    ( $rx:ty, $sink:ty ) => {
        pub static LINK_RECEIVER: $crate::timer::GlobalReceiver<$rx, $sink> =
            $crate::timer::global_receiver_init::<$rx, $sink>();
    };
}

/// Installs a new `Receiver` in the `LINK_RECEIVER` singleton.
///
/// # Arguments
/// - `$rx`: The RX pin
/// - `$sink`: The event sink
/// - `$config`: A `LinkConfig` whose `tick_hz` matches the timer interrupt
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     setup_link_receiver!(rx, LogSink, LinkConfig::default());
/// }
/// ```
///
/// # Notes
/// - Requires `init_link_receiver!` to have been used earlier.
#[macro_export]
macro_rules! setup_link_receiver {
    ( $rx:expr, $sink:expr, $config:expr ) => {
        $crate::timer::global_receiver_setup(&LINK_RECEIVER, $rx, $sink, $config)
    };
}

/// Calls `tick()` on the global `LINK_RECEIVER` if it has been set up.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIMER1_COMPA() {
///     tick_link_receiver!();
/// }
/// ```
///
/// # Notes
/// - Does nothing until `setup_link_receiver!` has run.
#[macro_export]
macro_rules! tick_link_receiver {
    () => {
        $crate::timer::global_receiver_tick(&LINK_RECEIVER)
    };
}

#[cfg(test)]
mod tests {
    use crate::config::LinkConfig;
    use crate::report::LogSink;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    init_link_receiver!(PinMock, LogSink);

    #[test]
    fn test_macros_drive_the_singleton() {
        tick_link_receiver!();

        let mut reads = vec![PinTransaction::get(PinState::Low); 5];
        reads.push(PinTransaction::get(PinState::High));
        let rx = PinMock::new(&reads);
        setup_link_receiver!(rx, LogSink, LinkConfig::default());
        // five quiet ticks, then an edge long enough not to be a glitch
        for _ in 0..reads.len() {
            tick_link_receiver!();
        }

        critical_section::with(|cs| {
            let mut slot = LINK_RECEIVER.borrow(cs).borrow_mut();
            let receiver = slot.as_mut().unwrap();
            assert!(receiver.state.classifier().last_level());
            receiver.rx.done();
        });
    }
}
