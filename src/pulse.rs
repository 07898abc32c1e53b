//! Pulse-width symbol recovery for the receiver.
//!
//! The receiver samples its input pin once per timer tick. Between two edges
//! the line holds one level; the number of ticks it was held (the pulse
//! width) tells how many Manchester half-bits that pulse carried:
//!
//! - one half-bit: a single line bit,
//! - two half-bits: a "double", two equal line bits merged into one pulse,
//! - much shorter: a glitch, ignored,
//! - anything else, in practice the long gap between packets: idle.
//!
//! [`PulseClassifier`] keeps the per-tick state (last level and ticks since
//! the last edge) and reports a [`Pulse`] whenever the sampled level changes.

/// Tick-count windows used to classify a pulse.
///
/// All bounds are inclusive; widths below `noise_below` are glitches.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct PulseThresholds {
    /// Widths strictly below this are noise.
    pub noise_below: u16,
    /// Shortest single half-bit pulse.
    pub single_min: u16,
    /// Longest single half-bit pulse.
    pub single_max: u16,
    /// Shortest double half-bit pulse.
    pub double_min: u16,
    /// Longest double half-bit pulse.
    pub double_max: u16,
}

impl PulseThresholds {
    /// Derives the windows from the nominal number of ticks per half-bit.
    ///
    /// A half-bit of 16 ticks gives noise below 5, singles in `13..=17` and
    /// doubles in `29..=35`.
    pub const fn for_half_bit(ticks: u16) -> Self {
        Self {
            noise_below: ticks / 4 + 1,
            single_min: ticks.saturating_sub(3),
            single_max: ticks.saturating_add(1),
            double_min: ticks.saturating_mul(2).saturating_sub(3),
            double_max: ticks.saturating_mul(2).saturating_add(3),
        }
    }

    /// Classifies a pulse of `width` ticks that ended with the line at `level`.
    pub fn classify(&self, width: u16, level: bool) -> Pulse {
        if width < self.noise_below {
            Pulse::Noise
        } else if (self.single_min..=self.single_max).contains(&width) {
            Pulse::Single(level)
        } else if (self.double_min..=self.double_max).contains(&width) {
            Pulse::Double(level)
        } else {
            Pulse::Idle
        }
    }
}

impl Default for PulseThresholds {
    fn default() -> Self {
        Self::for_half_bit(16)
    }
}

/// The outcome of one detected edge.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Pulse {
    /// Too short to be a symbol; the edge is ignored.
    Noise,
    /// One line bit, equal to the level after the edge.
    Single(bool),
    /// Two line bits, both equal to the level after the edge.
    Double(bool),
    /// Neither a single nor a double; ends the current reception window.
    Idle,
}

impl Pulse {
    /// The line bits this pulse contributes to the raw buffer.
    pub fn bits(&self) -> &'static [bool] {
        match self {
            Pulse::Single(true) => &[true],
            Pulse::Single(false) => &[false],
            Pulse::Double(true) => &[true, true],
            Pulse::Double(false) => &[false, false],
            Pulse::Noise | Pulse::Idle => &[],
        }
    }
}

#[derive(Debug, Default)]
/// Edge detector and pulse-width counter, updated once per tick.
pub struct PulseClassifier {
    /// Level the line was last accepted at.
    last_level: bool,

    /// Ticks since the last accepted edge.
    ///
    /// Saturates, so the multi-second gap between packets never wraps back
    /// into a valid symbol window.
    width: u16,
}

impl PulseClassifier {
    /// Creates a classifier that assumes the line idles low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks counted since the last accepted edge.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The level the line was last accepted at.
    pub fn last_level(&self) -> bool {
        self.last_level
    }

    /// Feeds one tick's sample.
    ///
    /// Returns `None` while the level is unchanged. On a level change the
    /// pulse that just ended is classified and the width restarts. A glitch
    /// keeps the previous level, so the line returning to it is not an edge.
    pub fn update(&mut self, sample: bool, thresholds: &PulseThresholds) -> Option<Pulse> {
        self.width = self.width.saturating_add(1);

        if sample == self.last_level {
            return None;
        }

        let pulse = thresholds.classify(self.width, sample);
        if pulse != Pulse::Noise {
            self.last_level = sample;
        }
        self.width = 0;
        Some(pulse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(classifier: &mut PulseClassifier, level: bool, ticks: u16) -> Vec<Pulse> {
        let th = PulseThresholds::default();
        (0..ticks)
            .filter_map(|_| classifier.update(level, &th))
            .collect()
    }

    /// Holds `level` for `width` ticks starting right after an edge, then
    /// flips the line and returns what the flip was classified as.
    fn pulse_of(width: u16) -> Pulse {
        let th = PulseThresholds::default();
        let mut classifier = PulseClassifier::new();
        classifier.last_level = true;
        for _ in 1..width {
            assert_eq!(classifier.update(true, &th), None);
        }
        classifier.update(false, &th).unwrap()
    }

    #[test]
    fn test_default_thresholds() {
        let th = PulseThresholds::default();
        assert_eq!(th.noise_below, 5);
        assert_eq!((th.single_min, th.single_max), (13, 17));
        assert_eq!((th.double_min, th.double_max), (29, 35));
    }

    #[test]
    fn test_thresholds_saturate_for_slow_links() {
        let th = PulseThresholds::for_half_bit(u16::MAX);
        assert_eq!(th.single_max, u16::MAX);
        assert_eq!((th.double_min, th.double_max), (u16::MAX - 3, u16::MAX));
        let th = PulseThresholds::for_half_bit(40_000);
        assert_eq!((th.single_min, th.single_max), (39_997, 40_001));
        assert_eq!(th.double_max, u16::MAX);
    }

    #[test]
    fn test_short_pulses_are_noise() {
        for width in 1..=4 {
            assert_eq!(pulse_of(width), Pulse::Noise, "width {width}");
        }
    }

    #[test]
    fn test_single_window() {
        for width in 13..=17 {
            assert_eq!(pulse_of(width), Pulse::Single(false), "width {width}");
            assert_eq!(pulse_of(width).bits().len(), 1);
        }
    }

    #[test]
    fn test_double_window() {
        for width in 29..=35 {
            assert_eq!(pulse_of(width), Pulse::Double(false), "width {width}");
            assert_eq!(pulse_of(width).bits(), &[false, false]);
        }
    }

    #[test]
    fn test_gaps_between_windows_are_idle() {
        for width in (5..=12).chain(18..=28).chain([36, 100, 1000]) {
            assert_eq!(pulse_of(width), Pulse::Idle, "width {width}");
            assert!(pulse_of(width).bits().is_empty());
        }
    }

    #[test]
    fn test_width_saturates() {
        let mut classifier = PulseClassifier::new();
        let th = PulseThresholds::default();
        for _ in 0..70_000u32 {
            assert_eq!(classifier.update(false, &th), None);
        }
        assert_eq!(classifier.width(), u16::MAX);
        assert_eq!(classifier.update(true, &th), Some(Pulse::Idle));
        assert_eq!(classifier.width(), 0);
        assert!(classifier.last_level());
    }

    #[test]
    fn test_glitch_keeps_level_and_restarts_width() {
        let mut classifier = PulseClassifier::new();
        // idle low, then an edge to high
        assert!(feed(&mut classifier, false, 40).is_empty());
        assert_eq!(feed(&mut classifier, true, 1), [Pulse::Idle]);
        assert!(feed(&mut classifier, true, 2).is_empty());
        // one-tick dip, three ticks after the edge
        assert_eq!(feed(&mut classifier, false, 1), [Pulse::Noise]);
        assert!(classifier.last_level());
        assert_eq!(classifier.width(), 0);
        // back high: not an edge; the next edge comes 33 ticks after the dip
        assert!(feed(&mut classifier, true, 32).is_empty());
        assert_eq!(classifier.width(), 32);
        assert_eq!(feed(&mut classifier, false, 1), [Pulse::Double(false)]);
    }

    #[test]
    fn test_window_edges_after_glitch() {
        let th = PulseThresholds::default();
        for (after_glitch, expected) in [
            (13, Pulse::Single(false)),
            (17, Pulse::Single(false)),
            (18, Pulse::Idle),
            (29, Pulse::Double(false)),
            (35, Pulse::Double(false)),
            (36, Pulse::Idle),
        ] {
            let mut classifier = PulseClassifier::new();
            classifier.last_level = true;
            assert!(feed(&mut classifier, true, 3).is_empty());
            assert_eq!(classifier.update(false, &th), Some(Pulse::Noise));
            assert!(feed(&mut classifier, true, after_glitch - 1).is_empty());
            assert_eq!(
                classifier.update(false, &th),
                Some(expected),
                "{after_glitch} ticks after glitch"
            );
        }
    }

    #[test]
    fn test_no_edge_no_pulse() {
        let mut classifier = PulseClassifier::new();
        assert!(feed(&mut classifier, false, 50).is_empty());
        assert_eq!(classifier.width(), 50);
    }
}
