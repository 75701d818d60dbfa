//! The boundary between the instrument's hardware and the logic that plays it.
//!
//! Switches are wired to pull their line low when pressed, so a [`PinState::Low`] reading means "pressed." That
//! inversion happens exactly once, here, when a [`Sample`] is assembled.

use embedded_hal::digital::PinState;

/// Number of chorded overtone switches.
pub const CHORD_SWITCH_CNT: usize = 4;

/// Raw readings from the instrument's controls.
///
/// Analog readings are in whatever range the converter produces; the default calibrations assume 10 bits (0-1023).
pub trait SensorReader {
    /// Level of overtone switch `index` (0 through 3). Active low.
    fn chord_switch(&mut self, index: usize) -> PinState;
    /// Level of the thumb-operated meta switch. Active low.
    fn meta_switch(&mut self) -> PinState;
    /// Level of the "all notes off" switch. Active low.
    fn panic_switch(&mut self) -> PinState;
    /// Position along the slide. Readings above the no-touch threshold mean nobody is touching it.
    fn slide(&mut self) -> u16;
    /// Breath pressure.
    fn breath(&mut self) -> u16;
    /// Auxiliary X axis.
    fn x_axis(&mut self) -> u16;
    /// Auxiliary Y axis.
    fn y_axis(&mut self) -> u16;
}

/// The combined state of the four overtone switches, one bit per switch, set when pressed.
///
/// Switch 0 is the most significant of the four bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChordPattern(u8);

impl ChordPattern {
    /// Constructs a [`ChordPattern`], ignoring any bits above the lowest four.
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0x0f)
    }

    /// Assembles a [`ChordPattern`] from raw, active-low switch levels in switch-index order.
    pub fn from_levels(levels: [PinState; CHORD_SWITCH_CNT]) -> Self {
        let bits = levels
            .iter()
            .fold(0, |bits, &level| (bits << 1) | u8::from(level == PinState::Low));
        Self::new(bits)
    }

    /// Returns the four-bit value.
    pub const fn bits(&self) -> u8 {
        self.0
    }
}

/// A snapshot of every input, taken once per polling tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Which overtone switches are pressed.
    pub chord: ChordPattern,
    /// `true` while the meta switch is pressed.
    pub meta: bool,
    /// `true` while the panic switch is pressed.
    pub panic: bool,
    /// Raw slide position.
    pub slide: u16,
    /// Raw breath pressure.
    pub breath: u16,
    /// Raw X axis.
    pub x: u16,
    /// Raw Y axis.
    pub y: u16,
}

impl Sample {
    /// Reads every input once.
    pub fn read(reader: &mut impl SensorReader) -> Self {
        let mut levels = [PinState::High; CHORD_SWITCH_CNT];
        for (index, level) in levels.iter_mut().enumerate() {
            *level = reader.chord_switch(index);
        }

        Self {
            chord: ChordPattern::from_levels(levels),
            meta: reader.meta_switch() == PinState::Low,
            panic: reader.panic_switch() == PinState::Low,
            slide: reader.slide(),
            breath: reader.breath(),
            x: reader.x_axis(),
            y: reader.y_axis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeSensors;
    use PinState::{High, Low};

    #[test]
    fn pressed_switches_set_bits() {
        assert_eq!(
            ChordPattern::new(0b0000),
            ChordPattern::from_levels([High, High, High, High]),
            "Released switches should clear every bit; expected left but got right"
        );
        assert_eq!(
            ChordPattern::new(0b1111),
            ChordPattern::from_levels([Low, Low, Low, Low]),
            "Pressed switches should set every bit; expected left but got right"
        );
    }

    #[test]
    fn switch_zero_is_most_significant() {
        assert_eq!(
            0b1000,
            ChordPattern::from_levels([Low, High, High, High]).bits(),
            "Expected left but got right"
        );
        assert_eq!(
            0b0001,
            ChordPattern::from_levels([High, High, High, Low]).bits(),
            "Expected left but got right"
        );
    }

    #[test]
    fn new_masks_high_bits() {
        assert_eq!(0b0101, ChordPattern::new(0xf5).bits());
    }

    #[test]
    fn read_inverts_switches() {
        let mut sensors = FakeSensors {
            chord: [High, High, Low, Low],
            meta: Low,
            panic: High,
            slide: 200,
            breath: 80,
            x: 512,
            y: 1023,
        };

        assert_eq!(
            Sample {
                chord: ChordPattern::new(0b0011),
                meta: true,
                panic: false,
                slide: 200,
                breath: 80,
                x: 512,
                y: 1023,
            },
            Sample::read(&mut sensors),
            "Expected left but got right"
        );

        sensors.meta = High;
        sensors.panic = Low;
        let sample = Sample::read(&mut sensors);
        assert!(!sample.meta, "Meta switch should read as released");
        assert!(sample.panic, "Panic switch should read as pressed");
    }
}
