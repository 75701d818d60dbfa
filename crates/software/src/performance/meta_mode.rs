//! Lets the thumb turn the overtone switches into a command keypad.
//!
//! While the meta switch is held, the chord is captured instead of played; when it's released, the last chord
//! captured is sent once as a command (e.g., to launch a scene in a DAW).

use crate::sensors::ChordPattern;

/// What the meta switch did this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MetaEvent {
    /// The meta switch is not held and wasn't just released; the chord selects notes as usual.
    Inactive,
    /// The meta switch is held and the chord belongs to it.
    Capturing,
    /// The meta switch was just released; this chord should be sent as a command.
    Command(ChordPattern),
}

/// Tracks the meta switch across ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MetaMode {
    /// The chord captured on the most recent tick, if the meta switch is held.
    captured: Option<ChordPattern>,
}

impl MetaMode {
    /// Updates the meta state given this tick's meta switch and chord. Returns the resulting [`MetaEvent`].
    pub fn update(&mut self, pressed: bool, chord: ChordPattern) -> MetaEvent {
        match (pressed, self.captured.take()) {
            (true, _) => {
                self.captured = Some(chord);
                MetaEvent::Capturing
            }
            (false, Some(captured)) => MetaEvent::Command(captured),
            (false, None) => MetaEvent::Inactive,
        }
    }

    /// Returns `true` while the meta switch is held.
    pub fn is_active(&self) -> bool {
        self.captured.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_sends_last_capture() {
        let mut meta = MetaMode::default();
        assert_eq!(
            MetaEvent::Capturing,
            meta.update(true, ChordPattern::new(0b0011))
        );
        assert!(meta.is_active());
        assert_eq!(
            MetaEvent::Capturing,
            meta.update(true, ChordPattern::new(0b0111))
        );
        assert_eq!(
            MetaEvent::Command(ChordPattern::new(0b0111)),
            meta.update(false, ChordPattern::new(0b0000)),
            "Should send the chord held on the last tick before release; expected left but got right"
        );
        assert!(!meta.is_active(), "Capture should be cleared");
    }

    #[test]
    fn command_is_sent_once() {
        let mut meta = MetaMode::default();
        meta.update(true, ChordPattern::new(0b1000));
        meta.update(false, ChordPattern::new(0b0000));
        assert_eq!(
            MetaEvent::Inactive,
            meta.update(false, ChordPattern::new(0b0000))
        );
    }

    #[test]
    fn idle() {
        let mut meta = MetaMode::default();
        assert_eq!(
            MetaEvent::Inactive,
            meta.update(false, ChordPattern::new(0b1111))
        );
        assert!(!meta.is_active());
    }
}
