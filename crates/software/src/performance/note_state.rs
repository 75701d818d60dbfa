//! Provides [`NoteState`], the instrument's memory of what it last told the synthesizer.

use super::ChangeGate;
use crate::configuration::Settings;
use wmidi::Note;

/// Whether a note is sounding. The instrument is monophonic, so there is at most one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Voice {
    /// No note is sounding.
    #[default]
    Silent,
    /// This note is sounding.
    Sounding(Note),
}

#[cfg(feature = "defmt")]
impl defmt::Format for Voice {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Voice::Silent => defmt::write!(fmt, "Silent"),
            Voice::Sounding(note) => {
                defmt::write!(fmt, "Sounding({} ({}))", note.to_str(), *note as u8)
            }
        }
    }
}

/// What is sounding, and the last value sent for each continuous controller.
///
/// Starts out silent, with pitch bend at neutral and everything else at zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoteState {
    pub(super) voice: Voice,
    pub(super) pitch_bend: ChangeGate,
    pub(super) volume: ChangeGate,
    pub(super) x: ChangeGate,
    pub(super) y: ChangeGate,
}

impl NoteState {
    /// Constructs a silent [`NoteState`] whose gates use the thresholds in `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            voice: Voice::Silent,
            pitch_bend: ChangeGate::new(settings.slide.neutral, settings.pitch_bend_threshold),
            volume: ChangeGate::new(0, settings.volume_threshold),
            x: ChangeGate::new(0, settings.volume_threshold),
            y: ChangeGate::new(0, settings.volume_threshold),
        }
    }

    /// Getter.
    pub fn voice(&self) -> Voice {
        self.voice
    }

    /// The note currently sounding, if any.
    pub fn current_note(&self) -> Option<Note> {
        match self.voice {
            Voice::Silent => None,
            Voice::Sounding(note) => Some(note),
        }
    }

    /// The last pitch bend sent.
    pub fn pitch_bend(&self) -> u16 {
        self.pitch_bend.last_sent()
    }

    /// The last breath value sent.
    pub fn volume(&self) -> u16 {
        self.volume.last_sent()
    }

    /// The last X axis value sent.
    pub fn x(&self) -> u16 {
        self.x.last_sent()
    }

    /// The last Y axis value sent.
    pub fn y(&self) -> u16 {
        self.y.last_sent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let state = NoteState::new(&Settings::default());
        assert_eq!(Voice::Silent, state.voice());
        assert_eq!(None, state.current_note());
        assert_eq!(8191, state.pitch_bend(), "Pitch bend should start at neutral");
        assert_eq!(0, state.volume());
        assert_eq!(0, state.x());
        assert_eq!(0, state.y());
    }

    #[test]
    fn current_note() {
        let mut state = NoteState::new(&Settings::default());
        state.voice = Voice::Sounding(Note::C3);
        assert_eq!(Some(Note::C3), state.current_note());
    }
}
