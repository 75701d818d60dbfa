//! Chorded overtone selection.
//!
//! Four switches select one of eight overtones. The chords are arranged so that neighboring overtones are one finger
//! apart: fingers are added one at a time going up, then lifted one at a time, starting with the first.
//!
//! | Switches 0123 | Overtone              |
//! |---------------|-----------------------|
//! | `0000`        | fundamental (C3)      |
//! | `0001`        | G3                    |
//! | `0011`        | C4                    |
//! | `0111`        | E4                    |
//! | `1111`        | G4                    |
//! | `1110`        | B♭4                   |
//! | `1100`        | C5                    |
//! | `1000`        | D5                    |
//!
//! Every other combination is [`None`]; see [`OvertoneTable::decode`].

use crate::sensors::ChordPattern;
use wmidi::{Note, U7};

/// Number of selectable overtones, counting the fundamental.
pub const OVERTONE_CNT: usize = 8;

/// Position of a selectable overtone in an [`OvertoneTable`]; 0 is the fundamental.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Overtone(u8);

impl Overtone {
    /// Getter.
    pub fn index(&self) -> usize {
        self.0.into()
    }
}

/// The notes the instrument can play and the chords that select them, paired by position.
///
/// Internally, notes are stored as [`U7`] so the table can be built in a `const` context; public interfaces deal in
/// [`Note`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OvertoneTable {
    notes: [U7; OVERTONE_CNT],
    chords: [ChordPattern; OVERTONE_CNT],
}

impl OvertoneTable {
    /// Rather than a true harmonic series, the overtones alternate between ascending a perfect fifth and a perfect
    /// fourth, starting from C3.
    pub const FIFTHS_AND_FOURTHS: Self = Self {
        notes: [
            U7::from_u8_lossy(48),
            U7::from_u8_lossy(55),
            U7::from_u8_lossy(60),
            U7::from_u8_lossy(64),
            U7::from_u8_lossy(67),
            U7::from_u8_lossy(70),
            U7::from_u8_lossy(72),
            U7::from_u8_lossy(74),
        ],
        chords: [
            ChordPattern::new(0b0000),
            ChordPattern::new(0b0001),
            ChordPattern::new(0b0011),
            ChordPattern::new(0b0111),
            ChordPattern::new(0b1111),
            ChordPattern::new(0b1110),
            ChordPattern::new(0b1100),
            ChordPattern::new(0b1000),
        ],
    };

    /// Returns the [`Overtone`] selected by `chord`, or [`None`] if the chord isn't in the table.
    pub fn decode(&self, chord: ChordPattern) -> Option<Overtone> {
        self.chords
            .iter()
            .position(|&candidate| candidate == chord)
            .map(|index| Overtone(index as u8))
    }

    /// Returns the [`Note`] for an [`Overtone`].
    pub fn note(&self, overtone: Overtone) -> Note {
        Note::from(self.notes[overtone.index()])
    }

    /// Returns `true` if `note` is one of the notes the table can produce.
    pub fn contains(&self, note: Note) -> bool {
        self.notes.iter().any(|&n| Note::from(n) == note)
    }
}

impl Default for OvertoneTable {
    fn default() -> Self {
        Self::FIFTHS_AND_FOURTHS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bits: u8) -> Option<usize> {
        OvertoneTable::default()
            .decode(ChordPattern::new(bits))
            .map(|overtone| overtone.index())
    }

    #[test]
    fn documented_chords() {
        assert_eq!(Some(0), decode(0b0000), "Expected the fundamental");
        assert_eq!(Some(1), decode(0b0001), "Expected left but got right");
        assert_eq!(Some(4), decode(0b1111), "Expected left but got right");
        assert_eq!(Some(7), decode(0b1000), "Expected left but got right");
    }

    #[test]
    fn unlisted_chords_do_not_match() {
        assert_eq!(None, decode(0b0101));
        assert_eq!(None, decode(0b1001));
    }

    #[test]
    fn every_chord_decodes_to_a_valid_index_or_nothing() {
        let matches = (0..16_u8)
            .filter_map(|bits| {
                let first = decode(bits);
                assert_eq!(first, decode(bits), "Decoding should be deterministic");
                first
            })
            .inspect(|&index| assert!(index < OVERTONE_CNT, "Index {} out of range", index))
            .count();
        assert_eq!(OVERTONE_CNT, matches, "Each overtone should have exactly one chord");
    }

    #[test]
    fn notes() {
        let table = OvertoneTable::default();
        let note = |bits| table.note(table.decode(ChordPattern::new(bits)).unwrap());
        assert_eq!(Note::C3, note(0b0000));
        assert_eq!(Note::G3, note(0b0001));
        assert_eq!(Note::G4, note(0b1111));
        assert_eq!(70, note(0b1110) as u8);
        assert_eq!(Note::D5, note(0b1000));
    }

    #[test]
    fn contains() {
        let table = OvertoneTable::default();
        assert!(table.contains(Note::C4));
        assert!(!table.contains(Note::A4));
    }
}
