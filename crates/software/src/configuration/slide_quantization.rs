use num_derive::{FromPrimitive, ToPrimitive};

/// Determines whether the slide bends continuously, like a trombone, or snaps to the seven slide positions.
///
/// Snapping makes it easier to play in tune at the cost of the smooth glissando that makes a slide a slide, so it
/// can be toggled while performing.
#[derive(Debug, Default, Clone, Copy, ToPrimitive, FromPrimitive, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlideQuantization {
    /// Every slide reading produces its own pitch bend.
    #[default]
    Continuous,
    /// Pitch bend is snapped to one of seven positions. The 1st and 7th positions are half as wide as the others.
    Positions,
}

impl SlideQuantization {
    /// Returns true for any value other than [`SlideQuantization::Continuous`].
    pub fn is_enabled(&self) -> bool {
        *self != Self::Continuous
    }
}

impl super::CycleConfig for SlideQuantization {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_enabled() {
        assert!(SlideQuantization::Positions.is_enabled(), "Should be enabled");
        assert!(
            !SlideQuantization::Continuous.is_enabled(),
            "Should be disabled"
        );
    }
}
