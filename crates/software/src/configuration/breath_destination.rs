use num_derive::{FromPrimitive, ToPrimitive};
use wmidi::ControlFunction;

/// Determines which MIDI controller receives the value derived from breath pressure.
///
/// Patches built for wind controllers listen to the breath controller; most others only respond to channel volume.
#[derive(Debug, Default, Clone, Copy, ToPrimitive, FromPrimitive, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BreathDestination {
    /// MIDI CC 2: Breath Controller
    #[default]
    BreathController,
    /// MIDI CC 7: Channel Volume
    ChannelVolume,
}

impl BreathDestination {
    /// The controller to which breath values are sent.
    pub fn control_function(&self) -> ControlFunction {
        match self {
            Self::BreathController => ControlFunction::BREATH_CONTROLLER,
            Self::ChannelVolume => ControlFunction::CHANNEL_VOLUME,
        }
    }
}

impl super::CycleConfig for BreathDestination {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_function() {
        assert_eq!(
            2,
            u8::from(BreathDestination::BreathController.control_function()),
            "Expected left but got right"
        );
        assert_eq!(
            7,
            u8::from(BreathDestination::ChannelVolume.control_function()),
            "Expected left but got right"
        );
    }
}
