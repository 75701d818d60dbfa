use super::{BreathDestination, SlideQuantization};
use crate::mapping::{BreathCalibration, SlideCalibration};
use embassy_time::Duration;
use wmidi::{Channel, U7};

/// Everything that shapes how raw input becomes a performance.
///
/// The defaults describe the prototype hardware: a SoftPot slide read through a 10-bit converter and a pressure
/// sensor blown into through a "T" with an open dump tube. Most fields are fixed for the life of the device; the
/// enum-valued ones may be cycled by the performer (see [`CycleConfig`][super::CycleConfig]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// Channel for every message the instrument sends.
    pub channel: Channel,
    /// Pause between polling ticks.
    pub poll_interval: Duration,
    /// While a note is sustained, continuous controllers are sent no more often than this.
    pub cc_interval: Duration,
    /// A new pitch bend is only sent if it differs from the last one sent by more than this.
    pub pitch_bend_threshold: u16,
    /// A new breath or axis value is only sent if it differs from the last one sent by more than this.
    pub volume_threshold: u16,
    /// Velocity of every note-on. Loudness is expressed through the breath controller instead.
    pub note_on_velocity: U7,
    /// Calibration of the breath sensor.
    pub breath: BreathCalibration,
    /// Controller receiving the breath value.
    pub breath_destination: BreathDestination,
    /// Calibration of the slide.
    pub slide: SlideCalibration,
    /// Whether the slide snaps to positions.
    pub slide_quantization: SlideQuantization,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channel: Channel::Ch1,
            poll_interval: Duration::from_millis(50),
            cc_interval: Duration::from_millis(10),
            pitch_bend_threshold: 10,
            volume_threshold: 1,
            note_on_velocity: U7::from_u8_lossy(127),
            breath: BreathCalibration::default(),
            breath_destination: BreathDestination::default(),
            slide: SlideCalibration::default(),
            slide_quantization: SlideQuantization::default(),
        }
    }
}
