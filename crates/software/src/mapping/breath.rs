//! Turns breath pressure and the auxiliary axes into 7-bit controller values.

use super::map_range;
use wmidi::U7;

/// Largest value an axis reading is scaled against.
const AXIS_MAX_RAW: u16 = 1024;

/// Raw readings that describe a particular breath sensor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BreathCalibration {
    /// Pressure below this is not breath, just noise; it is also the pressure required to start a note.
    pub on_threshold: u16,
    /// Highest pressure the sensor reports.
    pub max_raw: u16,
}

impl Default for BreathCalibration {
    fn default() -> Self {
        Self {
            on_threshold: 60,
            max_raw: 500,
        }
    }
}

/// Converts raw breath pressure into a volume. A volume of `0` means the player isn't blowing.
pub fn map_breath(raw: u16, calibration: &BreathCalibration) -> U7 {
    if raw < calibration.on_threshold {
        return U7::from_u8_lossy(0);
    }

    let constrained = raw.min(calibration.max_raw);
    let volume = map_range(
        constrained.into(),
        (calibration.on_threshold.into(), calibration.max_raw.into()),
        (0, 127),
    );
    U7::from_u8_lossy(volume as u8)
}

/// Converts a raw auxiliary axis reading into a controller value.
pub fn map_axis(raw: u16) -> U7 {
    let value = map_range(
        raw.min(AXIS_MAX_RAW).into(),
        (0, AXIS_MAX_RAW.into()),
        (0, 127),
    );
    U7::from_u8_lossy(value as u8)
}
