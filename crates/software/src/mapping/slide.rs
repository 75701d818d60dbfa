//! Turns the slide into pitch bend.
//!
//! Every bend is a bend _down_ from the fingered overtone, from [`SlideCalibration::neutral`] at 1st position to
//! [`SlideCalibration::max_bend_down`] at 7th. To behave like a trombone, the synth patch must be set up for a
//! downward bend range of seven semitones.

use super::map_range;
use crate::configuration::SlideQuantization;

/// Output bands for the seven quantized slide positions, as `(low, high, output)`.
///
/// Each band is one position wide and centered on its position, except 1st and 7th, which are half as wide.
const POSITIONS: [(u16, u16, u16); 7] = [
    (0, 683, 0),
    (684, 2048, 1365),
    (2049, 3413, 2731),
    (3414, 4779, 4096),
    (4780, 6144, 5461),
    (6145, 7509, 6827),
    (7510, 8192, 8191),
];

/// Raw readings and bend values that describe a particular slide.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlideCalibration {
    /// Readings above this mean the player isn't touching the slide.
    ///
    /// The SoftPot idles just above 1000, but touching another sensor at the same time can drag it down to 999, so
    /// this is deliberately close.
    pub no_touch: u16,
    /// Reading at 1st position.
    pub first_position: u16,
    /// Reading at 7th position.
    pub seventh_position: u16,
    /// Pitch bend at 1st position, i.e., no bend.
    pub neutral: u16,
    /// Pitch bend at 7th position.
    pub max_bend_down: u16,
}

impl Default for SlideCalibration {
    fn default() -> Self {
        Self {
            no_touch: 1010,
            first_position: 144,
            seventh_position: 350,
            neutral: 16383 / 2,
            max_bend_down: 0,
        }
    }
}

/// What the slide is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlidePosition {
    /// Nobody is touching the slide. Whatever bend was last sent should stand.
    NotTouching,
    /// The slide is held at a position that calls for this pitch bend.
    Bend(u16),
}

/// Converts a raw slide reading to a [`SlidePosition`].
///
/// Readings beyond either end stop are treated as the end stop. A slide wired in reverse (`first_position` above
/// `seventh_position`) works too.
pub fn map_slide(
    raw: u16,
    calibration: &SlideCalibration,
    quantization: SlideQuantization,
) -> SlidePosition {
    if raw > calibration.no_touch {
        return SlidePosition::NotTouching;
    }

    let constrained = raw.clamp(
        calibration.first_position.min(calibration.seventh_position),
        calibration.first_position.max(calibration.seventh_position),
    );
    let bend = map_range(
        constrained.into(),
        (
            calibration.first_position.into(),
            calibration.seventh_position.into(),
        ),
        (calibration.neutral.into(), calibration.max_bend_down.into()),
    );
    // lies between the two calibrated bends, so it fits
    let bend = bend as u16;

    SlidePosition::Bend(match quantization {
        SlideQuantization::Continuous => bend,
        SlideQuantization::Positions => quantize(bend),
    })
}

/// Snaps a pitch bend value to the nearest of the seven slide positions.
///
/// Values outside of `0..=8192` fall back to `0`.
pub fn quantize(bend: u16) -> u16 {
    POSITIONS
        .iter()
        .find(|(low, high, _)| (*low..=*high).contains(&bend))
        .map_or(0, |&(_, _, output)| output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn continuous(raw: u16) -> SlidePosition {
        map_slide(
            raw,
            &SlideCalibration::default(),
            SlideQuantization::Continuous,
        )
    }

    #[test]
    fn end_stops() {
        assert_eq!(
            SlidePosition::Bend(8191),
            continuous(144),
            "1st position should be neutral; expected left but got right"
        );
        assert_eq!(
            SlidePosition::Bend(0),
            continuous(350),
            "7th position should be fully bent; expected left but got right"
        );
    }

    #[test]
    fn readings_beyond_end_stops_are_clamped() {
        assert_eq!(SlidePosition::Bend(8191), continuous(0));
        assert_eq!(SlidePosition::Bend(0), continuous(1010));
    }

    #[test]
    fn not_touching() {
        for quantization in [SlideQuantization::Continuous, SlideQuantization::Positions] {
            for raw in [1011, 1023, u16::MAX] {
                assert_eq!(
                    SlidePosition::NotTouching,
                    map_slide(raw, &SlideCalibration::default(), quantization),
                    "Reading {} should not count as a touch",
                    raw
                );
            }
        }
    }

    #[test]
    fn bend_deepens_as_slide_extends() {
        let mut previous = u16::MAX;
        for raw in 144..=350 {
            let SlidePosition::Bend(bend) = continuous(raw) else {
                panic!("Reading {} should count as a touch", raw);
            };
            assert!(
                bend <= previous,
                "Bend should never rise as the slide extends; {} followed {}",
                bend,
                previous
            );
            previous = bend;
        }
    }

    #[test]
    fn quantized_slide() {
        let quantized = |raw| {
            map_slide(
                raw,
                &SlideCalibration::default(),
                SlideQuantization::Positions,
            )
        };
        assert_eq!(SlidePosition::Bend(8191), quantized(144));
        assert_eq!(SlidePosition::Bend(4096), quantized(247));
        assert_eq!(SlidePosition::Bend(0), quantized(350));
    }

    #[test]
    fn quantize_bands() {
        assert_eq!(0, quantize(0));
        assert_eq!(0, quantize(683));
        assert_eq!(1365, quantize(684));
        assert_eq!(1365, quantize(2048));
        assert_eq!(2731, quantize(2049));
        assert_eq!(4096, quantize(4779));
        assert_eq!(5461, quantize(4780));
        assert_eq!(6827, quantize(7509));
        assert_eq!(8191, quantize(7510));
        assert_eq!(8191, quantize(8192));
        assert_eq!(0, quantize(8193), "Out of range values should default to 0");
    }

    #[test]
    fn quantize_is_idempotent() {
        let outputs = POSITIONS.map(|(_, _, output)| output);
        for bend in 0..=9000 {
            let once = quantize(bend);
            assert_eq!(once, quantize(once), "Quantizing {} twice changed it", bend);
            assert!(outputs.contains(&once), "{} landed outside every band", bend);
        }
    }

    #[test]
    fn reversed_slide() {
        let calibration = SlideCalibration {
            first_position: 350,
            seventh_position: 144,
            ..SlideCalibration::default()
        };
        let slide = |raw| map_slide(raw, &calibration, SlideQuantization::Continuous);

        assert_eq!(
            SlidePosition::Bend(8191),
            slide(350),
            "Expected left but got right"
        );
        assert_eq!(SlidePosition::Bend(0), slide(144), "Expected left but got right");
        assert_eq!(SlidePosition::Bend(0), slide(100), "Expected left but got right");
        assert_eq!(SlidePosition::Bend(8191), slide(400), "Expected left but got right");
    }

    #[test]
    fn single_point_slide() {
        let calibration = SlideCalibration {
            first_position: 200,
            seventh_position: 200,
            ..SlideCalibration::default()
        };
        for raw in [0, 200, 1000] {
            assert_eq!(
                SlidePosition::Bend(8191),
                map_slide(raw, &calibration, SlideQuantization::Continuous),
                "A slide with no travel should never bend; expected left but got right"
            );
        }
    }

    #[test]
    fn full_bend_range() {
        let calibration = SlideCalibration {
            neutral: u16::MAX,
            ..SlideCalibration::default()
        };
        assert_eq!(
            SlidePosition::Bend(u16::MAX),
            map_slide(144, &calibration, SlideQuantization::Continuous),
            "Expected left but got right"
        );
        assert_eq!(
            SlidePosition::Bend(0),
            map_slide(350, &calibration, SlideQuantization::Continuous),
            "Expected left but got right"
        );
    }
}
