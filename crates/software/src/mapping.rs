mod breath;
pub use breath::*;

mod chord;
pub use chord::*;

mod slide;
pub use slide::*;

/// Re-maps `value` from one integer range onto another, truncating toward zero.
///
/// Reversed ranges are fine, which is how the slide turns an increasing position into a decreasing bend. The result
/// never leaves the output range, and an empty input range maps everything to `to.0`.
fn map_range(value: i32, from: (i32, i32), to: (i32, i32)) -> i32 {
    if from.0 == from.1 {
        return to.0;
    }

    let scaled = (i64::from(value) - i64::from(from.0)) * (i64::from(to.1) - i64::from(to.0))
        / (i64::from(from.1) - i64::from(from.0))
        + i64::from(to.0);
    let bounds = (to.0.min(to.1), to.0.max(to.1));
    // in bounds, so the conversion is lossless
    scaled.clamp(bounds.0.into(), bounds.1.into()) as i32
}
