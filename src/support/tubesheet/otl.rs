use crate::support::rounding::round_up;

use super::{LayoutError, Tube};

/// Decimal places kept for outer tube limits.
pub const OTL_DECIMAL_PLACES: i32 = 11;

/// Returns the outer tube limit (OTL) of a set of tubes.
///
/// The OTL is the diameter of the smallest centred circle containing every
/// tube, rounded up to [`OTL_DECIMAL_PLACES`].
///
/// # Errors
///
/// Returns [`LayoutError::InvalidField`] if `tubes` is empty or the computed
/// diameter is not positive.
pub fn outer_tube_limit(tubes: &[Tube], tube_od: f64) -> Result<f64, LayoutError> {
    let otl = tubes
        .iter()
        .map(|tube| tube.extent(tube_od))
        .fold(0.0, f64::max);

    if otl > 0.0 {
        Ok(round_up(otl, OTL_DECIMAL_PLACES))
    } else {
        Err(LayoutError::InvalidField)
    }
}
