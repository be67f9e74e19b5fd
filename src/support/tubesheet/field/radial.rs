use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::support::tubesheet::{FIT_TOLERANCE, LayoutError, Tube, TubeGeometry};

/// Slack added before flooring the ring count, so an exact fit is not lost
/// to rounding in `asin`.
const RING_COUNT_SLACK: f64 = 1e-9;

/// Places as many tubes as fit on a single ring, a pitch apart.
///
/// Tube 0 sits at the top of the ring and the rest follow clockwise.
pub(super) fn ring(geometry: &TubeGeometry, max_otl: f64) -> Result<Vec<Tube>, LayoutError> {
    let pitch = geometry.pitch();
    let span = max_otl - geometry.tube_od();

    if span <= 0.0 || pitch > span + FIT_TOLERANCE {
        return Err(LayoutError::RadialInfeasible { pitch, span });
    }

    let half_angle = (pitch / span).min(1.0).asin();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (PI / half_angle + RING_COUNT_SLACK).floor() as usize;

    #[allow(clippy::cast_precision_loss)]
    let (radius, step) = {
        let count = count as f64;
        (pitch / (PI / count).sin() / 2.0, TAU / count)
    };

    let tubes = (0..count)
        .map(|i| {
            if i == 0 {
                return Tube::new(0.0, radius);
            }
            #[allow(clippy::cast_precision_loss)]
            let angle = FRAC_PI_2 - step * i as f64;
            Tube::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();

    Ok(tubes)
}
