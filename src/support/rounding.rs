//! Decimal rounding helpers.
//!
//! Layout computations compare diameters on fixed decimal grids (8 places for
//! shell diameters, 11 places for OTLs). These helpers put values onto those
//! grids without letting floating-point noise push a value that already sits
//! on the grid up to the next step.

/// Relative noise, in units of `f64::EPSILON`, treated as "already on the grid".
const NOISE_ULPS: f64 = 8.0;

/// Rounds `value` up to `decimal_places` decimal places.
///
/// A value within a few ulps of a grid point is taken to lie on it, so
/// `round_up(round_up(x, n), n) == round_up(x, n)`.
///
/// # Example
///
/// ```
/// use tubesheet_layout::support::rounding::round_up;
///
/// assert_eq!(round_up(22.250_000_001, 8), 22.250_000_01);
/// assert_eq!(round_up(22.25, 8), 22.25);
/// ```
#[must_use]
pub fn round_up(value: f64, decimal_places: i32) -> f64 {
    let multiplier = 10_f64.powi(decimal_places);
    let scaled = value * multiplier;
    let nearest = scaled.round();

    if (scaled - nearest).abs() <= NOISE_ULPS * f64::EPSILON * scaled.abs().max(1.0) {
        nearest / multiplier
    } else {
        scaled.ceil() / multiplier
    }
}

/// Rounds `value` to the nearest multiple of `10^-decimal_places`.
///
/// The value is nudged by one epsilon before rounding so that decimal
/// halves such as `1.005` round up as written.
#[must_use]
pub fn round_to(value: f64, decimal_places: i32) -> f64 {
    let multiplier = 10_f64.powi(decimal_places);
    (value * multiplier * (1.0 + f64::EPSILON)).round() / multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rounds_up_off_grid_values() {
        assert_relative_eq!(round_up(1.234_567_891, 8), 1.234_567_9);
        assert_relative_eq!(round_up(100.000_000_000_1, 8), 100.000_000_01);
        assert_relative_eq!(round_up(0.1 + 0.2, 1), 0.3);
    }

    #[test]
    fn stable_on_grid() {
        for ticks in [1_i64, 2_225_000_000, 3_700_000_001, 123_456_789_012] {
            #[allow(clippy::cast_precision_loss)]
            let value = ticks as f64 / 1e8;
            let once = round_up(value, 8);
            assert_eq!(once, value);
            assert_eq!(round_up(once, 8), once);
        }
    }

    #[test]
    fn stepping_down_one_unit_lands_on_previous_grid_point() {
        let value = round_up(37.000_000_000_004, 8);
        let below = round_up(value - 1e-8, 8);
        assert!(below < value);
        assert_relative_eq!(value - below, 1e-8, epsilon = 1e-12);
    }

    #[test]
    fn round_to_handles_decimal_halves() {
        assert_relative_eq!(round_to(1.005, 2), 1.01);
        assert_relative_eq!(round_to(2.344, 2), 2.34);
        assert_relative_eq!(round_to(1234.5, 0), 1235.0);
    }
}
