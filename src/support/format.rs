//! Number formatting for presenting layout results.

use super::rounding::round_to;

/// Values above this are shown as whole numbers instead of three significant figures.
const WHOLE_NUMBER_THRESHOLD: f64 = 100.0;

/// Formats `value` to three significant figures with thousands separators.
///
/// Values above 100 are rounded to the nearest whole number instead, so a
/// shell diameter of `1234.5` reads `1,235` rather than `1,230`. Trailing
/// zeros are dropped.
///
/// # Example
///
/// ```
/// use tubesheet_layout::support::format::format_3_sig_figs;
///
/// assert_eq!(format_3_sig_figs(22.25), "22.3");
/// assert_eq!(format_3_sig_figs(0.5), "0.5");
/// assert_eq!(format_3_sig_figs(1234.5), "1,235");
/// ```
#[must_use]
pub fn format_3_sig_figs(value: f64) -> String {
    if value > WHOLE_NUMBER_THRESHOLD {
        return with_thousands_separators(round_to(value, 0));
    }
    with_thousands_separators(round_to_significant(value, 3))
}

/// Formats `value` in its shortest form with commas between thousands.
///
/// Only the integer part is grouped.
#[must_use]
pub fn with_thousands_separators(value: f64) -> String {
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

fn round_to_significant(value: f64, figures: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }

    #[allow(clippy::cast_possible_truncation)]
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = figures - 1 - magnitude;

    if decimals >= 0 {
        round_to(value, decimals)
    } else {
        let scale = 10_f64.powi(-decimals);
        round_to(value / scale, 0) * scale
    }
}
