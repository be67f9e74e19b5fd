use crate::support::tubesheet::{Tube, layout::LayoutConstants};

/// Upper bound on rows and on columns per row.
pub(super) const MAX_SCAN_STEPS: u32 = 999_999;

/// Scans the upper half-plane of the grid, row by row, for admissible tubes.
///
/// Columns are shifted left by `shift` and odd rows right by the layout's
/// row shift. Within a row tube extents only grow, so the first rejected
/// tube ends the row.
pub(super) fn upper_rows(
    constants: &LayoutConstants,
    shift: f64,
    tube_od: f64,
    max_otl: f64,
) -> Vec<Tube> {
    let mut tubes = Vec::new();

    for row in 0..MAX_SCAN_STEPS {
        let y = f64::from(row) * constants.dy;
        if y > max_otl {
            break;
        }

        let stagger = if row % 2 == 0 { 0.0 } else { constants.row_shift };
        for col in 0..MAX_SCAN_STEPS {
            let tube = Tube::new(stagger + f64::from(col) * constants.dx - shift, y);
            if !tube.fits(tube_od, max_otl) {
                break;
            }
            tubes.push(tube);
        }
    }

    tubes
}
