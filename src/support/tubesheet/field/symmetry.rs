use crate::support::tubesheet::Tube;

/// Completes a field from its upper rows by reflecting across both axes.
///
/// The result holds each position once and is sorted by `(y, x)`.
pub(super) fn reflect_quadrants(upper: &[Tube]) -> Vec<Tube> {
    let mut tubes: Vec<Tube> = upper
        .iter()
        .copied()
        .chain(upper.iter().map(Tube::mirror_x))
        .collect();

    let lower: Vec<Tube> = tubes.iter().map(Tube::mirror_y).collect();
    tubes.extend(lower);

    tubes.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
    tubes.dedup_by(|a, b| a.x.to_bits() == b.x.to_bits() && a.y.to_bits() == b.y.to_bits());
    tubes
}
