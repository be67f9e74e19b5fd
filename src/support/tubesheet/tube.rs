use std::ops::Deref;

use super::geometry::FIT_TOLERANCE;

/// Centre of one tube, relative to the shell centre.
///
/// Coordinates are in millimetres. A tube has no identity beyond its
/// position, and signed zeros are normalised so `(-0.0, y)` and `(0.0, y)`
/// compare equal bit for bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    pub x: f64,
    pub y: f64,
}

impl Tube {
    /// Creates a tube centred at `(x, y)`.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x + 0.0,
            y: y + 0.0,
        }
    }

    /// Distance from the shell centre to the tube centre.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Diameter of the smallest centred circle that contains this tube.
    #[must_use]
    pub fn extent(&self, tube_od: f64) -> f64 {
        self.radius() * 2.0 + tube_od
    }

    /// Returns `true` if this tube lies within an outer tube limit of `max_otl`.
    #[must_use]
    pub fn fits(&self, tube_od: f64, max_otl: f64) -> bool {
        self.extent(tube_od) <= max_otl + FIT_TOLERANCE
    }

    /// Centre-to-centre distance to another tube.
    #[must_use]
    pub fn distance(&self, other: &Tube) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Reflection across the vertical axis.
    #[must_use]
    pub fn mirror_x(&self) -> Self {
        Self::new(-self.x, self.y)
    }

    /// Reflection across the horizontal axis.
    #[must_use]
    pub fn mirror_y(&self) -> Self {
        Self::new(self.x, -self.y)
    }
}

/// The set of tubes placed in a shell.
///
/// Grid layouts are sorted by `(y, x)` ascending; radial layouts run clockwise
/// from the top of the ring. Dereferences to a slice of [`Tube`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TubeField(Vec<Tube>);

impl TubeField {
    /// Wraps an already-generated list of tubes.
    #[must_use]
    pub fn new(tubes: Vec<Tube>) -> Self {
        Self(tubes)
    }
}

impl Deref for TubeField {
    type Target = [Tube];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a TubeField {
    type Item = &'a Tube;
    type IntoIter = std::slice::Iter<'a, Tube>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
