use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is greater than zero.
///
/// Used for tube outer diameters, shell diameters and target tube counts.
///
/// # Examples
///
/// ```
/// use tubesheet_layout::support::constraint::{Constrained, StrictlyPositive};
///
/// let tube_od = StrictlyPositive::new(19.05).unwrap();
/// assert_eq!(tube_od.into_inner(), 19.05);
///
/// let tubes = Constrained::<usize, StrictlyPositive>::new(100).unwrap();
/// assert_eq!(tubes.get(), 100);
///
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(0_usize).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Wraps `value` if it is greater than zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::Zero`], [`ConstraintError::Negative`] or
    /// [`ConstraintError::NotANumber`].
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Length, length::millimeter};

    #[test]
    fn tube_counts() {
        assert_eq!(StrictlyPositive::new(1_usize).unwrap().get(), 1);
        assert_eq!(
            StrictlyPositive::new(0_usize).unwrap_err(),
            ConstraintError::Zero
        );
    }

    #[test]
    fn diameters() {
        let od = Length::new::<millimeter>(25.4);
        assert_eq!(StrictlyPositive::new(od).unwrap().as_ref(), &od);

        let flat = Length::new::<millimeter>(0.0);
        assert_eq!(
            StrictlyPositive::new(flat).unwrap_err(),
            ConstraintError::Zero
        );

        let inverted = Length::new::<millimeter>(-19.05);
        assert_eq!(
            StrictlyPositive::new(inverted).unwrap_err(),
            ConstraintError::Negative
        );
    }
}
