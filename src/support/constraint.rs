//! Numeric invariants checked once, at construction.
//!
//! Layout inputs carry simple numeric preconditions: a tube outer diameter or
//! shell diameter must be strictly positive, an OTL clearance or ligament must
//! be non-negative, and a target tube count must be at least one. Wrapping a
//! value in [`Constrained<T, C>`] records that its check has passed, so code
//! further down never re-validates it.
//!
//! - [`NonNegative`]: zero or greater
//! - [`StrictlyPositive`]: greater than zero
//!
//! Other bounds are expressed by implementing [`Constraint<T>`] on a
//! zero-sized marker, as [`crate::support::tubesheet::NoOverlap`] does for
//! pitch ratios.

mod non_negative;
mod strictly_positive;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;

/// A numeric invariant enforced by [`Constrained`].
pub trait Constraint<T> {
    /// Checks that `value` satisfies the invariant.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] naming the violated bound.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// A violated [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
}

/// A value known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use tubesheet_layout::support::constraint::{Constrained, StrictlyPositive};
///
/// let tubes = Constrained::<_, StrictlyPositive>::new(42).unwrap();
/// assert_eq!(tubes.get(), 42);
/// assert!(Constrained::<usize, StrictlyPositive>::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Checks `value` against `C` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] reported by `C`.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy, C: Constraint<T>> Constrained<T, C> {
    /// Returns a copy of the inner value.
    pub fn get(&self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
