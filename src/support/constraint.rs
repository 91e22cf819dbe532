//! Construction-time numeric constraints for process parameters.
//!
//! Recipe values arrive as plain numbers. Before they reach a balance
//! calculator they are wrapped in [`Constrained<T, C>`], which guarantees the
//! value satisfies the marker constraint `C` for as long as it lives.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: zero or greater (masses, loss powers, hold times)
//! - [`StrictlyPositive`]: greater than zero (operating windows, COP, specific heats)
//! - [`UnitInterval`]: closed interval `0 ≤ x ≤ 1` (loss and dissipation fractions)
//! - [`UnitIntervalLowerOpen`]: `0 < x ≤ 1` (conversion efficiencies)
//!
//! Every marker also offers a `new()` shortcut, e.g. `StrictlyPositive::new(3.0)`.
//!
//! # Extending
//!
//! Implement [`Constraint<T>`] for your own zero-sized marker type.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval, UnitIntervalLowerOpen};

/// A numeric invariant checked when a [`Constrained`] value is built.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
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
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A value that is known to satisfy the constraint `C`.
///
/// # Example
///
/// ```
/// use sophorolipid_energy::support::constraint::{Constrained, StrictlyPositive};
///
/// let cop = Constrained::<_, StrictlyPositive>::new(3.0).unwrap();
/// assert_eq!(cop.into_inner(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
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

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
