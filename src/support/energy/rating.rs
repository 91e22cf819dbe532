use std::ops::Deref;

use uom::si::{f64::Ratio, ratio::ratio};

use crate::support::constraint::{
    Constrained, ConstraintResult, StrictlyPositive, UnitInterval, UnitIntervalLowerOpen,
};

/// Coefficient of performance of a refrigeration unit.
///
/// Heat removed per unit of electrical energy; must be strictly positive.
/// Values above one are the norm for chillers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CoefficientOfPerformance(Constrained<Ratio, StrictlyPositive>);

impl CoefficientOfPerformance {
    /// Create a [`CoefficientOfPerformance`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not strictly positive.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Create a [`CoefficientOfPerformance`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is not strictly positive.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(StrictlyPositive::new(quantity)?))
    }
}

impl Deref for CoefficientOfPerformance {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Conversion efficiency of a heater, dryer or boiler, in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Efficiency(Constrained<Ratio, UnitIntervalLowerOpen>);

impl Efficiency {
    /// Create an [`Efficiency`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside `(0, 1]`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Create an [`Efficiency`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity lies outside `(0, 1]`.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(UnitIntervalLowerOpen::new(quantity)?))
    }
}

impl Deref for Efficiency {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Share of an energy stream in `[0, 1]`.
///
/// Used for the part of shaft work dissipated into the broth and for the
/// per-stage thermal loss allowances.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Fraction(Constrained<Ratio, UnitInterval>);

impl Fraction {
    /// Create a [`Fraction`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside `[0, 1]`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Create a [`Fraction`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity lies outside `[0, 1]`.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(quantity)?))
    }
}

impl Deref for Fraction {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::constraint::ConstraintError;

    #[test]
    fn chiller_cop_above_one_is_valid() {
        let cop = CoefficientOfPerformance::new(3.0).unwrap();
        assert_eq!(cop.get::<ratio>(), 3.0);
        assert_eq!(CoefficientOfPerformance::new(0.0), Err(ConstraintError::Zero));
    }

    #[test]
    fn efficiency_must_be_positive_and_at_most_one() {
        assert!(Efficiency::new(0.8).is_ok());
        assert_eq!(Efficiency::new(0.0), Err(ConstraintError::BelowMinimum));
        assert_eq!(Efficiency::new(1.2), Err(ConstraintError::AboveMaximum));
    }

    #[test]
    fn fraction_accepts_zero() {
        assert!(Fraction::new(0.0).is_ok());
        assert!(Fraction::new(0.9).is_ok());
        assert_eq!(Fraction::new(-0.1), Err(ConstraintError::BelowMinimum));
    }
}
