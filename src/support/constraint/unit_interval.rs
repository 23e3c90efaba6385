use std::cmp::Ordering;

use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constraint, ConstraintError};

/// Supplies 0 and 1 for types used with the unit interval constraints.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// `0 ≤ x ≤ 1`, as for a vapor quality.
///
/// ```
/// use twine_refrigeration::support::constraint::{Constraint, UnitInterval};
/// use uom::si::{f64::Ratio, ratio::ratio};
///
/// assert!(UnitInterval::check(&Ratio::new::<ratio>(0.667)).is_ok());
/// assert!(UnitInterval::check(&1.0001).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

/// `0 < x ≤ 1`, as for a compressor isentropic efficiency.
///
/// ```
/// use twine_refrigeration::support::constraint::{Constrained, UnitIntervalLowerOpen};
/// use uom::si::{f64::Ratio, ratio::{percent, ratio}};
///
/// let eta = Constrained::<_, UnitIntervalLowerOpen>::new(Ratio::new::<ratio>(0.555)).unwrap();
/// assert!((eta.as_ref().get::<percent>() - 55.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalLowerOpen;

impl UnitIntervalLowerOpen {
    /// Wraps `value` if `0 < value ≤ 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::BelowMinimum`] at or below zero,
    /// [`ConstraintError::AboveMaximum`] above one, and
    /// [`ConstraintError::NotANumber`] for `NaN`.
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<super::Constrained<T, UnitIntervalLowerOpen>, ConstraintError> {
        super::Constrained::new(value)
    }
}

/// Places `value` against both ends of the unit interval.
fn locate<T: UnitBounds>(value: &T) -> Result<(Ordering, Ordering), ConstraintError> {
    match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
        (Some(low), Some(high)) => Ok((low, high)),
        _ => Err(ConstraintError::NotANumber),
    }
}

impl<T: UnitBounds> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match locate(value)? {
            (Ordering::Less, _) => Err(ConstraintError::BelowMinimum),
            (_, Ordering::Greater) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalLowerOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match locate(value)? {
            (Ordering::Less | Ordering::Equal, _) => Err(ConstraintError::BelowMinimum),
            (_, Ordering::Greater) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}
