use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constraint, ConstraintError};

/// Zero or greater.
///
/// Pressure drops, line temperature changes, super-heat and sub-cooling are
/// all non-negative magnitudes.
///
/// ```
/// use twine_refrigeration::support::constraint::{Constraint, NonNegative};
/// use uom::si::{f64::Pressure, pressure::kilopascal};
///
/// assert!(NonNegative::check(&Pressure::new::<kilopascal>(20.0)).is_ok());
/// assert!(NonNegative::check(&0.0).is_ok());
/// assert!(NonNegative::check(&-7.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

/// Greater than zero.
///
/// Absolute temperatures, pressures and flow rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

fn sign<T: PartialOrd + Zero>(value: &T) -> Result<Ordering, ConstraintError> {
    value
        .partial_cmp(&T::zero())
        .ok_or(ConstraintError::NotANumber)
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match sign(value)? {
            Ordering::Less => Err(ConstraintError::Negative),
            Ordering::Equal | Ordering::Greater => Ok(()),
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match sign(value)? {
            Ordering::Less => Err(ConstraintError::Negative),
            Ordering::Equal => Err(ConstraintError::Zero),
            Ordering::Greater => Ok(()),
        }
    }
}
