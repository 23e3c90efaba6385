//! Type-level numeric constraints checked once at construction.
//!
//! Cycle inputs come with simple numeric invariants: pressure drops and
//! super-heat are never negative, absolute temperatures and flow rates are
//! strictly positive, an isentropic efficiency lies in `(0, 1]`, and a vapor
//! quality lies in `[0, 1]`. The markers in this module express those
//! invariants so they are checked where values enter the crate.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//! - [`UnitInterval`]: Closed unit interval `0 ≤ x ≤ 1`
//! - [`UnitIntervalLowerOpen`]: Lower-open unit interval `0 < x ≤ 1`
//!
//! Each marker is used with the generic [`Constrained<T, C>`] wrapper, or
//! directly through [`Constraint::check`] when only validation is needed.
//!
//! # Extending
//!
//! Custom invariants are defined by implementing [`Constraint<T>`] for a
//! zero-sized marker type.

mod sign;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use sign::{NonNegative, StrictlyPositive};
pub use unit_interval::{UnitBounds, UnitInterval, UnitIntervalLowerOpen};

/// A trait for enforcing numeric invariants at construction time.
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

/// A wrapper enforcing a numeric constraint at construction time.
///
/// # Example
///
/// ```
/// use twine_refrigeration::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{f64::VolumeRate, volume_rate::cubic_meter_per_second};
///
/// let flow = VolumeRate::new::<cubic_meter_per_second>(0.00653);
/// let nominal = Constrained::<_, StrictlyPositive>::new(flow).unwrap();
/// assert_eq!(nominal.into_inner(), flow);
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

/// Returns a reference to the inner unconstrained value.
impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
