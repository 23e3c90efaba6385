//! Supporting utilities used by models.
//!
//! These modules are public because they are useful on their own (a property
//! model can be used without a cycle, a curve without a sweep), but their
//! APIs are not stable.

pub mod constraint;
pub mod curve;
pub mod thermo;
pub mod units;
