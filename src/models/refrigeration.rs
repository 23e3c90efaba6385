//! Refrigeration system models.
//!
//! - [`vcc`]: single-stage vapor-compression cycle solver.
//! - [`comparison`]: side-by-side sweeps of several refrigerants.
//! - [`tewi`]: total equivalent warming impact of a solved system.

pub mod comparison;
pub mod tewi;
pub mod vcc;
