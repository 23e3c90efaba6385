//! Vapor-compression cycle models.
//!
//! [`Vcc`] is the stateful solver: it keeps its operating conditions,
//! reruns only the heat exchanger searches that a change invalidated, and
//! suits parameter sweeps. [`VccModel`] wraps the same computation as a
//! stateless [`twine_core::Model`] for use in Twine compositions.
//!
//! The computational core is in the internal `core` module.

mod core;
mod model;

pub use self::core::{
    Bound, Coefficients, Compressor, Condenser, CycleState, Deviation, Deviations, Evaporator,
    Exchanger, Line, OperatingConditions, OutOfRangeError, Parameter, ParameterError,
    ParseParameterError, PerformanceSurface, Point, Rating, SearchConfig, Solution, Stale,
    SurfaceCompressor, SurfaceError, Table, Vcc, VccConfig, VccError, VccThermoModel,
};
pub use model::{VccInput, VccModel, VccModelError};

#[cfg(test)]
pub(crate) use self::core::test_support;
