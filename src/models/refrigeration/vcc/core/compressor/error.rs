use std::fmt;

use thiserror::Error;
use uom::si::f64::ThermodynamicTemperature;

/// Which edge of a rating surface's validity rectangle was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    EvaporatorMin,
    EvaporatorMax,
    CondenserMin,
    CondenserMax,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EvaporatorMin => "evaporator minimum",
            Self::EvaporatorMax => "evaporator maximum",
            Self::CondenserMin => "condenser minimum",
            Self::CondenserMax => "condenser maximum",
        })
    }
}

/// An operating point outside a rating surface.
///
/// This is a warning: the compressor keeps its last valid rating.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("temperature {actual:?} is beyond the {bound} of {limit:?}")]
pub struct OutOfRangeError {
    pub bound: Bound,
    pub limit: ThermodynamicTemperature,
    pub actual: ThermodynamicTemperature,
}

/// A malformed rating surface.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SurfaceError {
    #[error("coefficient {index} of the {row} row is not finite")]
    NonFiniteCoefficient { row: &'static str, index: usize },

    #[error("{exchanger} range is empty or not finite: {min:?} to {max:?}")]
    InvalidRange {
        exchanger: &'static str,
        min: ThermodynamicTemperature,
        max: ThermodynamicTemperature,
    },
}
