use std::fmt;

use thiserror::Error;
use uom::si::f64::Pressure;

use super::Point;

/// The heat exchanger whose mean pressure is being searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exchanger {
    Condenser,
    Evaporator,
}

impl fmt::Display for Exchanger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condenser => f.write_str("condenser"),
            Self::Evaporator => f.write_str("evaporator"),
        }
    }
}

/// Errors that make one cycle calculation infeasible.
///
/// None of these leave a partially solved cycle behind: after an error the
/// solver holds no solution until the next successful calculation.
#[derive(Debug, Error)]
pub enum VccError {
    /// A mean-pressure search hit its iteration limit.
    ///
    /// This usually means the operating point is unphysical for the
    /// refrigerant or the property model is misbehaving near it.
    #[error("{exchanger} pressure search did not converge after {iters} iterations: residual={residual:?}")]
    NoConvergence {
        exchanger: Exchanger,

        /// Last pressure correction.
        residual: Pressure,

        iters: usize,
    },

    /// The expansion valve outlet is not a two-phase state.
    ///
    /// The evaporator search needs an inlet quality, which only exists when
    /// the liquid-line enthalpy falls inside the two-phase region.
    #[error("point {point} at {pressure:?} is not two-phase")]
    NotTwoPhase { point: Point, pressure: Pressure },

    /// A thermodynamic model operation failed.
    #[error("thermodynamic model failed: {context}")]
    ThermoModelFailed {
        /// Operation context for the thermodynamic model failure.
        context: String,

        /// Underlying thermodynamic model error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl VccError {
    /// Creates a thermo model failure error with context.
    pub(crate) fn thermo_failed(
        context: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ThermoModelFailed {
            context: context.into(),
            source: Box::new(err),
        }
    }
}
