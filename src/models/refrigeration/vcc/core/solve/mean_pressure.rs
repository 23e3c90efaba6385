//! Fixed-point search for a heat exchanger's mean pressure.
//!
//! Inlet and outlet pressures sit half the pressure drop above and below the
//! mean. Each step compares the mean of the boundary saturation temperatures
//! with the target, shifts the inlet temperature by the difference, and
//! moves the mean by however much the inlet saturation pressure changes.

use tracing::debug;
use uom::si::{f64::Pressure, pressure::pascal};

use crate::models::refrigeration::vcc::core::{Exchanger, SearchConfig, VccError};

/// The converged mean pressure and the number of steps it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct MeanPressure {
    pub(super) mean: Pressure,
    pub(super) iters: usize,
}

impl MeanPressure {
    /// Pressure half the drop above the mean.
    pub(super) fn inlet(&self, pressure_drop: Pressure) -> Pressure {
        self.mean + 0.5 * pressure_drop
    }

    /// Pressure half the drop below the mean.
    pub(super) fn outlet(&self, pressure_drop: Pressure) -> Pressure {
        self.mean - 0.5 * pressure_drop
    }
}

/// Runs the search from `seed`.
///
/// `correction` maps the current mean to the next pressure correction.
/// The search stops once a correction is within the configured tolerance,
/// after applying it.
///
/// # Errors
///
/// Returns [`VccError::NoConvergence`] if the iteration limit is reached, or
/// any error returned by `correction`.
pub(super) fn search(
    exchanger: Exchanger,
    seed: Pressure,
    config: &SearchConfig,
    mut correction: impl FnMut(Pressure) -> Result<Pressure, VccError>,
) -> Result<MeanPressure, VccError> {
    let mut mean = seed;
    let mut residual = Pressure::new::<pascal>(f64::NAN);

    for iter in 1..=config.max_iters {
        residual = correction(mean)?;
        mean += residual;

        debug!(
            %exchanger,
            iter,
            mean_pa = mean.get::<pascal>(),
            residual_pa = residual.get::<pascal>(),
            "mean pressure step"
        );

        if residual.abs() <= config.pressure_tol {
            return Ok(MeanPressure { mean, iters: iter });
        }
    }

    Err(VccError::NoConvergence {
        exchanger,
        residual,
        iters: config.max_iters,
    })
}
