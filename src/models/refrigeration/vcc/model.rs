//! [`twine_core::Model`] adapter for the cycle solver.

use thiserror::Error;
use twine_core::Model;

use super::core::{
    Compressor, OperatingConditions, ParameterError, Solution, Vcc, VccConfig, VccError,
    VccThermoModel,
};

/// Input to [`VccModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct VccInput {
    pub conditions: OperatingConditions,
    pub compressor: Compressor,
}

impl VccInput {
    /// Conditions with an isentropic compressor.
    #[must_use]
    pub fn new(conditions: OperatingConditions) -> Self {
        Self {
            conditions,
            compressor: Compressor::isentropic(),
        }
    }

    #[must_use]
    pub fn with_compressor(mut self, compressor: Compressor) -> Self {
        self.compressor = compressor;
        self
    }
}

/// Errors from [`VccModel`].
#[derive(Debug, Error)]
pub enum VccModelError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Solve(#[from] VccError),
}

/// A vapor-compression cycle as a [`Model`].
///
/// Every call solves the cycle from scratch for its input. Nothing is
/// cached between calls, so the model is deterministic in its input.
///
/// # Example
///
/// ```
/// use twine_core::Model;
/// use twine_refrigeration::{
///     models::refrigeration::vcc::{OperatingConditions, VccInput, VccModel},
///     support::thermo::{fluid::Refrigerant, model::{IdealRefrigerant, IdealRefrigerantParameters}},
/// };
///
/// let thermo = IdealRefrigerant::new(
///     Refrigerant::named("R404A"),
///     IdealRefrigerantParameters::halocarbon(),
/// )?;
/// let model = VccModel::new(thermo);
///
/// let solution = model.call(&VccInput::new(OperatingConditions::sandbox()))?;
/// assert!(solution.cooling_capacity().value > 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct VccModel<M> {
    thermo: M,
    config: VccConfig,
}

impl<M: VccThermoModel> VccModel<M> {
    #[must_use]
    pub fn new(thermo: M) -> Self {
        Self::with_config(thermo, VccConfig::default())
    }

    #[must_use]
    pub fn with_config(thermo: M, config: VccConfig) -> Self {
        Self { thermo, config }
    }

    #[must_use]
    pub fn thermo(&self) -> &M {
        &self.thermo
    }
}

impl<M: VccThermoModel> Model for VccModel<M> {
    type Input = VccInput;
    type Output = Solution;
    type Error = VccModelError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut vcc = Vcc::with_config(&self.thermo, input.conditions, self.config)?;
        vcc.set_compressor(input.compressor.clone());
        Ok(vcc.calculate()?.clone())
    }
}
