use crate::support::thermo::State;

use super::ThermoModel;

/// Capability for resolving a [`State`] from a typed input pair.
///
/// `StateFrom<Input>` expresses, at compile time, which combinations of
/// independent properties a model can resolve. If a model does not implement
/// `StateFrom<Input>`, that input is simply not supported (no runtime "not
/// implemented" errors).
///
/// ## Input pairs used by the cycle solver
///
/// Inputs are plain tuples of [`uom`] quantities. Vapor quality is passed as a
/// [`Ratio`](uom::si::f64::Ratio) in `[0, 1]`.
///
/// - `(Pressure, ThermodynamicTemperature)`: single-phase states
/// - `(Pressure, Ratio)`: saturation and two-phase states at a pressure
/// - `(Ratio, ThermodynamicTemperature)`: saturation and two-phase states at a temperature
/// - `(SpecificEnthalpy, Pressure)`: expansion-valve outlet and compressor outlet
/// - `(Pressure, SpecificEntropy)`: isentropic compression
pub trait StateFrom<Input>: ThermoModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve a refrigerant state from the provided input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be resolved from `input`.
    fn state_from(&self, input: Input) -> Result<State, Self::Error>;
}

/// A borrowed model resolves the same inputs as the model itself.
impl<Input, T: StateFrom<Input> + ?Sized> StateFrom<Input> for &T {
    type Error = T::Error;

    fn state_from(&self, input: Input) -> Result<State, Self::Error> {
        (**self).state_from(input)
    }
}
