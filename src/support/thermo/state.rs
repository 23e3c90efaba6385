use uom::si::f64::{MassDensity, Pressure, Ratio, ThermodynamicTemperature};

use crate::support::units::{SpecificEnthalpy, SpecificEntropy};

/// A fully resolved refrigerant state.
///
/// Property models return every field at once, so a `State` is a plain
/// record rather than a handle for further queries.
///
/// `quality` is the vapor mass fraction and is `Some` only for saturated and
/// two-phase states. Single-phase liquid and vapor states carry `None`.
///
/// # Example
///
/// ```
/// use twine_refrigeration::support::{thermo::State, units::{SpecificEnthalpy, SpecificEntropy}};
/// use uom::si::{
///     available_energy::kilojoule_per_kilogram,
///     f64::{MassDensity, Pressure, Ratio, ThermodynamicTemperature},
///     mass_density::kilogram_per_cubic_meter,
///     pressure::kilopascal,
///     ratio::ratio,
///     specific_heat_capacity::kilojoule_per_kilogram_kelvin,
///     thermodynamic_temperature::degree_celsius,
/// };
///
/// let dew = State {
///     temperature: ThermodynamicTemperature::new::<degree_celsius>(-10.0),
///     pressure: Pressure::new::<kilopascal>(200.6),
///     enthalpy: SpecificEnthalpy::new::<kilojoule_per_kilogram>(392.7),
///     entropy: SpecificEntropy::new::<kilojoule_per_kilogram_kelvin>(1.732),
///     density: MassDensity::new::<kilogram_per_cubic_meter>(10.0),
///     quality: Some(Ratio::new::<ratio>(1.0)),
/// };
/// assert!(dew.is_saturated_or_two_phase());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub enthalpy: SpecificEnthalpy,
    pub entropy: SpecificEntropy,
    pub density: MassDensity,
    pub quality: Option<Ratio>,
}

impl State {
    /// Returns `true` if the state lies on or inside the two-phase dome.
    #[must_use]
    pub fn is_saturated_or_two_phase(&self) -> bool {
        self.quality.is_some()
    }

    /// Returns a new state with the given pressure, keeping other fields unchanged.
    #[must_use]
    pub fn with_pressure(self, pressure: Pressure) -> Self {
        Self { pressure, ..self }
    }
}
