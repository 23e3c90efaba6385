//! Shared fixtures for solver tests.

use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, Pressure, Ratio, TemperatureInterval, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::{
    thermo::{
        State,
        fluid::Refrigerant,
        model::{IdealRefrigerant, IdealRefrigerantParameters},
    },
    units::{SpecificEnthalpy, SpecificEntropy},
};

pub(crate) fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}

/// A single-component halocarbon with no glide.
pub(crate) fn halocarbon() -> IdealRefrigerant {
    IdealRefrigerant::new(
        Refrigerant::named("R134A"),
        IdealRefrigerantParameters::halocarbon(),
    )
    .unwrap()
}

/// A zeotropic blend with `glide` kelvin between bubble and dew.
pub(crate) fn blend(glide: f64) -> IdealRefrigerant {
    IdealRefrigerant::new(
        Refrigerant::named("R404A"),
        IdealRefrigerantParameters::halocarbon()
            .with_glide(TemperatureInterval::new::<delta_kelvin>(glide)),
    )
    .unwrap()
}

/// A made-up state for table and deviation tests.
pub(crate) fn saturated_state(t: f64, p: f64, x: f64) -> State {
    State {
        temperature: ThermodynamicTemperature::new::<kelvin>(t),
        pressure: Pressure::new::<pascal>(p),
        enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(1000.0 * t),
        entropy: SpecificEntropy::new::<joule_per_kilogram_kelvin>(4.0 * t),
        density: MassDensity::new::<kilogram_per_cubic_meter>(10.0 + x),
        quality: Some(Ratio::new::<ratio>(x)),
    }
}
