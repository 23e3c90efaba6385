//! CoolProp-backed refrigerant property model.
//!
//! The model opens one `AbstractState` for the refrigerant's backend and
//! component string, and fixes a blend's composition once at construction.
//! Every query updates that state from an input pair and reads back a full
//! [`State`].

mod error;

use std::sync::{Mutex, MutexGuard};

use rfluids::{
    io::{FluidInputPair, FluidParam, FluidTrivialParam},
    native::AbstractState,
};
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, MolarMass, Pressure, Ratio, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    molar_mass::kilogram_per_mole,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    thermo::{
        PropertyError, State,
        capability::{CriticalPoint, HasCriticalPoint, StateFrom, ThermoModel},
        fluid::Refrigerant,
    },
    units::{SpecificEnthalpy, SpecificEntropy},
};

pub use error::CoolPropError;

/// A refrigerant property model backed by `CoolProp`.
///
/// Queries are serialized through a mutex so each update and its reads stay
/// paired.
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub struct CoolProp {
    refrigerant: Refrigerant,
    state: Mutex<AbstractState>,
}

impl ThermoModel for CoolProp {
    type Fluid = Refrigerant;

    fn fluid(&self) -> &Refrigerant {
        &self.refrigerant
    }
}

impl CoolProp {
    /// Opens a model for `refrigerant` using its backend and components.
    ///
    /// # Errors
    ///
    /// Returns [`CoolPropError`] if the backend does not know the components
    /// or rejects the blend's mole fractions.
    pub fn new(refrigerant: Refrigerant) -> Result<Self, CoolPropError> {
        let fluid = refrigerant.fluid_string();
        let mut state = AbstractState::new(refrigerant.backend(), &fluid)?;

        if refrigerant.is_mixture() {
            let fractions = refrigerant.mole_fractions();
            if let Err(source) = state.set_fractions(&fractions) {
                return Err(CoolPropError::Composition {
                    fluid,
                    fractions,
                    source,
                });
            }
        }

        Ok(Self {
            refrigerant,
            state: Mutex::new(state),
        })
    }

    /// Returns the molar mass of the refrigerant.
    ///
    /// # Errors
    ///
    /// Returns [`CoolPropError`] if the call fails.
    pub fn molar_mass(&self) -> Result<MolarMass, CoolPropError> {
        let state = self.state.lock()?;
        let molar_mass = state.keyed_output(FluidTrivialParam::MolarMass)?;
        Ok(MolarMass::new::<kilogram_per_mole>(molar_mass))
    }

    /// Locks the abstract state and updates it from an input pair.
    fn update(
        &self,
        pair: FluidInputPair,
        first: f64,
        second: f64,
    ) -> Result<MutexGuard<'_, AbstractState>, CoolPropError> {
        let mut state = self.state.lock()?;
        state.update(pair, first, second)?;
        Ok(state)
    }

    /// Updates from an input pair and reads back the full state.
    fn resolve(
        &self,
        pair: FluidInputPair,
        first: f64,
        second: f64,
    ) -> Result<State, CoolPropError> {
        let state = self.update(pair, first, second)?;

        // Single-phase states report a quality outside [0, 1].
        let quality = state.keyed_output(FluidParam::Q)?;

        Ok(State {
            temperature: ThermodynamicTemperature::new::<kelvin>(
                state.keyed_output(FluidParam::T)?,
            ),
            pressure: Pressure::new::<pascal>(state.keyed_output(FluidParam::P)?),
            enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(
                state.keyed_output(FluidParam::HMass)?,
            ),
            entropy: SpecificEntropy::new::<joule_per_kilogram_kelvin>(
                state.keyed_output(FluidParam::SMass)?,
            ),
            density: MassDensity::new::<kilogram_per_cubic_meter>(
                state.keyed_output(FluidParam::DMass)?,
            ),
            quality: (0.0..=1.0)
                .contains(&quality)
                .then(|| Ratio::new::<ratio>(quality)),
        })
    }
}

impl HasCriticalPoint for CoolProp {
    fn critical_point(&self) -> Result<CriticalPoint, PropertyError> {
        let state = self.state.lock().map_err(CoolPropError::from)?;
        let read = |param: FluidTrivialParam| {
            state
                .keyed_output(param)
                .map_err(|err| PropertyError::from(CoolPropError::Rfluids(err)))
        };

        Ok(CriticalPoint {
            temperature: ThermodynamicTemperature::new::<kelvin>(read(
                FluidTrivialParam::TCritical,
            )?),
            pressure: Pressure::new::<pascal>(read(FluidTrivialParam::PCritical)?),
            density: MassDensity::new::<kilogram_per_cubic_meter>(read(
                FluidTrivialParam::DMassCritical,
            )?),
        })
    }
}

impl StateFrom<(Pressure, ThermodynamicTemperature)> for CoolProp {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (pressure, temperature): (Pressure, ThermodynamicTemperature),
    ) -> Result<State, Self::Error> {
        self.resolve(
            FluidInputPair::PT,
            pressure.get::<pascal>(),
            temperature.get::<kelvin>(),
        )
    }
}

impl StateFrom<(Pressure, Ratio)> for CoolProp {
    type Error = CoolPropError;

    fn state_from(&self, (pressure, quality): (Pressure, Ratio)) -> Result<State, Self::Error> {
        self.resolve(
            FluidInputPair::PQ,
            pressure.get::<pascal>(),
            quality.get::<ratio>(),
        )
    }
}

impl StateFrom<(Ratio, ThermodynamicTemperature)> for CoolProp {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (quality, temperature): (Ratio, ThermodynamicTemperature),
    ) -> Result<State, Self::Error> {
        self.resolve(
            FluidInputPair::QT,
            quality.get::<ratio>(),
            temperature.get::<kelvin>(),
        )
    }
}

impl StateFrom<(SpecificEnthalpy, Pressure)> for CoolProp {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (enthalpy, pressure): (SpecificEnthalpy, Pressure),
    ) -> Result<State, Self::Error> {
        self.resolve(
            FluidInputPair::HMassP,
            enthalpy.get::<joule_per_kilogram>(),
            pressure.get::<pascal>(),
        )
    }
}

impl StateFrom<(Pressure, SpecificEntropy)> for CoolProp {
    type Error = CoolPropError;

    fn state_from(
        &self,
        (pressure, entropy): (Pressure, SpecificEntropy),
    ) -> Result<State, Self::Error> {
        self.resolve(
            FluidInputPair::PSMass,
            pressure.get::<pascal>(),
            entropy.get::<joule_per_kilogram_kelvin>(),
        )
    }
}

// rfluids serializes every CoolProp call through a global lock, and the local
// mutex keeps each update paired with its reads.
#[allow(dead_code)]
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn check() {
        assert_send_sync::<CoolProp>();
    }
};

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::kilojoule_per_kilogram, molar_mass::gram_per_mole,
        pressure::kilopascal, specific_heat_capacity::kilojoule_per_kilogram_kelvin,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::models::refrigeration::vcc::{Compressor, OperatingConditions, Vcc};

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    fn quality(x: f64) -> Ratio {
        Ratio::new::<ratio>(x)
    }

    fn r134a() -> CoolProp {
        CoolProp::new(Refrigerant::pure("R134A").with_backend("HEOS")).unwrap()
    }

    fn r404a() -> CoolProp {
        CoolProp::new(Refrigerant::r404a().with_backend("HEOS")).unwrap()
    }

    #[test]
    fn r134a_molar_mass() {
        let molar_mass = r134a().molar_mass().unwrap();
        assert_relative_eq!(molar_mass.get::<gram_per_mole>(), 102.032, epsilon = 1e-3);
    }

    #[test]
    fn r134a_saturated_vapor() {
        let thermo = r134a();
        let dew = thermo.state_from((quality(1.0), celsius(-10.0))).unwrap();

        assert_relative_eq!(dew.pressure.get::<kilopascal>(), 200.6, epsilon = 0.5);
        assert_relative_eq!(dew.enthalpy.get::<kilojoule_per_kilogram>(), 392.7, epsilon = 0.5);
        assert_relative_eq!(
            dew.entropy.get::<kilojoule_per_kilogram_kelvin>(),
            1.733,
            epsilon = 5e-3
        );
        assert_relative_eq!(dew.quality.unwrap().get::<ratio>(), 1.0, epsilon = 1e-9);

        let back = thermo.state_from((dew.pressure, quality(1.0))).unwrap();
        assert_relative_eq!(
            back.temperature.get::<kelvin>(),
            dew.temperature.get::<kelvin>(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn single_phase_states_carry_no_quality() {
        let thermo = r134a();
        let p = Pressure::new::<kilopascal>(200.0);
        let vapor = thermo.state_from((p, celsius(20.0))).unwrap();
        assert!(vapor.quality.is_none());

        let from_h = thermo.state_from((vapor.enthalpy, p)).unwrap();
        let from_s = thermo.state_from((p, vapor.entropy)).unwrap();
        for state in [from_h, from_s] {
            assert_relative_eq!(
                state.temperature.get::<kelvin>(),
                vapor.temperature.get::<kelvin>(),
                max_relative = 1e-8
            );
        }
    }

    #[test]
    fn r134a_critical_point() {
        let critical = r134a().critical_point().unwrap();
        assert_relative_eq!(critical.temperature.get::<kelvin>(), 374.21, epsilon = 0.01);
        assert_relative_eq!(critical.pressure.get::<kilopascal>(), 4059.3, epsilon = 0.5);
    }

    #[test]
    fn blend_has_a_glide() {
        let thermo = r404a();
        let p = Pressure::new::<kilopascal>(300.0);
        let bubble = thermo.state_from((p, quality(0.0))).unwrap();
        let dew = thermo.state_from((p, quality(1.0))).unwrap();

        let glide = dew.temperature.get::<kelvin>() - bubble.temperature.get::<kelvin>();
        assert!(glide > 0.0 && glide < 2.0, "glide {glide} K");
    }

    #[test]
    fn unknown_fluid_is_rejected() {
        let result = CoolProp::new(Refrigerant::pure("NotARefrigerant").with_backend("HEOS"));
        match result {
            Err(CoolPropError::Rfluids(_)) => {}
            Err(other) => panic!("expected an rfluids error, got {other:?}"),
            Ok(_) => panic!("expected an rfluids error, got a model"),
        }
    }

    #[test]
    fn solves_a_cycle() {
        let mut vcc = Vcc::new(r134a(), OperatingConditions::sandbox()).unwrap();
        vcc.set_compressor(Compressor::from_efficiency(quality(0.7)).unwrap());
        let solution = vcc.calculate().unwrap();

        let cop = solution.cop_2().get::<ratio>();
        assert!(cop > 1.0 && cop < 3.0, "cooling COP {cop}");
        assert_relative_eq!(
            solution.cop_1().get::<ratio>() - cop,
            1.0,
            epsilon = 1e-9
        );
    }
}
