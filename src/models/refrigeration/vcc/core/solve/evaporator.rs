use tracing::{debug, trace};
use uom::{
    ConstZero,
    si::{
        f64::{Pressure, Ratio, TemperatureInterval, ThermodynamicTemperature},
        ratio::ratio,
        thermodynamic_temperature::kelvin,
    },
};

use crate::{
    models::refrigeration::vcc::core::{
        Exchanger, OperatingConditions, Point, SearchConfig, VccError, traits::VccThermoModel,
    },
    support::{
        thermo::State,
        units::{SpecificEnthalpy, TemperatureOffset},
    },
};

use super::{mean_pressure, saturated_vapor};

/// Points 7 to 9: evaporator inlet, evaporator dew point and evaporator outlet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EvaporatorPoints {
    pub(crate) inlet: State,
    pub(crate) dew: State,
    pub(crate) outlet: State,
    pub(crate) iters: usize,
}

/// Solves the evaporator for an expansion-valve inlet enthalpy.
///
/// The valve is isenthalpic, so `inlet_enthalpy` is the liquid-line outlet
/// enthalpy and becomes the enthalpy of point 7.
///
/// # Errors
///
/// Returns [`VccError::NotTwoPhase`] if the inlet enthalpy falls outside the
/// two-phase region at the trial inlet pressure, and other [`VccError`]
/// variants if the search does not converge or a property query fails.
pub(crate) fn solve(
    thermo: &impl VccThermoModel,
    conditions: &OperatingConditions,
    inlet_enthalpy: SpecificEnthalpy,
    config: &SearchConfig,
) -> Result<EvaporatorPoints, VccError> {
    let evaporator = &conditions.evaporator;
    let target = evaporator.temperature.get::<kelvin>();
    let drop = evaporator.pressure_drop;

    // The outlet sits about a third of the way from bubble to dew.
    let seed = thermo
        .state_from((Ratio::new::<ratio>(0.667), evaporator.temperature))
        .map_err(|err| VccError::thermo_failed("evaporator seed pressure", err))?
        .pressure;

    let found = mean_pressure::search(Exchanger::Evaporator, seed, config, |mean| {
        let p_in = mean + 0.5 * drop;
        let p_out = mean - 0.5 * drop;

        let inlet = inlet_state(thermo, inlet_enthalpy, p_in)?;
        let quality = inlet.quality.ok_or(VccError::NotTwoPhase {
            point: Point::EvaporatorInlet,
            pressure: p_in,
        })?;

        let t_in = inlet.temperature.get::<kelvin>();
        let t_out = thermo
            .state_from((p_out, saturated_vapor()))
            .map_err(|err| VccError::thermo_failed("evaporator outlet dew point", err))?
            .temperature
            .get::<kelvin>();

        let diff = 0.5 * (t_in + t_out) - target;
        let corrected = ThermodynamicTemperature::new::<kelvin>(t_in - diff);

        let p_corrected = thermo
            .state_from((quality, corrected))
            .map_err(|err| VccError::thermo_failed("evaporator corrected inlet pressure", err))?
            .pressure;

        Ok(p_corrected - p_in)
    })?;

    let inlet = inlet_state(thermo, inlet_enthalpy, found.inlet(drop))?;
    let dew = thermo
        .state_from((found.outlet(drop), saturated_vapor()))
        .map_err(|err| VccError::thermo_failed("point 8", err))?;

    let outlet = if evaporator.super_heat == TemperatureInterval::ZERO {
        trace!("no super-heat, point 9 is fixed by quality");
        thermo
            .state_from((dew.pressure, saturated_vapor()))
            .map_err(|err| VccError::thermo_failed("point 9", err))?
    } else {
        thermo
            .state_from((
                dew.pressure,
                dew.temperature.raised_by(evaporator.super_heat),
            ))
            .map_err(|err| VccError::thermo_failed("point 9", err))?
    };

    debug!(
        iters = found.iters,
        inlet_k = inlet.temperature.get::<kelvin>(),
        dew_k = dew.temperature.get::<kelvin>(),
        "evaporator solved"
    );

    Ok(EvaporatorPoints {
        inlet,
        dew,
        outlet,
        iters: found.iters,
    })
}

fn inlet_state(
    thermo: &impl VccThermoModel,
    enthalpy: SpecificEnthalpy,
    pressure: Pressure,
) -> Result<State, VccError> {
    thermo
        .state_from((enthalpy, pressure))
        .map_err(|err| VccError::thermo_failed("evaporator inlet", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        available_energy::joule_per_kilogram, pressure::kilopascal,
        temperature_interval::kelvin as delta_kelvin, thermodynamic_temperature::degree_celsius,
    };

    use crate::models::refrigeration::vcc::core::{
        solve::condenser,
        test_support::{blend, celsius, halocarbon},
    };

    fn liquid_line_enthalpy(
        thermo: &impl VccThermoModel,
        conditions: &OperatingConditions,
    ) -> SpecificEnthalpy {
        condenser(thermo, conditions, &SearchConfig::default())
            .unwrap()
            .liquid_line_outlet
            .enthalpy
    }

    #[test]
    fn reproduces_the_target_mean_temperature() {
        let conditions = OperatingConditions::new(celsius(-10.0), celsius(40.0))
            .with_sub_cooling(TemperatureInterval::new::<delta_kelvin>(3.0))
            .with_evaporator_pressure_drop(Pressure::new::<kilopascal>(20.0));

        for thermo in [halocarbon(), blend(5.0)] {
            let h6 = liquid_line_enthalpy(&thermo, &conditions);
            let points = solve(&thermo, &conditions, h6, &SearchConfig::default()).unwrap();

            assert_relative_eq!(
                points.inlet.enthalpy.get::<joule_per_kilogram>(),
                h6.get::<joule_per_kilogram>(),
                max_relative = 1e-12
            );
            assert!(points.inlet.is_saturated_or_two_phase());

            let mean = 0.5
                * (points.inlet.temperature.get::<degree_celsius>()
                    + points.dew.temperature.get::<degree_celsius>());
            assert_relative_eq!(mean, -10.0, epsilon = 1e-3);

            let drop = points.inlet.pressure - points.dew.pressure;
            assert_relative_eq!(drop.get::<kilopascal>(), 20.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn super_heat_raises_the_outlet() {
        let thermo = halocarbon();
        let conditions = OperatingConditions::new(celsius(-10.0), celsius(40.0))
            .with_super_heat(TemperatureInterval::new::<delta_kelvin>(6.0));
        let h6 = liquid_line_enthalpy(&thermo, &conditions);
        let points = solve(&thermo, &conditions, h6, &SearchConfig::default()).unwrap();

        assert_eq!(points.outlet.pressure, points.dew.pressure);
        assert_eq!(points.outlet.quality, None);
        assert_relative_eq!(
            points.outlet.temperature.get::<kelvin>() - points.dew.temperature.get::<kelvin>(),
            6.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn zero_super_heat_leaves_a_saturated_outlet() {
        let thermo = blend(3.0);
        let conditions = OperatingConditions::new(celsius(-10.0), celsius(40.0));
        let h6 = liquid_line_enthalpy(&thermo, &conditions);
        let points = solve(&thermo, &conditions, h6, &SearchConfig::default()).unwrap();

        assert_eq!(points.outlet.quality, Some(Ratio::new::<ratio>(1.0)));
        assert_relative_eq!(
            points.outlet.temperature.get::<kelvin>(),
            points.dew.temperature.get::<kelvin>(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn sub_cooled_below_the_evaporator_is_not_two_phase() {
        let thermo = halocarbon();
        let conditions = OperatingConditions::new(celsius(-10.0), celsius(30.0))
            .with_sub_cooling(TemperatureInterval::new::<delta_kelvin>(75.0));
        let h6 = liquid_line_enthalpy(&thermo, &conditions);

        match solve(&thermo, &conditions, h6, &SearchConfig::default()) {
            Err(VccError::NotTwoPhase { point, .. }) => {
                assert_eq!(point, Point::EvaporatorInlet);
            }
            other => panic!("expected not two-phase, got {other:?}"),
        }
    }

    #[test]
    fn iteration_cap() {
        let thermo = halocarbon();
        let conditions = OperatingConditions::new(celsius(-10.0), celsius(40.0))
            .with_evaporator_pressure_drop(Pressure::new::<kilopascal>(100.0));
        let h6 = liquid_line_enthalpy(&thermo, &conditions);
        let config = SearchConfig {
            max_iters: 1,
            ..SearchConfig::default()
        };

        match solve(&thermo, &conditions, h6, &config) {
            Err(VccError::NoConvergence { exchanger, .. }) => {
                assert_eq!(exchanger, Exchanger::Evaporator);
            }
            other => panic!("expected no convergence, got {other:?}"),
        }
    }
}
