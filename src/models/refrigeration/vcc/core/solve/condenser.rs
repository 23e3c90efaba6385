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
        Exchanger, OperatingConditions, SearchConfig, VccError, traits::VccThermoModel,
    },
    support::{thermo::State, units::TemperatureOffset},
};

use super::{mean_pressure, saturated_liquid, saturated_vapor};

/// Points 3 to 6: condenser dew and bubble points, condenser outlet and
/// liquid-line outlet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CondenserPoints {
    pub(crate) dew: State,
    pub(crate) bubble: State,
    pub(crate) outlet: State,
    pub(crate) liquid_line_outlet: State,
    pub(crate) iters: usize,
}

/// Solves the condenser and liquid line.
///
/// # Errors
///
/// Returns [`VccError`] if the mean-pressure search does not converge or a
/// property query fails.
pub(crate) fn solve(
    thermo: &impl VccThermoModel,
    conditions: &OperatingConditions,
    config: &SearchConfig,
) -> Result<CondenserPoints, VccError> {
    let condenser = &conditions.condenser;
    let target = condenser.temperature.get::<kelvin>();
    let drop = condenser.pressure_drop;

    let seed = thermo
        .state_from((Ratio::new::<ratio>(0.5), condenser.temperature))
        .map_err(|err| VccError::thermo_failed("condenser seed pressure", err))?
        .pressure;

    let found = mean_pressure::search(Exchanger::Condenser, seed, config, |mean| {
        let p_in = mean + 0.5 * drop;
        let p_out = mean - 0.5 * drop;

        let t_in = thermo
            .state_from((p_in, saturated_vapor()))
            .map_err(|err| VccError::thermo_failed("condenser inlet dew point", err))?
            .temperature
            .get::<kelvin>();
        let t_out = thermo
            .state_from((p_out, saturated_liquid()))
            .map_err(|err| VccError::thermo_failed("condenser outlet bubble point", err))?
            .temperature
            .get::<kelvin>();

        let diff = 0.5 * (t_in + t_out) - target;
        let corrected = ThermodynamicTemperature::new::<kelvin>(t_in - diff);

        let p_corrected = thermo
            .state_from((saturated_vapor(), corrected))
            .map_err(|err| VccError::thermo_failed("condenser corrected dew pressure", err))?
            .pressure;

        Ok(p_corrected - p_in)
    })?;

    let dew = thermo
        .state_from((found.inlet(drop), saturated_vapor()))
        .map_err(|err| VccError::thermo_failed("point 3", err))?;
    let bubble = thermo
        .state_from((found.outlet(drop), saturated_liquid()))
        .map_err(|err| VccError::thermo_failed("point 4", err))?;

    // Re-querying exactly on the saturation line is ill-posed, so zero
    // sub-cooling reuses the bubble point.
    let outlet = if condenser.sub_cooling == TemperatureInterval::ZERO {
        trace!("no sub-cooling, point 5 is the bubble point");
        bubble
    } else {
        thermo
            .state_from((
                bubble.pressure,
                bubble.temperature.lowered_by(condenser.sub_cooling),
            ))
            .map_err(|err| VccError::thermo_failed("point 5", err))?
    };

    let line = &conditions.liquid_line;
    let liquid_line_outlet = if line.is_lossless() {
        trace!("lossless liquid line, point 6 is point 5");
        outlet
    } else {
        thermo
            .state_from((
                outlet.pressure - line.pressure_drop,
                outlet.temperature.lowered_by(line.temperature_change),
            ))
            .map_err(|err| VccError::thermo_failed("point 6", err))?
    };

    debug!(
        iters = found.iters,
        dew_k = dew.temperature.get::<kelvin>(),
        bubble_k = bubble.temperature.get::<kelvin>(),
        "condenser solved"
    );

    Ok(CondenserPoints {
        dew,
        bubble,
        outlet,
        liquid_line_outlet,
        iters: found.iters,
    })
}
