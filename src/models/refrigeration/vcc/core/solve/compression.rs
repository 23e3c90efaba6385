use tracing::{debug, trace};
use uom::{
    ConstZero,
    si::{f64::TemperatureInterval, pressure::kilopascal, thermodynamic_temperature::kelvin},
};

use crate::{
    models::refrigeration::vcc::core::{
        Compressor, OperatingConditions, VccError, traits::VccThermoModel,
    },
    support::{
        thermo::State,
        units::{SpecificEnthalpy, TemperatureOffset},
    },
};

use super::saturated_vapor;

/// Points 0 to 2 and the isentropic reference enthalpy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CompressionPoints {
    pub(crate) suction: State,
    pub(crate) discharge: State,
    pub(crate) condenser_inlet: State,
    pub(crate) isentropic_enthalpy: SpecificEnthalpy,
}

/// Propagates the suction line, compressor and discharge line between the
/// solved evaporator outlet (point 9) and condenser dew point (point 3).
///
/// # Errors
///
/// Returns [`VccError::ThermoModelFailed`] if a property query fails.
pub(crate) fn solve(
    thermo: &impl VccThermoModel,
    conditions: &OperatingConditions,
    compressor: &Compressor,
    evaporator_outlet: &State,
    condenser_dew: &State,
) -> Result<CompressionPoints, VccError> {
    let suction_line = &conditions.suction_line;
    let p0 = evaporator_outlet.pressure - suction_line.pressure_drop;
    let t0 = evaporator_outlet
        .temperature
        .raised_by(suction_line.temperature_change);

    // A suction pressure drop alone still needs (p, T) so that p0 = p9 − drop
    // holds; a quality fix would put point 0 back on the saturation pressure.
    let saturated_suction = conditions.evaporator.super_heat == TemperatureInterval::ZERO
        && suction_line.is_lossless();

    let suction = if saturated_suction {
        trace!("saturated suction, point 0 is fixed by quality");
        thermo
            .state_from((saturated_vapor(), t0))
            .map_err(|err| VccError::thermo_failed("point 0", err))?
    } else {
        thermo
            .state_from((p0, t0))
            .map_err(|err| VccError::thermo_failed("point 0", err))?
    };

    let discharge_line = &conditions.discharge_line;
    let p1 = condenser_dew.pressure + discharge_line.pressure_drop;

    // Always evaluated, the isentropic efficiency metric needs it for every
    // compressor model.
    let isentropic_enthalpy = thermo
        .state_from((p1, suction.entropy))
        .map_err(|err| VccError::thermo_failed("isentropic discharge", err))?
        .enthalpy;

    let h1 = compressor.outlet_enthalpy(suction.enthalpy, isentropic_enthalpy);
    let discharge = thermo
        .state_from((h1, p1))
        .map_err(|err| VccError::thermo_failed("point 1", err))?;

    let condenser_inlet = if discharge_line.is_lossless() {
        trace!("lossless discharge line, point 2 is point 1");
        discharge
    } else {
        thermo
            .state_from((
                condenser_dew.pressure,
                discharge
                    .temperature
                    .lowered_by(discharge_line.temperature_change),
            ))
            .map_err(|err| VccError::thermo_failed("point 2", err))?
    };

    debug!(
        suction_kpa = suction.pressure.get::<kilopascal>(),
        discharge_kpa = p1.get::<kilopascal>(),
        discharge_k = discharge.temperature.get::<kelvin>(),
        "compression solved"
    );

    Ok(CompressionPoints {
        suction,
        discharge,
        condenser_inlet,
        isentropic_enthalpy,
    })
}
