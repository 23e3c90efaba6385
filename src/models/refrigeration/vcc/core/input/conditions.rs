use uom::{
    ConstZero,
    si::{
        f64::{Pressure, TemperatureInterval, ThermodynamicTemperature, VolumeRate},
        pressure::pascal,
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::{degree_celsius, kelvin},
        volume_rate::cubic_meter_per_second,
    },
};

use super::{Parameter, ParameterError};

/// Nominal displacement used when no compressor rating supplies mass flow.
const NOMINAL_VOLUMETRIC_FLOW_RATE: f64 = 0.00653;

/// Evaporator operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaporator {
    /// Mean refrigerant temperature between inlet and dew point.
    pub temperature: ThermodynamicTemperature,

    /// Outlet temperature above the dew point.
    pub super_heat: TemperatureInterval,

    pub pressure_drop: Pressure,
}

/// Condenser operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condenser {
    /// Mean refrigerant temperature between dew and bubble points.
    pub temperature: ThermodynamicTemperature,

    /// Outlet temperature below the bubble point.
    pub sub_cooling: TemperatureInterval,

    pub pressure_drop: Pressure,
}

/// Losses along a connecting line.
///
/// The suction line heats the refrigerant, the discharge and liquid lines
/// cool it, so `temperature_change` is a magnitude whose sign is fixed by the
/// line it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub temperature_change: TemperatureInterval,
    pub pressure_drop: Pressure,
}

impl Line {
    #[must_use]
    pub fn new(temperature_change: TemperatureInterval, pressure_drop: Pressure) -> Self {
        Self {
            temperature_change,
            pressure_drop,
        }
    }

    /// A line with no temperature change and no pressure drop.
    #[must_use]
    pub fn lossless() -> Self {
        Self::new(TemperatureInterval::ZERO, Pressure::ZERO)
    }

    #[must_use]
    pub fn is_lossless(&self) -> bool {
        self.temperature_change == TemperatureInterval::ZERO && self.pressure_drop == Pressure::ZERO
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::lossless()
    }
}

/// Every operating input of the cycle apart from the compressor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingConditions {
    pub evaporator: Evaporator,
    pub suction_line: Line,
    pub discharge_line: Line,
    pub condenser: Condenser,
    pub liquid_line: Line,

    /// Compressor displacement used to derive mass flow when the compressor
    /// has no rating of its own.
    pub volumetric_flow_rate: VolumeRate,
}

impl OperatingConditions {
    /// Creates conditions with the given mean temperatures and no losses,
    /// super-heat or sub-cooling.
    #[must_use]
    pub fn new(evaporator: ThermodynamicTemperature, condenser: ThermodynamicTemperature) -> Self {
        Self {
            evaporator: Evaporator {
                temperature: evaporator,
                super_heat: TemperatureInterval::ZERO,
                pressure_drop: Pressure::ZERO,
            },
            suction_line: Line::lossless(),
            discharge_line: Line::lossless(),
            condenser: Condenser {
                temperature: condenser,
                sub_cooling: TemperatureInterval::ZERO,
                pressure_drop: Pressure::ZERO,
            },
            liquid_line: Line::lossless(),
            volumetric_flow_rate: VolumeRate::new::<cubic_meter_per_second>(
                NOMINAL_VOLUMETRIC_FLOW_RATE,
            ),
        }
    }

    /// A low-temperature sandbox point: −40°C evaporating, 35°C condensing,
    /// 7 K super-heat and 2 K sub-cooling.
    #[must_use]
    pub fn sandbox() -> Self {
        Self::new(celsius(-40.0), celsius(35.0))
            .with_super_heat(delta(7.0))
            .with_sub_cooling(delta(2.0))
    }

    /// A measured medium-temperature system.
    ///
    /// The measured compressor ran at an isentropic efficiency of 0.502.
    #[must_use]
    pub fn real_system() -> Self {
        Self::new(celsius(-15.4), celsius(41.8))
            .with_super_heat(delta(2.1))
            .with_sub_cooling(delta(8.8))
            .with_discharge_line(Line::new(delta(4.0), Pressure::ZERO))
    }

    /// A measured low-temperature system.
    ///
    /// The measured compressor ran at an isentropic efficiency of 0.555.
    #[must_use]
    pub fn real_system2() -> Self {
        Self::new(celsius(-37.4), celsius(30.0))
            .with_super_heat(delta(8.8))
            .with_sub_cooling(delta(15.6))
            .with_suction_line(Line::new(delta(0.3), Pressure::ZERO))
            .with_discharge_line(Line::new(delta(4.7), Pressure::ZERO))
    }

    #[must_use]
    pub fn with_super_heat(mut self, super_heat: TemperatureInterval) -> Self {
        self.evaporator.super_heat = super_heat;
        self
    }

    #[must_use]
    pub fn with_sub_cooling(mut self, sub_cooling: TemperatureInterval) -> Self {
        self.condenser.sub_cooling = sub_cooling;
        self
    }

    #[must_use]
    pub fn with_evaporator_pressure_drop(mut self, pressure_drop: Pressure) -> Self {
        self.evaporator.pressure_drop = pressure_drop;
        self
    }

    #[must_use]
    pub fn with_condenser_pressure_drop(mut self, pressure_drop: Pressure) -> Self {
        self.condenser.pressure_drop = pressure_drop;
        self
    }

    #[must_use]
    pub fn with_suction_line(mut self, line: Line) -> Self {
        self.suction_line = line;
        self
    }

    #[must_use]
    pub fn with_discharge_line(mut self, line: Line) -> Self {
        self.discharge_line = line;
        self
    }

    #[must_use]
    pub fn with_liquid_line(mut self, line: Line) -> Self {
        self.liquid_line = line;
        self
    }

    #[must_use]
    pub fn with_volumetric_flow_rate(mut self, flow: VolumeRate) -> Self {
        self.volumetric_flow_rate = flow;
        self
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] for the first field that is not a number,
    /// a non-positive absolute temperature or flow rate, or a negative
    /// temperature difference or pressure drop.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for parameter in Parameter::ALL {
            if let Some(value) = self.get(parameter) {
                parameter.check(value)?;
            }
        }
        Ok(())
    }

    /// Returns a parameter's value in SI base units.
    ///
    /// Returns `None` for [`Parameter::EfficiencyIsentropic`], which belongs
    /// to the compressor.
    #[must_use]
    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        let value = match parameter {
            Parameter::EvaporatorTemperature => self.evaporator.temperature.get::<kelvin>(),
            Parameter::EvaporatorSuperHeat => self.evaporator.super_heat.get::<delta_kelvin>(),
            Parameter::EvaporatorPressureDrop => self.evaporator.pressure_drop.get::<pascal>(),
            Parameter::SuctionLineTemperatureChange => {
                self.suction_line.temperature_change.get::<delta_kelvin>()
            }
            Parameter::SuctionLinePressureDrop => self.suction_line.pressure_drop.get::<pascal>(),
            Parameter::EfficiencyIsentropic => return None,
            Parameter::VolumetricFlowRate => {
                self.volumetric_flow_rate.get::<cubic_meter_per_second>()
            }
            Parameter::DischargeLineTemperatureChange => {
                self.discharge_line.temperature_change.get::<delta_kelvin>()
            }
            Parameter::DischargeLinePressureDrop => {
                self.discharge_line.pressure_drop.get::<pascal>()
            }
            Parameter::CondenserTemperature => self.condenser.temperature.get::<kelvin>(),
            Parameter::CondenserSubCooling => self.condenser.sub_cooling.get::<delta_kelvin>(),
            Parameter::CondenserPressureDrop => self.condenser.pressure_drop.get::<pascal>(),
            Parameter::LiquidLineTemperatureChange => {
                self.liquid_line.temperature_change.get::<delta_kelvin>()
            }
            Parameter::LiquidLinePressureDrop => self.liquid_line.pressure_drop.get::<pascal>(),
        };
        Some(value)
    }

    /// Sets a parameter from its SI base-unit value.
    ///
    /// [`Parameter::EfficiencyIsentropic`] is ignored here; the solver routes
    /// it to the compressor.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the value is rejected, leaving `self`
    /// unchanged.
    pub(crate) fn set(&mut self, parameter: Parameter, value: f64) -> Result<(), ParameterError> {
        parameter.check(value)?;

        let interval = TemperatureInterval::new::<delta_kelvin>;
        let pressure = Pressure::new::<pascal>;

        match parameter {
            Parameter::EvaporatorTemperature => {
                self.evaporator.temperature = ThermodynamicTemperature::new::<kelvin>(value);
            }
            Parameter::EvaporatorSuperHeat => self.evaporator.super_heat = interval(value),
            Parameter::EvaporatorPressureDrop => self.evaporator.pressure_drop = pressure(value),
            Parameter::SuctionLineTemperatureChange => {
                self.suction_line.temperature_change = interval(value);
            }
            Parameter::SuctionLinePressureDrop => self.suction_line.pressure_drop = pressure(value),
            Parameter::EfficiencyIsentropic => {}
            Parameter::VolumetricFlowRate => {
                self.volumetric_flow_rate = VolumeRate::new::<cubic_meter_per_second>(value);
            }
            Parameter::DischargeLineTemperatureChange => {
                self.discharge_line.temperature_change = interval(value);
            }
            Parameter::DischargeLinePressureDrop => {
                self.discharge_line.pressure_drop = pressure(value);
            }
            Parameter::CondenserTemperature => {
                self.condenser.temperature = ThermodynamicTemperature::new::<kelvin>(value);
            }
            Parameter::CondenserSubCooling => self.condenser.sub_cooling = interval(value),
            Parameter::CondenserPressureDrop => self.condenser.pressure_drop = pressure(value),
            Parameter::LiquidLineTemperatureChange => {
                self.liquid_line.temperature_change = interval(value);
            }
            Parameter::LiquidLinePressureDrop => self.liquid_line.pressure_drop = pressure(value),
        }
        Ok(())
    }
}

fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}

fn delta(value: f64) -> TemperatureInterval {
    TemperatureInterval::new::<delta_kelvin>(value)
}
