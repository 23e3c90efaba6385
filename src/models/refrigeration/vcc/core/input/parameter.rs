use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::support::constraint::{
    Constraint, ConstraintError, NonNegative, StrictlyPositive, UnitIntervalLowerOpen,
};

/// A named scalar operating parameter.
///
/// This is the flat view of [`OperatingConditions`](super::OperatingConditions)
/// plus the compressor efficiency, keyed the way operating-point tables are
/// usually written (`ev_temperature`, `co_sub_cooling`, ...).
///
/// Flat values are in SI base units: absolute temperatures and temperature
/// differences in kelvin, pressures in pascal, flow in m³/s and efficiency as
/// a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parameter {
    EvaporatorTemperature,
    EvaporatorSuperHeat,
    EvaporatorPressureDrop,
    SuctionLineTemperatureChange,
    SuctionLinePressureDrop,
    /// Compressor isentropic efficiency; zero selects isentropic compression.
    EfficiencyIsentropic,
    VolumetricFlowRate,
    DischargeLineTemperatureChange,
    DischargeLinePressureDrop,
    CondenserTemperature,
    CondenserSubCooling,
    CondenserPressureDrop,
    LiquidLineTemperatureChange,
    LiquidLinePressureDrop,
}

impl Parameter {
    pub const ALL: [Parameter; 14] = [
        Parameter::EvaporatorTemperature,
        Parameter::EvaporatorSuperHeat,
        Parameter::EvaporatorPressureDrop,
        Parameter::SuctionLineTemperatureChange,
        Parameter::SuctionLinePressureDrop,
        Parameter::EfficiencyIsentropic,
        Parameter::VolumetricFlowRate,
        Parameter::DischargeLineTemperatureChange,
        Parameter::DischargeLinePressureDrop,
        Parameter::CondenserTemperature,
        Parameter::CondenserSubCooling,
        Parameter::CondenserPressureDrop,
        Parameter::LiquidLineTemperatureChange,
        Parameter::LiquidLinePressureDrop,
    ];

    /// The flat key naming this parameter.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::EvaporatorTemperature => "ev_temperature",
            Self::EvaporatorSuperHeat => "ev_super_heat",
            Self::EvaporatorPressureDrop => "ev_pressure_drop",
            Self::SuctionLineTemperatureChange => "sl_temperature_change",
            Self::SuctionLinePressureDrop => "sl_pressure_drop",
            Self::EfficiencyIsentropic => "efficiency_isentropic",
            Self::VolumetricFlowRate => "volumetric_flow_rate",
            Self::DischargeLineTemperatureChange => "dl_temperature_change",
            Self::DischargeLinePressureDrop => "dl_pressure_drop",
            Self::CondenserTemperature => "co_temperature",
            Self::CondenserSubCooling => "co_sub_cooling",
            Self::CondenserPressureDrop => "co_pressure_drop",
            Self::LiquidLineTemperatureChange => "ll_temperature_change",
            Self::LiquidLinePressureDrop => "ll_pressure_drop",
        }
    }

    /// The sub-solves that must rerun after this parameter changes.
    ///
    /// Anything upstream of the expansion valve moves point 6 and with it the
    /// evaporator inlet, so it marks both. Suction and discharge lines only
    /// feed points 0 to 2, which every calculation recomputes anyway.
    #[must_use]
    pub fn scope(self) -> Stale {
        match self {
            Self::EvaporatorTemperature
            | Self::EvaporatorSuperHeat
            | Self::EvaporatorPressureDrop => Stale::EVAPORATOR,
            Self::CondenserTemperature
            | Self::CondenserSubCooling
            | Self::CondenserPressureDrop
            | Self::LiquidLineTemperatureChange
            | Self::LiquidLinePressureDrop
            | Self::EfficiencyIsentropic => Stale::BOTH,
            Self::SuctionLineTemperatureChange
            | Self::SuctionLinePressureDrop
            | Self::DischargeLineTemperatureChange
            | Self::DischargeLinePressureDrop
            | Self::VolumetricFlowRate => Stale::NONE,
        }
    }

    /// Checks a flat value without applying it.
    ///
    /// Absolute temperatures and flow must be positive, efficiency must be
    /// zero or in (0, 1], and everything else must be non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the value would be rejected.
    pub fn check(self, value: f64) -> Result<(), ParameterError> {
        let result = match self {
            Self::EvaporatorTemperature | Self::CondenserTemperature | Self::VolumetricFlowRate => {
                StrictlyPositive::check(&value)
            }
            Self::EfficiencyIsentropic if value == 0.0 => Ok(()),
            Self::EfficiencyIsentropic => UnitIntervalLowerOpen::check(&value),
            _ => NonNegative::check(&value),
        };
        result.map_err(|source| ParameterError {
            parameter: self,
            source,
        })
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Parameter {
    type Err = ParseParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| ParseParameterError { key: s.to_string() })
    }
}

/// A flat key that names no [`Parameter`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operating parameter `{key}`")]
pub struct ParseParameterError {
    pub key: String,
}

/// A rejected parameter value.
///
/// The value that was rejected is never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid value for {parameter}")]
pub struct ParameterError {
    pub parameter: Parameter,
    #[source]
    pub source: ConstraintError,
}

/// Which sub-solves are out of date.
///
/// Mutators return the scope they invalidated, and
/// [`Vcc::calculate_scoped`](crate::models::refrigeration::vcc::Vcc::calculate_scoped)
/// accepts one to force recomputation explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Stale {
    pub condenser: bool,
    pub evaporator: bool,
}

impl Stale {
    pub const NONE: Stale = Stale {
        condenser: false,
        evaporator: false,
    };

    pub const EVAPORATOR: Stale = Stale {
        condenser: false,
        evaporator: true,
    };

    pub const BOTH: Stale = Stale {
        condenser: true,
        evaporator: true,
    };

    #[must_use]
    pub fn union(self, other: Stale) -> Stale {
        Stale {
            condenser: self.condenser || other.condenser,
            evaporator: self.evaporator || other.evaporator,
        }
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        !(self.condenser || self.evaporator)
    }
}
