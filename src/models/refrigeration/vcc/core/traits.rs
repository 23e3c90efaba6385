//! Property model bounds required by the cycle solver.

use uom::si::f64::{Pressure, Ratio, ThermodynamicTemperature};

use crate::support::{
    thermo::{
        capability::{StateFrom, ThermoModel},
        fluid::Refrigerant,
    },
    units::{SpecificEnthalpy, SpecificEntropy},
};

/// Required thermo model bounds for the vapor-compression cycle.
///
/// Any model bound to a [`Refrigerant`] that resolves states from the five
/// input pairs the cycle uses satisfies this trait automatically.
pub trait VccThermoModel:
    ThermoModel<Fluid = Refrigerant>
    + StateFrom<(Pressure, ThermodynamicTemperature)>
    + StateFrom<(Pressure, Ratio)>
    + StateFrom<(Ratio, ThermodynamicTemperature)>
    + StateFrom<(SpecificEnthalpy, Pressure)>
    + StateFrom<(Pressure, SpecificEntropy)>
{
}

impl<T> VccThermoModel for T where
    T: ThermoModel<Fluid = Refrigerant>
        + StateFrom<(Pressure, ThermodynamicTemperature)>
        + StateFrom<(Pressure, Ratio)>
        + StateFrom<(Ratio, ThermodynamicTemperature)>
        + StateFrom<(SpecificEnthalpy, Pressure)>
        + StateFrom<(Pressure, SpecificEntropy)>
{
}
