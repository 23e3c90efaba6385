//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., temperature, pressure, power).
//! This module provides extensions that are useful for cycle modeling but
//! aren't included in [`uom`].
//!
//! ## Temperature arithmetic
//!
//! [`uom`] keeps absolute temperatures ([`ThermodynamicTemperature`]) and temperature
//! differences ([`TemperatureInterval`]) apart. Refrigeration inputs mix the two
//! constantly (super-heat above a dew point, sub-cooling below a bubble point), so
//! two extension traits bridge them:
//!
//! - [`TemperatureDifference::minus`] subtracts two absolute temperatures.
//! - [`TemperatureOffset`] shifts an absolute temperature by an interval.
//!
//! ```
//! use uom::si::f64::{TemperatureInterval, ThermodynamicTemperature};
//! use uom::si::{temperature_interval, thermodynamic_temperature::degree_celsius};
//! use twine_refrigeration::support::units::{TemperatureDifference, TemperatureOffset};
//!
//! let dew = ThermodynamicTemperature::new::<degree_celsius>(-10.0);
//! let super_heat = TemperatureInterval::new::<temperature_interval::kelvin>(7.0);
//!
//! let outlet = dew.raised_by(super_heat);
//! assert!((outlet.get::<degree_celsius>() + 3.0).abs() < 1e-12);
//! assert!((outlet.minus(dew).get::<temperature_interval::kelvin>() - 7.0).abs() < 1e-12);
//! ```
//!
//! For background on why these extensions are needed:
//! [#380](https://github.com/iliekturtles/uom/issues/380),
//! [#289](https://github.com/iliekturtles/uom/issues/289),
//! [#403](https://github.com/iliekturtles/uom/issues/403).
//!
//! [`ThermodynamicTemperature`]: uom::si::f64::ThermodynamicTemperature
//! [`TemperatureInterval`]: uom::si::f64::TemperatureInterval

mod quantities;
mod temperature;

pub use quantities::{SpecificEnthalpy, SpecificEntropy, SpecificGasConstant, VolumetricEnergy};
pub use temperature::{TemperatureDifference, TemperatureOffset};
