use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// Subtracts two [`ThermodynamicTemperature`] values (absolute temperatures)
/// and returns a [`TemperatureInterval`] (temperature difference).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

/// Extension trait for shifting an absolute temperature by an interval.
pub trait TemperatureOffset {
    /// Returns `self + delta`.
    #[must_use]
    fn raised_by(self, delta: TemperatureInterval) -> Self;

    /// Returns `self - delta`.
    #[must_use]
    fn lowered_by(self, delta: TemperatureInterval) -> Self;
}

impl TemperatureOffset for ThermodynamicTemperature {
    fn raised_by(self, delta: TemperatureInterval) -> Self {
        ThermodynamicTemperature::new::<abs_kelvin>(
            self.get::<abs_kelvin>() + delta.get::<delta_kelvin>(),
        )
    }

    fn lowered_by(self, delta: TemperatureInterval) -> Self {
        ThermodynamicTemperature::new::<abs_kelvin>(
            self.get::<abs_kelvin>() - delta.get::<delta_kelvin>(),
        )
    }
}
