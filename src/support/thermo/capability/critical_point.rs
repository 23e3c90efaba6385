use uom::si::f64::{MassDensity, Pressure, ThermodynamicTemperature};

use crate::support::thermo::PropertyError;

use super::ThermoModel;

/// The critical point of a fluid or mixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalPoint {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub density: MassDensity,
}

/// Capability for reporting the critical point.
///
/// For mixtures this is the true critical point of the configured
/// composition, which bounds the top of the phase envelope.
pub trait HasCriticalPoint: ThermoModel {
    /// Returns the critical point of the configured fluid.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the critical point cannot be determined.
    fn critical_point(&self) -> Result<CriticalPoint, PropertyError>;
}

impl<T: HasCriticalPoint + ?Sized> HasCriticalPoint for &T {
    fn critical_point(&self) -> Result<CriticalPoint, PropertyError> {
        (**self).critical_point()
    }
}
