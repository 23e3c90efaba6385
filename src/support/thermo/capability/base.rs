/// Base trait for property models bound to a single fluid.
///
/// A model is configured for one fluid when it is constructed and never
/// changes it afterwards, so the fluid is exposed by reference rather than
/// passed with every query.
pub trait ThermoModel {
    type Fluid;

    /// Returns the fluid this model was configured for.
    fn fluid(&self) -> &Self::Fluid;
}

impl<T: ThermoModel + ?Sized> ThermoModel for &T {
    type Fluid = T::Fluid;

    fn fluid(&self) -> &Self::Fluid {
        (**self).fluid()
    }
}
