//! Refrigerant property models.

#[cfg(feature = "coolprop")]
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub mod coolprop;
pub mod ideal_refrigerant;

#[cfg(feature = "coolprop")]
#[cfg_attr(docsrs, doc(cfg(feature = "coolprop")))]
pub use coolprop::{CoolProp, CoolPropError};
pub use ideal_refrigerant::{IdealRefrigerant, IdealRefrigerantError, IdealRefrigerantParameters};
