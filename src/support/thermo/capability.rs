//! Capability traits used to resolve refrigerant states.

mod base;
mod critical_point;
mod state_from;

pub use base::ThermoModel;
pub use critical_point::{CriticalPoint, HasCriticalPoint};
pub use state_from::StateFrom;
