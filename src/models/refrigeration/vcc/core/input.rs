//! Operating inputs of the cycle.

mod conditions;
mod parameter;

pub use conditions::{Condenser, Evaporator, Line, OperatingConditions};
pub use parameter::{Parameter, ParameterError, ParseParameterError, Stale};
