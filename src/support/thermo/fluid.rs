//! Fluid descriptors.
//!
//! A descriptor names what a property model is configured for. Models
//! decide how to interpret it (backend identifiers and component strings for
//! external libraries, or simply a label for analytic models like
//! [`IdealRefrigerant`](crate::support::thermo::model::IdealRefrigerant)).

mod refrigerant;

pub use refrigerant::{Component, Refrigerant};
