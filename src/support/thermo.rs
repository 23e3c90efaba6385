//! Refrigerant property modeling.
//!
//! The cycle solver treats property evaluation as an oracle: given two
//! independent properties it returns a full [`State`] for one fixed
//! refrigerant. The [`capability`] traits describe which input pairs a model
//! supports, [`fluid`] describes the refrigerant a model is bound to,
//! [`model`] provides concrete property models, and [`envelope`] builds the
//! two-phase boundary from any capable model.

mod error;
mod state;

pub mod capability;
pub mod envelope;
pub mod fluid;
pub mod model;

pub use error::PropertyError;
pub use state::State;
