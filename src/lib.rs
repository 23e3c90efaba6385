//! # Twine Refrigeration
//!
//! Vapor-compression refrigeration cycle models for comparative refrigerant
//! analysis, built for [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Refrigeration models, including the [`twine_core::Model`]
//!   adapter for the single-stage cycle.
//! - [`support`]: Supporting utilities used by models: refrigerant property
//!   capabilities, numeric constraints, sampled curves and unit extensions.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Computation specific to one model stays in that model's internal `core`
//! module and only moves to [`support`] once a second model needs it.

pub mod models;
pub mod support;
