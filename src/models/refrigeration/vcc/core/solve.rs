//! Sub-solves that fix the cycle's state points.
//!
//! The condenser fixes points 3 to 6, the evaporator fixes 7 to 9 from the
//! liquid-line enthalpy, and compression fixes 0 to 2 from both. Each
//! sub-solve is a plain function of its inputs so the solver can cache and
//! reuse results while only the inputs of another sub-solve change.

mod compression;
mod condenser;
mod evaporator;
mod mean_pressure;

pub(super) use compression::CompressionPoints;
pub(super) use condenser::CondenserPoints;
pub(super) use evaporator::EvaporatorPoints;

pub(super) use compression::solve as compression;
pub(super) use condenser::solve as condenser;
pub(super) use evaporator::solve as evaporator;

use uom::si::{f64::Ratio, ratio::ratio};

fn saturated_liquid() -> Ratio {
    Ratio::new::<ratio>(0.0)
}

fn saturated_vapor() -> Ratio {
    Ratio::new::<ratio>(1.0)
}
