//! Compressor models.
//!
//! A compressor either follows a manufacturer's EN 12900 rating surface or is
//! described by a single isentropic efficiency. The two are separate variants
//! of [`Compressor`] rather than one type with a mode switch.

mod error;
mod surface;

pub use error::{Bound, OutOfRangeError, SurfaceError};
pub use surface::{Coefficients, PerformanceSurface, Rating, SurfaceCompressor};

use uom::si::{f64::Ratio, ratio::ratio};

use crate::support::{
    constraint::{Constrained, ConstraintError, UnitIntervalLowerOpen},
    units::SpecificEnthalpy,
};

/// How the compressor outlet enthalpy is found.
#[derive(Debug, Clone, PartialEq)]
pub enum Compressor {
    /// A fixed isentropic efficiency.
    ///
    /// `None` means isentropic compression, as if the efficiency were one.
    Efficiency(Option<Constrained<Ratio, UnitIntervalLowerOpen>>),

    /// A rated compressor whose power and mass flow come from its surface.
    Surface(SurfaceCompressor),
}

impl Default for Compressor {
    fn default() -> Self {
        Self::isentropic()
    }
}

impl Compressor {
    /// An ideal compressor.
    #[must_use]
    pub fn isentropic() -> Self {
        Self::Efficiency(None)
    }

    /// A compressor with a fixed isentropic efficiency.
    ///
    /// An efficiency of zero is read as "not given" and selects isentropic
    /// compression.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError`] if the efficiency is negative, above one,
    /// or not a number.
    pub fn from_efficiency(efficiency: Ratio) -> Result<Self, ConstraintError> {
        if efficiency.get::<ratio>() == 0.0 {
            return Ok(Self::isentropic());
        }
        Ok(Self::Efficiency(Some(UnitIntervalLowerOpen::new(efficiency)?)))
    }

    /// A rated compressor following `surface`.
    #[must_use]
    pub fn from_surface(surface: PerformanceSurface) -> Self {
        Self::Surface(SurfaceCompressor::new(surface))
    }

    /// The configured efficiency, or `None` for rated and ideal compressors.
    #[must_use]
    pub fn efficiency(&self) -> Option<Ratio> {
        match self {
            Self::Efficiency(Some(eta)) => Some(*eta.as_ref()),
            Self::Efficiency(None) | Self::Surface(_) => None,
        }
    }

    /// Outlet enthalpy given the inlet and isentropic outlet enthalpies.
    ///
    /// A rated compressor adds its specific power to the inlet enthalpy and
    /// ignores the isentropic reference.
    pub(crate) fn outlet_enthalpy(
        &self,
        inlet: SpecificEnthalpy,
        isentropic: SpecificEnthalpy,
    ) -> SpecificEnthalpy {
        match self {
            Self::Efficiency(None) => isentropic,
            Self::Efficiency(Some(eta)) => inlet + (isentropic - inlet) / *eta.as_ref(),
            Self::Surface(compressor) => inlet + compressor.rating().specific_power(),
        }
    }
}
