//! Two-phase boundary in the pressure–enthalpy plane.
//!
//! The envelope is traced from a low reference pressure up to the critical
//! point, first along the bubble line and then back down the dew line, so it
//! can be drawn as one closed outline behind a cycle on a log(p)–h chart.
//!
//! Property models rarely resolve saturation states right at the critical
//! point, so the top of the outline is bridged with a cubic through the two
//! highest bubble and dew samples.

use thiserror::Error;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Pressure, Ratio, ThermodynamicTemperature},
    pressure::{bar, pascal},
    ratio::ratio,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    curve::{interpolate, linspace},
    thermo::capability::{HasCriticalPoint, StateFrom},
    units::SpecificEnthalpy,
};

/// Number of points inserted to bridge the gap at the top of the envelope.
const REPAIR_POINTS: usize = 8;

/// Settings for [`build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeConfig {
    /// Number of saturation temperatures sampled along each branch.
    pub resolution: usize,

    /// Pressure at the bottom of the envelope.
    ///
    /// Below atmospheric pressure a leaking system draws air in, so the
    /// envelope is rarely interesting much below this.
    pub minimum_pressure: Pressure,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            resolution: 40,
            minimum_pressure: Pressure::new::<bar>(0.5),
        }
    }
}

/// The closed two-phase outline as parallel enthalpy and pressure vectors.
///
/// Samples run up the bubble line, across the repaired top, and back down the
/// dew line.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseEnvelope {
    pub enthalpy: Vec<SpecificEnthalpy>,
    pub pressure: Vec<Pressure>,
}

impl PhaseEnvelope {
    #[must_use]
    pub fn len(&self) -> usize {
        self.enthalpy.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enthalpy.is_empty()
    }
}

/// Errors that can occur while building a [`PhaseEnvelope`].
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("envelope resolution must be at least 2, got {resolution}")]
    Resolution { resolution: usize },

    #[error("minimum temperature {t_min:?} is not below the critical temperature {t_crit:?}")]
    TemperatureRange {
        t_min: ThermodynamicTemperature,
        t_crit: ThermodynamicTemperature,
    },

    #[error("thermo model failed: {context}")]
    ThermoModelFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The top samples share an enthalpy, so no cubic passes through them.
    #[error("cannot bridge the top of the envelope")]
    Repair,
}

impl EnvelopeError {
    fn thermo_failed(
        context: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ThermoModelFailed {
            context: context.into(),
            source: Box::new(err),
        }
    }
}

/// Builds the phase envelope of the model's refrigerant.
///
/// # Errors
///
/// Returns [`EnvelopeError`] if the resolution is below two, the minimum
/// pressure saturates above the critical temperature, a saturation query
/// fails, or the top samples cannot be bridged.
pub fn build<M>(thermo: &M, config: &EnvelopeConfig) -> Result<PhaseEnvelope, EnvelopeError>
where
    M: HasCriticalPoint
        + StateFrom<(Pressure, Ratio)>
        + StateFrom<(Ratio, ThermodynamicTemperature)>,
{
    if config.resolution < 2 {
        return Err(EnvelopeError::Resolution {
            resolution: config.resolution,
        });
    }

    let bubble = Ratio::new::<ratio>(0.0);
    let dew = Ratio::new::<ratio>(1.0);

    let bottom = StateFrom::<(Pressure, Ratio)>::state_from(
        thermo,
        (config.minimum_pressure, bubble),
    )
    .map_err(|err| EnvelopeError::thermo_failed("bubble point at minimum pressure", err))?;
    let critical = thermo
        .critical_point()
        .map_err(|err| EnvelopeError::thermo_failed("critical point", err))?;

    let t_min = bottom.temperature.get::<kelvin>();
    let t_crit = critical.temperature.get::<kelvin>();
    if t_min >= t_crit {
        return Err(EnvelopeError::TemperatureRange {
            t_min: bottom.temperature,
            t_crit: critical.temperature,
        });
    }

    let mut bubble_line = Vec::with_capacity(config.resolution + REPAIR_POINTS);
    let mut dew_line = Vec::with_capacity(config.resolution);

    for t in linspace(t_min, t_crit, config.resolution) {
        let temperature = ThermodynamicTemperature::new::<kelvin>(t);
        for (quality, line) in [(bubble, &mut bubble_line), (dew, &mut dew_line)] {
            let state = StateFrom::<(Ratio, ThermodynamicTemperature)>::state_from(
                thermo,
                (quality, temperature),
            )
            .map_err(|err| EnvelopeError::thermo_failed(format!("saturation at {t} K"), err))?;
            line.push((
                state.enthalpy.get::<joule_per_kilogram>(),
                state.pressure.get::<pascal>(),
            ));
        }
    }

    let n = config.resolution;
    let anchors = [
        bubble_line[n - 2],
        bubble_line[n - 1],
        dew_line[n - 1],
        dew_line[n - 2],
    ];
    let gap = linspace(bubble_line[n - 1].0, dew_line[n - 1].0, REPAIR_POINTS + 2);
    for &h in &gap[1..=REPAIR_POINTS] {
        let p = interpolate(&anchors, h).ok_or(EnvelopeError::Repair)?;
        bubble_line.push((h, p));
    }

    let (enthalpy, pressure) = bubble_line
        .into_iter()
        .chain(dew_line.into_iter().rev())
        .map(|(h, p)| {
            (
                SpecificEnthalpy::new::<joule_per_kilogram>(h),
                Pressure::new::<pascal>(p),
            )
        })
        .unzip();

    Ok(PhaseEnvelope { enthalpy, pressure })
}
