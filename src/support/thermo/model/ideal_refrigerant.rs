//! Analytic refrigerant model with closed-form inverses.
//!
//! `IdealRefrigerant` captures the shape of a halocarbon's property surface
//! with a handful of constants, so every input pair resolves without
//! iteration. It is meant for tests, examples and quick parametric studies,
//! not for design-grade property values.
//!
//! # Assumptions
//!
//! - Saturation follows Clausius–Clapeyron: `p = p₀·exp(B·(1/T₀ − 1/T))`,
//!   where `T` is the mean of the bubble and dew temperatures.
//! - Blends glide linearly: bubble and dew sit `glide/2` below and above the
//!   mean, and the two-phase temperature is linear in quality.
//! - Liquid is incompressible with constant `c_l`: `h = c_l·(T − T₀)`.
//! - Saturated vapor enthalpy rises linearly with the dew temperature:
//!   `h = L₀ + c_g·(T_dew − T₀)`.
//! - Superheated vapor is a perfect gas with constant `c_p` and gas constant `R`.
//! - Two-phase enthalpy, entropy and specific volume mix linearly in quality.
//!
//! # Reference State
//!
//! Liquid at the reference temperature `T₀` has zero enthalpy and entropy.
//!
//! # Domain
//!
//! Single-phase queries are limited to pressures below the point where the
//! bubble line reaches the critical temperature; transcritical states are not
//! modeled.

use thiserror::Error;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{
        MassDensity, Pressure, Ratio, SpecificHeatCapacity, TemperatureInterval,
        ThermodynamicTemperature,
    },
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constraint, ConstraintError, NonNegative, StrictlyPositive, UnitInterval},
    thermo::{
        PropertyError, State,
        capability::{CriticalPoint, HasCriticalPoint, StateFrom, ThermoModel},
        fluid::Refrigerant,
    },
    units::{SpecificEnthalpy, SpecificEntropy, SpecificGasConstant},
};

/// Relative slack on the critical-temperature bound for saturation queries.
const CRITICAL_SLACK: f64 = 1e-9;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IdealRefrigerantError {
    #[error("invalid {name}")]
    Parameter {
        name: &'static str,
        #[source]
        source: ConstraintError,
    },
    #[error("critical temperature {t_crit:?} must exceed reference temperature {t_ref:?}")]
    CriticalTemperature {
        t_crit: ThermodynamicTemperature,
        t_ref: ThermodynamicTemperature,
    },
    #[error("latent heat must stay positive up to the critical temperature, got {latent_heat:?}")]
    LatentHeat { latent_heat: SpecificEnthalpy },
}

/// Constants defining an [`IdealRefrigerant`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealRefrigerantParameters {
    /// Mean saturation temperature at the reference pressure.
    pub reference_temperature: ThermodynamicTemperature,
    pub reference_pressure: Pressure,
    /// Clausius–Clapeyron slope `B = L/R`.
    pub saturation_slope: TemperatureInterval,
    /// Dew temperature minus bubble temperature at constant pressure.
    pub glide: TemperatureInterval,
    /// Latent heat at the reference state.
    pub latent_heat: SpecificEnthalpy,
    pub liquid_cp: SpecificHeatCapacity,
    pub liquid_density: MassDensity,
    /// Slope of saturated vapor enthalpy with dew temperature.
    pub saturated_vapor_slope: SpecificHeatCapacity,
    pub vapor_cp: SpecificHeatCapacity,
    pub gas_constant: SpecificGasConstant,
    pub critical_temperature: ThermodynamicTemperature,
}

impl IdealRefrigerantParameters {
    /// A pure halocarbon resembling R134a.
    ///
    /// Boils at −26.35°C at one atmosphere, saturates near 10 bar at 40°C,
    /// and has its critical point near 374 K and 4.1 MPa.
    #[must_use]
    pub fn halocarbon() -> Self {
        Self {
            reference_temperature: ThermodynamicTemperature::new::<kelvin>(246.8),
            reference_pressure: Pressure::new::<pascal>(101_325.0),
            saturation_slope: TemperatureInterval::new::<delta_kelvin>(2686.0),
            glide: TemperatureInterval::new::<delta_kelvin>(0.0),
            latent_heat: SpecificEnthalpy::new::<joule_per_kilogram>(217_000.0),
            liquid_cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1300.0),
            liquid_density: MassDensity::new::<kilogram_per_cubic_meter>(1300.0),
            saturated_vapor_slope: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(400.0),
            vapor_cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(600.0),
            gas_constant: SpecificGasConstant::new::<joule_per_kilogram_kelvin>(81.5),
            critical_temperature: ThermodynamicTemperature::new::<kelvin>(374.2),
        }
    }

    /// Returns a copy with the given temperature glide.
    #[must_use]
    pub fn with_glide(mut self, glide: TemperatureInterval) -> Self {
        self.glide = glide;
        self
    }
}

/// Analytic refrigerant property model bound to one [`Refrigerant`].
#[derive(Debug, Clone, PartialEq)]
pub struct IdealRefrigerant {
    refrigerant: Refrigerant,
    t_ref: f64,
    p_ref: f64,
    b: f64,
    glide: f64,
    latent: f64,
    c_l: f64,
    rho_l: f64,
    c_g: f64,
    c_pv: f64,
    r: f64,
    t_crit: f64,
    p_max: f64,
}

impl ThermoModel for IdealRefrigerant {
    type Fluid = Refrigerant;

    fn fluid(&self) -> &Refrigerant {
        &self.refrigerant
    }
}

impl IdealRefrigerant {
    /// Creates a model for `refrigerant` from the given constants.
    ///
    /// # Errors
    ///
    /// Returns [`IdealRefrigerantError`] if a constant is non-physical, if the
    /// critical temperature does not exceed the reference temperature, or if
    /// the latent heat would vanish below the critical temperature.
    pub fn new(
        refrigerant: Refrigerant,
        parameters: IdealRefrigerantParameters,
    ) -> Result<Self, IdealRefrigerantError> {
        let positive = |name: &'static str, value: f64| {
            StrictlyPositive::check(&value)
                .map(|()| value)
                .map_err(|source| IdealRefrigerantError::Parameter { name, source })
        };

        let t_ref = positive(
            "reference temperature",
            parameters.reference_temperature.get::<kelvin>(),
        )?;
        let p_ref = positive(
            "reference pressure",
            parameters.reference_pressure.get::<pascal>(),
        )?;
        let b = positive(
            "saturation slope",
            parameters.saturation_slope.get::<delta_kelvin>(),
        )?;
        let latent = positive(
            "latent heat",
            parameters.latent_heat.get::<joule_per_kilogram>(),
        )?;
        let c_l = positive(
            "liquid cp",
            parameters.liquid_cp.get::<joule_per_kilogram_kelvin>(),
        )?;
        let rho_l = positive(
            "liquid density",
            parameters.liquid_density.get::<kilogram_per_cubic_meter>(),
        )?;
        let c_pv = positive(
            "vapor cp",
            parameters.vapor_cp.get::<joule_per_kilogram_kelvin>(),
        )?;
        let r = positive(
            "gas constant",
            parameters.gas_constant.get::<joule_per_kilogram_kelvin>(),
        )?;
        let t_crit = positive(
            "critical temperature",
            parameters.critical_temperature.get::<kelvin>(),
        )?;

        let glide = parameters.glide.get::<delta_kelvin>();
        NonNegative::check(&glide)
            .map_err(|source| IdealRefrigerantError::Parameter { name: "glide", source })?;

        let c_g = parameters
            .saturated_vapor_slope
            .get::<joule_per_kilogram_kelvin>();
        NonNegative::check(&c_g).map_err(|source| IdealRefrigerantError::Parameter {
            name: "saturated vapor slope",
            source,
        })?;

        if t_crit <= t_ref {
            return Err(IdealRefrigerantError::CriticalTemperature {
                t_crit: parameters.critical_temperature,
                t_ref: parameters.reference_temperature,
            });
        }

        let model = Self {
            refrigerant,
            t_ref,
            p_ref,
            b,
            glide,
            latent,
            c_l,
            rho_l,
            c_g,
            c_pv,
            r,
            t_crit,
            p_max: 0.0,
        };

        // The bubble line reaches the critical temperature at the highest pressure.
        let p_max = model.mean_saturation_pressure(t_crit + 0.5 * glide);
        let latent_at_max = model.vapor_saturation_enthalpy(p_max)
            - model.liquid_enthalpy(model.bubble_temperature(p_max));
        if latent_at_max <= 0.0 {
            return Err(IdealRefrigerantError::LatentHeat {
                latent_heat: SpecificEnthalpy::new::<joule_per_kilogram>(latent_at_max),
            });
        }

        Ok(Self { p_max, ..model })
    }

    fn mean_saturation_temperature(&self, p: f64) -> f64 {
        1.0 / (1.0 / self.t_ref - (p / self.p_ref).ln() / self.b)
    }

    fn mean_saturation_pressure(&self, t: f64) -> f64 {
        self.p_ref * (self.b * (1.0 / self.t_ref - 1.0 / t)).exp()
    }

    fn bubble_temperature(&self, p: f64) -> f64 {
        self.mean_saturation_temperature(p) - 0.5 * self.glide
    }

    fn dew_temperature(&self, p: f64) -> f64 {
        self.mean_saturation_temperature(p) + 0.5 * self.glide
    }

    fn liquid_enthalpy(&self, t: f64) -> f64 {
        self.c_l * (t - self.t_ref)
    }

    fn liquid_entropy(&self, t: f64) -> f64 {
        self.c_l * (t / self.t_ref).ln()
    }

    fn vapor_saturation_enthalpy(&self, p: f64) -> f64 {
        self.latent + self.c_g * (self.dew_temperature(p) - self.t_ref)
    }

    fn vapor_enthalpy(&self, t: f64, p: f64) -> f64 {
        self.vapor_saturation_enthalpy(p) + self.c_pv * (t - self.dew_temperature(p))
    }

    fn vapor_entropy(&self, t: f64, p: f64) -> f64 {
        self.latent / self.t_ref + self.c_pv * (t / self.t_ref).ln()
            - self.r * (p / self.p_ref).ln()
    }

    fn check_pressure(&self, p: f64) -> Result<(), PropertyError> {
        StrictlyPositive::check(&p)
            .map_err(|err| PropertyError::out_of_domain(format!("pressure {p} Pa: {err}")))?;
        if p > self.p_max * (1.0 + CRITICAL_SLACK) {
            return Err(PropertyError::out_of_domain(format!(
                "pressure {p} Pa is above the two-phase region (max {} Pa)",
                self.p_max
            )));
        }
        Ok(())
    }

    fn check_temperature(t: f64) -> Result<(), PropertyError> {
        StrictlyPositive::check(&t)
            .map_err(|err| PropertyError::out_of_domain(format!("temperature {t} K: {err}")))
    }

    fn check_quality(x: f64) -> Result<(), PropertyError> {
        UnitInterval::check(&x)
            .map_err(|err| PropertyError::out_of_domain(format!("quality {x}: {err}")))
    }

    fn liquid(&self, t: f64, p: f64) -> Result<State, PropertyError> {
        Self::check_temperature(t)?;
        Ok(state(t, p, self.liquid_enthalpy(t), self.liquid_entropy(t), self.rho_l, None))
    }

    fn vapor(&self, t: f64, p: f64) -> Result<State, PropertyError> {
        Self::check_temperature(t)?;
        Ok(state(
            t,
            p,
            self.vapor_enthalpy(t, p),
            self.vapor_entropy(t, p),
            p / (self.r * t),
            None,
        ))
    }

    fn two_phase(&self, p: f64, x: f64) -> State {
        let t_bubble = self.bubble_temperature(p);
        let t_dew = self.dew_temperature(p);

        let h = (1.0 - x) * self.liquid_enthalpy(t_bubble) + x * self.vapor_saturation_enthalpy(p);
        let s = (1.0 - x) * self.liquid_entropy(t_bubble) + x * self.vapor_entropy(t_dew, p);
        let v = (1.0 - x) / self.rho_l + x * self.r * t_dew / p;

        state(t_bubble + x * self.glide, p, h, s, 1.0 / v, Some(x))
    }
}

fn state(t: f64, p: f64, h: f64, s: f64, d: f64, x: Option<f64>) -> State {
    State {
        temperature: ThermodynamicTemperature::new::<kelvin>(t),
        pressure: Pressure::new::<pascal>(p),
        enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(h),
        entropy: SpecificEntropy::new::<joule_per_kilogram_kelvin>(s),
        density: MassDensity::new::<kilogram_per_cubic_meter>(d),
        quality: x.map(Ratio::new::<ratio>),
    }
}

impl HasCriticalPoint for IdealRefrigerant {
    fn critical_point(&self) -> Result<CriticalPoint, PropertyError> {
        let p_crit = self.mean_saturation_pressure(self.t_crit);
        let rho_vapor = p_crit / (self.r * self.t_crit);

        Ok(CriticalPoint {
            temperature: ThermodynamicTemperature::new::<kelvin>(self.t_crit),
            pressure: Pressure::new::<pascal>(p_crit),
            density: MassDensity::new::<kilogram_per_cubic_meter>(0.5 * (self.rho_l + rho_vapor)),
        })
    }
}

impl StateFrom<(Pressure, ThermodynamicTemperature)> for IdealRefrigerant {
    type Error = PropertyError;

    fn state_from(
        &self,
        (pressure, temperature): (Pressure, ThermodynamicTemperature),
    ) -> Result<State, Self::Error> {
        let p = pressure.get::<pascal>();
        let t = temperature.get::<kelvin>();
        self.check_pressure(p)?;
        Self::check_temperature(t)?;

        let t_bubble = self.bubble_temperature(p);
        let t_dew = self.dew_temperature(p);

        if t < t_bubble {
            self.liquid(t, p)
        } else if t > t_dew {
            self.vapor(t, p)
        } else if self.glide > 0.0 {
            Ok(self.two_phase(p, (t - t_bubble) / self.glide))
        } else {
            Err(PropertyError::Undefined {
                context: format!(
                    "{t} K is the saturation temperature at {p} Pa, quality is not fixed by (p, T)"
                ),
            })
        }
    }
}

impl StateFrom<(Pressure, Ratio)> for IdealRefrigerant {
    type Error = PropertyError;

    fn state_from(&self, (pressure, quality): (Pressure, Ratio)) -> Result<State, Self::Error> {
        let p = pressure.get::<pascal>();
        let x = quality.get::<ratio>();
        self.check_pressure(p)?;
        Self::check_quality(x)?;

        Ok(self.two_phase(p, x))
    }
}

impl StateFrom<(Ratio, ThermodynamicTemperature)> for IdealRefrigerant {
    type Error = PropertyError;

    fn state_from(
        &self,
        (quality, temperature): (Ratio, ThermodynamicTemperature),
    ) -> Result<State, Self::Error> {
        let x = quality.get::<ratio>();
        let t = temperature.get::<kelvin>();
        Self::check_quality(x)?;
        Self::check_temperature(t)?;

        let p = self.mean_saturation_pressure(t - (x - 0.5) * self.glide);
        self.check_pressure(p)?;

        Ok(self.two_phase(p, x))
    }
}

impl StateFrom<(SpecificEnthalpy, Pressure)> for IdealRefrigerant {
    type Error = PropertyError;

    fn state_from(
        &self,
        (enthalpy, pressure): (SpecificEnthalpy, Pressure),
    ) -> Result<State, Self::Error> {
        let h = enthalpy.get::<joule_per_kilogram>();
        let p = pressure.get::<pascal>();
        self.check_pressure(p)?;

        let h_liquid = self.liquid_enthalpy(self.bubble_temperature(p));
        let h_vapor = self.vapor_saturation_enthalpy(p);

        if h < h_liquid {
            self.liquid(self.t_ref + h / self.c_l, p)
        } else if h > h_vapor {
            self.vapor(self.dew_temperature(p) + (h - h_vapor) / self.c_pv, p)
        } else {
            Ok(self.two_phase(p, (h - h_liquid) / (h_vapor - h_liquid)))
        }
    }
}

impl StateFrom<(Pressure, SpecificEntropy)> for IdealRefrigerant {
    type Error = PropertyError;

    fn state_from(
        &self,
        (pressure, entropy): (Pressure, SpecificEntropy),
    ) -> Result<State, Self::Error> {
        let p = pressure.get::<pascal>();
        let s = entropy.get::<joule_per_kilogram_kelvin>();
        self.check_pressure(p)?;

        let s_liquid = self.liquid_entropy(self.bubble_temperature(p));
        let s_vapor = self.vapor_entropy(self.dew_temperature(p), p);

        if s < s_liquid {
            self.liquid(self.t_ref * (s / self.c_l).exp(), p)
        } else if s > s_vapor {
            let exponent =
                (s - self.latent / self.t_ref + self.r * (p / self.p_ref).ln()) / self.c_pv;
            self.vapor(self.t_ref * exponent.exp(), p)
        } else {
            Ok(self.two_phase(p, (s - s_liquid) / (s_vapor - s_liquid)))
        }
    }
}
