//! Total Equivalent Warming Impact.
//!
//! TEWI adds the refrigerant emitted over a system's life (leakage plus the
//! loss at end-of-life recovery, weighted by GWP) to the CO2 emitted
//! generating the electricity the system consumes. Masses are kilograms of
//! CO2 equivalent.
//!
//! When a retrofit refrigerant delivers less cooling than the refrigerant it
//! replaces, the compressor has to run longer to meet the same load, so its
//! annual energy is compensated by the relative cooling capacity.

use thiserror::Error;
use uom::{
    ConstZero,
    si::{
        energy::kilowatt_hour,
        f64::{Energy, Mass, Power, Ratio, Time},
        mass::kilogram,
        ratio::ratio,
        time::hour,
    },
};

use super::vcc::Solution;

/// Errors from TEWI calculations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TewiError {
    #[error("cooling capacity must be positive, got {0:?}")]
    NonPositiveCapacity(Power),

    /// Equal annual energy makes the break-even emission factor undefined.
    #[error("annual energy equals the baseline's, no break-even emission factor")]
    EqualEnergy,
}

/// System assumptions shared by every refrigerant in a TEWI comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TewiConfig {
    /// Refrigerant charge.
    pub charge: Mass,

    /// Fraction of the charge leaked per year.
    pub annual_leakage: Ratio,

    /// Operating life in years.
    pub service_life: f64,

    /// Fraction of the charge recovered at end of life.
    pub recovery_efficiency: Ratio,

    /// kg CO2 emitted per kWh of electricity.
    pub emission_factor: f64,

    /// Compressor running time per year.
    pub operating_time: Time,
}

impl Default for TewiConfig {
    fn default() -> Self {
        Self {
            charge: Mass::new::<kilogram>(10.0),
            annual_leakage: Ratio::new::<ratio>(0.125),
            service_life: 15.0,
            recovery_efficiency: Ratio::new::<ratio>(0.95),
            emission_factor: 0.405,
            operating_time: Time::new::<hour>(24.0 * 365.0 * 0.75),
        }
    }
}

/// TEWI split into its parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tewi {
    pub leakage: Mass,
    pub recovery: Mass,
    pub indirect: Mass,
}

impl Tewi {
    /// Refrigerant emissions, leakage plus recovery loss.
    #[must_use]
    pub fn direct(&self) -> Mass {
        self.leakage + self.recovery
    }

    #[must_use]
    pub fn total(&self) -> Mass {
        self.direct() + self.indirect
    }
}

impl TewiConfig {
    /// `GWP·m·L·n`.
    #[must_use]
    pub fn leakage(&self, gwp: f64) -> Mass {
        self.charge * gwp * self.annual_leakage.get::<ratio>() * self.service_life
    }

    /// `GWP·m·(1 − α)`.
    #[must_use]
    pub fn recovery(&self, gwp: f64) -> Mass {
        self.charge * gwp * (1.0 - self.recovery_efficiency.get::<ratio>())
    }

    /// `E·β·n`.
    #[must_use]
    pub fn indirect(&self, annual_energy: Energy) -> Mass {
        Mass::new::<kilogram>(
            annual_energy.get::<kilowatt_hour>() * self.emission_factor * self.service_life,
        )
    }

    /// Annual compressor energy compensated for cooling capacity.
    ///
    /// The compressor power is divided by `capacity / reference_capacity`
    /// before multiplying by the operating time.
    ///
    /// # Errors
    ///
    /// Returns [`TewiError::NonPositiveCapacity`] if either capacity is not
    /// positive.
    pub fn annual_energy(
        &self,
        power: Power,
        capacity: Power,
        reference_capacity: Power,
    ) -> Result<Energy, TewiError> {
        for q in [capacity, reference_capacity] {
            if !(q > Power::ZERO) {
                return Err(TewiError::NonPositiveCapacity(q));
            }
        }
        let compensated = power * (reference_capacity / capacity);
        Ok(compensated * self.operating_time)
    }

    #[must_use]
    pub fn tewi(&self, gwp: f64, annual_energy: Energy) -> Tewi {
        Tewi {
            leakage: self.leakage(gwp),
            recovery: self.recovery(gwp),
            indirect: self.indirect(annual_energy),
        }
    }

    /// TEWI of a solved system compared against a reference system.
    ///
    /// # Errors
    ///
    /// Returns [`TewiError::NonPositiveCapacity`] if either solution has no
    /// cooling capacity.
    pub fn evaluate(
        &self,
        gwp: f64,
        solution: &Solution,
        reference: &Solution,
    ) -> Result<Tewi, TewiError> {
        let energy = self.annual_energy(
            solution.compressor_power(),
            solution.cooling_capacity(),
            reference.cooling_capacity(),
        )?;
        Ok(self.tewi(gwp, energy))
    }

    /// The emission factor at which a refrigerant and a baseline have equal
    /// TEWI, in kg CO2 per kWh.
    ///
    /// A lower-GWP replacement that uses more energy only pays off while the
    /// grid emits less than this per kWh.
    ///
    /// # Errors
    ///
    /// Returns [`TewiError::EqualEnergy`] if both use the same annual energy.
    pub fn break_even_emission_factor(
        &self,
        gwp: f64,
        annual_energy: Energy,
        baseline_gwp: f64,
        baseline_energy: Energy,
    ) -> Result<f64, TewiError> {
        let gwp_saved = baseline_gwp - gwp;
        let saved = self.leakage(gwp_saved) + self.recovery(gwp_saved);
        let extra = (annual_energy - baseline_energy).get::<kilowatt_hour>() * self.service_life;
        if extra == 0.0 {
            return Err(TewiError::EqualEnergy);
        }
        Ok(saved.get::<kilogram>() / extra)
    }
}

/// Scales a measured compressor efficiency to a retrofit refrigerant.
///
/// The measured efficiency is multiplied by the ratio of the refrigerant's
/// isentropic efficiency to the reference refrigerant's, both taken from
/// solutions with the same compressor.
#[must_use]
pub fn degraded_efficiency(
    efficiency: Ratio,
    isentropic: Ratio,
    reference_isentropic: Ratio,
) -> Ratio {
    efficiency * (isentropic / reference_isentropic)
}
