use std::ops::Index;

use uom::si::f64::{MassRate, Power, Ratio, ThermodynamicTemperature, VolumeRate};

use crate::support::{
    thermo::State,
    units::{SpecificEnthalpy, VolumetricEnergy},
};

use super::{CycleState, OutOfRangeError, Point, Rating};

/// A solved cycle and its performance metrics.
///
/// Metrics are computed on demand from the ten state points, the isentropic
/// reference enthalpy and the compressor's mass flow, so a `Solution` is a
/// plain value that can be kept after the solver moves on.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    state: CycleState,
    isentropic_enthalpy: SpecificEnthalpy,
    mass_flow: MassRate,
    specific_power: SpecificEnthalpy,
    rating: Option<Rating>,
    compressor_warning: Option<OutOfRangeError>,
}

impl Solution {
    /// Builds a solution.
    ///
    /// A rated compressor supplies the mass flow and specific power. Without
    /// a rating the mass flow is the nominal volumetric flow at suction
    /// density and the specific power is the compressor enthalpy rise.
    pub(crate) fn new(
        state: CycleState,
        isentropic_enthalpy: SpecificEnthalpy,
        volumetric_flow_rate: VolumeRate,
        rating: Option<Rating>,
        compressor_warning: Option<OutOfRangeError>,
    ) -> Self {
        let suction = &state[Point::SuctionLineOutlet];
        let discharge = &state[Point::CompressorOutlet];

        let (mass_flow, specific_power) = match &rating {
            Some(rating) => (rating.mass_flow, rating.specific_power()),
            None => (
                volumetric_flow_rate * suction.density,
                discharge.enthalpy - suction.enthalpy,
            ),
        };

        Self {
            state,
            isentropic_enthalpy,
            mass_flow,
            specific_power,
            rating,
            compressor_warning,
        }
    }

    /// The ten solved state points.
    #[must_use]
    pub fn state(&self) -> &CycleState {
        &self.state
    }

    /// Enthalpy after isentropic compression to the discharge pressure.
    #[must_use]
    pub fn isentropic_enthalpy(&self) -> SpecificEnthalpy {
        self.isentropic_enthalpy
    }

    /// The compressor rating used for this solution, if the compressor is rated.
    #[must_use]
    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    /// The compressor range condition raised during this calculation.
    ///
    /// When present, [`Solution::rating`] holds the last rating that was in
    /// range rather than one for the current temperatures.
    #[must_use]
    pub fn compressor_warning(&self) -> Option<&OutOfRangeError> {
        self.compressor_warning.as_ref()
    }

    #[must_use]
    pub fn mass_flow_rate(&self) -> MassRate {
        self.mass_flow
    }

    /// Refrigerating effect, `ṁ·(h0 − h6)`.
    #[must_use]
    pub fn cooling_capacity(&self) -> Power {
        self.mass_flow * self.refrigerating_effect()
    }

    /// Refrigerating effect per unit of suction volume, `(h0 − h6)·d0`.
    #[must_use]
    pub fn volumetric_cooling_capacity(&self) -> VolumetricEnergy {
        self.refrigerating_effect() * self[Point::SuctionLineOutlet].density
    }

    /// Heating COP, `(h1 − h6)/(h1 − h0)`.
    #[must_use]
    pub fn cop_1(&self) -> Ratio {
        let h1 = self[Point::CompressorOutlet].enthalpy;
        (h1 - self[Point::LiquidLineOutlet].enthalpy) / self.compression_rise()
    }

    /// Cooling COP, `(h0 − h7)/(h1 − h0)`.
    #[must_use]
    pub fn cop_2(&self) -> Ratio {
        let h0 = self[Point::SuctionLineOutlet].enthalpy;
        (h0 - self[Point::EvaporatorInlet].enthalpy) / self.compression_rise()
    }

    /// `(h_is − h0)/(h1 − h0)`.
    #[must_use]
    pub fn isentropic_efficiency(&self) -> Ratio {
        let h0 = self[Point::SuctionLineOutlet].enthalpy;
        (self.isentropic_enthalpy - h0) / self.compression_rise()
    }

    /// Suction volume flow, `ṁ/d0`.
    #[must_use]
    pub fn volumetric_flow_rate(&self) -> VolumeRate {
        self.mass_flow / self[Point::SuctionLineOutlet].density
    }

    #[must_use]
    pub fn discharge_temperature(&self) -> ThermodynamicTemperature {
        self[Point::CompressorOutlet].temperature
    }

    /// Compressor work per unit mass.
    #[must_use]
    pub fn specific_power(&self) -> SpecificEnthalpy {
        self.specific_power
    }

    #[must_use]
    pub fn compressor_power(&self) -> Power {
        self.specific_power * self.mass_flow
    }

    /// Discharge over suction pressure, `p1/p0`.
    #[must_use]
    pub fn pressure_ratio(&self) -> Ratio {
        self[Point::CompressorOutlet].pressure / self[Point::SuctionLineOutlet].pressure
    }

    fn refrigerating_effect(&self) -> SpecificEnthalpy {
        self[Point::SuctionLineOutlet].enthalpy - self[Point::LiquidLineOutlet].enthalpy
    }

    fn compression_rise(&self) -> SpecificEnthalpy {
        self[Point::CompressorOutlet].enthalpy - self[Point::SuctionLineOutlet].enthalpy
    }
}

impl Index<Point> for Solution {
    type Output = State;

    fn index(&self, point: Point) -> &State {
        &self.state[point]
    }
}
