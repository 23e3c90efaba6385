//! The ten state points of the cycle.

use std::{fmt, ops::Index};

use uom::si::{
    available_energy::kilojoule_per_kilogram, mass_density::kilogram_per_cubic_meter,
    pressure::kilopascal, ratio::percent, specific_heat_capacity::kilojoule_per_kilogram_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::thermo::State;

/// A state point around the cycle, numbered in flow order from the
/// compressor inlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Point {
    SuctionLineOutlet = 0,
    CompressorOutlet = 1,
    DischargeLineOutlet = 2,
    CondenserDew = 3,
    CondenserBubble = 4,
    CondenserOutlet = 5,
    LiquidLineOutlet = 6,
    EvaporatorInlet = 7,
    EvaporatorDew = 8,
    EvaporatorOutlet = 9,
}

impl Point {
    pub const ALL: [Point; 10] = [
        Point::SuctionLineOutlet,
        Point::CompressorOutlet,
        Point::DischargeLineOutlet,
        Point::CondenserDew,
        Point::CondenserBubble,
        Point::CondenserOutlet,
        Point::LiquidLineOutlet,
        Point::EvaporatorInlet,
        Point::EvaporatorDew,
        Point::EvaporatorOutlet,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::SuctionLineOutlet => "After suction line / Before compressor",
            Self::CompressorOutlet => "After compressor / Before discharge line",
            Self::DischargeLineOutlet => "After discharge line / Condenser inlet",
            Self::CondenserDew => "Condenser dew point",
            Self::CondenserBubble => "Condenser bubble point",
            Self::CondenserOutlet => "Condenser outlet / Before liquid line",
            Self::LiquidLineOutlet => "After liquid line / Before expansion valve",
            Self::EvaporatorInlet => "After expansion valve / Evaporator inlet",
            Self::EvaporatorDew => "Evaporator dew point",
            Self::EvaporatorOutlet => "Evaporator outlet / Before suction line",
        }
    }

    /// Returns `true` for the dew and bubble points inside the heat exchangers.
    ///
    /// These are not physical stations in the piping, so listings often leave
    /// them out.
    #[must_use]
    pub fn is_saturation_boundary(self) -> bool {
        matches!(
            self,
            Self::CondenserDew | Self::CondenserBubble | Self::EvaporatorDew
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// The solved states of all ten points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleState {
    states: [State; 10],
}

impl CycleState {
    pub(crate) fn new(states: [State; 10]) -> Self {
        Self { states }
    }

    #[must_use]
    pub fn states(&self) -> &[State; 10] {
        &self.states
    }

    /// Iterates over the points in flow order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &State)> {
        Point::ALL.into_iter().zip(&self.states)
    }

    /// Returns a listing that leaves out the saturation boundary points.
    #[must_use]
    pub fn piping_table(&self) -> Table<'_> {
        Table {
            state: self,
            omit_saturation: true,
        }
    }

    /// Relative deviation of every point from a reference solution, in percent.
    ///
    /// Quality is compared only at the evaporator inlet, the one point where
    /// it is not fixed by construction, and is reported as an absolute
    /// difference in percentage points.
    #[must_use]
    pub fn deviation_from(&self, reference: &CycleState) -> Deviations {
        let rows = Point::ALL.map(|point| {
            let (a, b) = (&self[point], &reference[point]);
            let quality = match (point, a.quality, b.quality) {
                (Point::EvaporatorInlet, Some(x), Some(x_ref)) => {
                    (x - x_ref).get::<percent>().abs()
                }
                _ => 0.0,
            };
            Deviation {
                temperature: relative(a.temperature.get::<kelvin>(), b.temperature.get::<kelvin>()),
                pressure: relative(a.pressure.value, b.pressure.value),
                enthalpy: relative(a.enthalpy.value, b.enthalpy.value),
                entropy: relative(a.entropy.value, b.entropy.value),
                density: relative(a.density.value, b.density.value),
                quality,
            }
        });
        Deviations { rows }
    }
}

fn relative(value: f64, reference: f64) -> f64 {
    ((value - reference) / reference).abs() * 100.0
}

impl Index<Point> for CycleState {
    type Output = State;

    fn index(&self, point: Point) -> &State {
        &self.states[point.index()]
    }
}

const HEADER: &str = "   id       t          p        h          s          d         x";

/// Fixed-width listing of the points in display units.
///
/// Columns are °C, kPa, kJ/kg, kJ/(kg·K), kg/m³ and quality in percent.
impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Table {
            state: self,
            omit_saturation: false,
        }
        .fmt(f)
    }
}

/// A [`CycleState`] listing, optionally without the saturation points.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    state: &'a CycleState,
    omit_saturation: bool,
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        for (point, s) in self.state.iter() {
            if self.omit_saturation && point.is_saturation_boundary() {
                continue;
            }
            let quality = s
                .quality
                .map_or_else(|| "-".to_string(), |x| format!("{:.1}", x.get::<percent>()));
            writeln!(
                f,
                "{:>6} {:>6.2} {:>10.4} {:>8.2} {:>10.4} {:>10.4} {:>10}   {}",
                point,
                s.temperature.get::<degree_celsius>(),
                s.pressure.get::<kilopascal>(),
                s.enthalpy.get::<kilojoule_per_kilogram>(),
                s.entropy.get::<kilojoule_per_kilogram_kelvin>(),
                s.density.get::<kilogram_per_cubic_meter>(),
                quality,
                point.description(),
            )?;
        }
        Ok(())
    }
}

/// Percent deviations of one point's properties.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Deviation {
    pub temperature: f64,
    pub pressure: f64,
    pub enthalpy: f64,
    pub entropy: f64,
    pub density: f64,
    pub quality: f64,
}

/// Per-point deviations returned by [`CycleState::deviation_from`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviations {
    rows: [Deviation; 10],
}

impl Index<Point> for Deviations {
    type Output = Deviation;

    fn index(&self, point: Point) -> &Deviation {
        &self.rows[point.index()]
    }
}

impl Deviations {
    /// Largest deviation of any property at any piping point.
    #[must_use]
    pub fn max(&self) -> f64 {
        Point::ALL
            .into_iter()
            .filter(|p| !p.is_saturation_boundary())
            .map(|p| {
                let d = self[p];
                [d.temperature, d.pressure, d.enthalpy, d.entropy, d.density, d.quality]
                    .into_iter()
                    .fold(0.0, f64::max)
            })
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Deviations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        for point in Point::ALL {
            if point.is_saturation_boundary() {
                continue;
            }
            let d = self[point];
            writeln!(
                f,
                "{:>6} {:>6.2} {:>10.4} {:>8.2} {:>10.4} {:>10.4} {:>10.1}   {}",
                point,
                d.temperature,
                d.pressure,
                d.enthalpy,
                d.entropy,
                d.density,
                d.quality,
                point.description(),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::refrigeration::vcc::core::test_support::saturated_state;

    fn cycle() -> CycleState {
        CycleState::new(std::array::from_fn(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = 250.0 + i as f64;
            saturated_state(t, 1.0e5 + 1.0e4 * t, 0.5)
        }))
    }

    #[test]
    fn indices_round_trip() {
        for (i, point) in Point::ALL.into_iter().enumerate() {
            assert_eq!(point.index(), i);
            assert_eq!(Point::from_index(i), Some(point));
        }
        assert_eq!(Point::from_index(10), None);
    }

    #[test]
    fn listing_rows() {
        let state = cycle();

        let full = state.to_string();
        assert_eq!(full.lines().count(), 11);
        assert!(full.contains("Condenser dew point"));
        assert!(full.lines().nth(1).unwrap().trim_start().starts_with("0 "));

        let piping = state.piping_table().to_string();
        assert_eq!(piping.lines().count(), 8);
        assert!(!piping.contains("dew point"));
        assert!(!piping.contains("bubble point"));
    }

    #[test]
    fn deviation_against_itself_is_zero() {
        let state = cycle();
        assert_relative_eq!(state.deviation_from(&state).max(), 0.0);
    }

    #[test]
    fn deviation_in_percent() {
        let reference = cycle();
        let mut states = *reference.states();
        let inlet = Point::EvaporatorInlet.index();
        states[inlet].pressure = reference[Point::EvaporatorInlet].pressure * 1.02;
        states[inlet].quality = Some(uom::si::f64::Ratio::new::<uom::si::ratio::ratio>(0.53));

        let deviations = CycleState::new(states).deviation_from(&reference);
        assert_relative_eq!(deviations[Point::EvaporatorInlet].pressure, 2.0, epsilon = 1e-9);
        assert_relative_eq!(deviations[Point::EvaporatorInlet].quality, 3.0, epsilon = 1e-9);
        assert_relative_eq!(deviations[Point::SuctionLineOutlet].pressure, 0.0);
        assert_relative_eq!(deviations.max(), 3.0, epsilon = 1e-9);
    }
}
