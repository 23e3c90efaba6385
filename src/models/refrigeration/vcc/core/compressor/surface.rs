use std::ops::RangeInclusive;

use uom::si::{
    electric_current::ampere,
    f64::{ElectricCurrent, MassRate, Power, ThermodynamicTemperature},
    mass_rate::{kilogram_per_hour, kilogram_per_second},
    power::watt,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::units::SpecificEnthalpy;

use super::{Bound, OutOfRangeError, SurfaceError};

/// EN 12900 polynomial coefficients, one row per rated output.
///
/// Each row evaluates
/// `c1 + c2·te + c3·tc + c4·te² + c5·te·tc + c6·tc² + c7·te³ + c8·tc·te² + c9·te·tc² + c10·tc³`
/// with evaporating and condensing temperatures in °C, as published in
/// manufacturer rating sheets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Cooling capacity in W.
    pub capacity: [f64; 10],
    /// Shaft power in W.
    pub power: [f64; 10],
    /// Mass flow in kg/h.
    pub mass_flow: [f64; 10],
    /// Current in A.
    pub current: [f64; 10],
}

impl Coefficients {
    fn rows(&self) -> [(&'static str, &[f64; 10]); 4] {
        [
            ("capacity", &self.capacity),
            ("power", &self.power),
            ("mass flow", &self.mass_flow),
            ("current", &self.current),
        ]
    }
}

fn en12900(c: &[f64; 10], te: f64, tc: f64) -> f64 {
    c[0] + c[1] * te
        + c[2] * tc
        + c[3] * te * te
        + c[4] * te * tc
        + c[5] * tc * tc
        + c[6] * te * te * te
        + c[7] * tc * te * te
        + c[8] * te * tc * tc
        + c[9] * tc * tc * tc
}

/// Rated compressor outputs at one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub cooling_capacity: Power,
    pub power: Power,
    pub mass_flow: MassRate,
    pub current: ElectricCurrent,
}

impl Rating {
    /// Power added per unit mass of refrigerant.
    #[must_use]
    pub fn specific_power(&self) -> SpecificEnthalpy {
        self.power / self.mass_flow
    }
}

/// The placeholder rating a compressor holds before its first evaluation.
impl Default for Rating {
    fn default() -> Self {
        Self {
            cooling_capacity: Power::new::<watt>(1000.0),
            power: Power::new::<watt>(1000.0),
            mass_flow: MassRate::new::<kilogram_per_hour>(3600.0),
            current: ElectricCurrent::new::<ampere>(10.0),
        }
    }
}

/// A compressor rating surface and the rectangle where it is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSurface {
    coefficients: Coefficients,
    evaporator: RangeInclusive<ThermodynamicTemperature>,
    condenser: RangeInclusive<ThermodynamicTemperature>,
}

impl PerformanceSurface {
    /// Creates a surface valid over the given evaporating and condensing ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if a coefficient is not finite or a range is
    /// empty or not a number.
    pub fn new(
        coefficients: Coefficients,
        evaporator: RangeInclusive<ThermodynamicTemperature>,
        condenser: RangeInclusive<ThermodynamicTemperature>,
    ) -> Result<Self, SurfaceError> {
        for (row, values) in coefficients.rows() {
            if let Some(index) = values.iter().position(|c| !c.is_finite()) {
                return Err(SurfaceError::NonFiniteCoefficient { row, index });
            }
        }

        for (exchanger, range) in [("evaporator", &evaporator), ("condenser", &condenser)] {
            // Also rejects NaN bounds, which never compare as ordered.
            if !(range.start() <= range.end()) {
                return Err(SurfaceError::InvalidRange {
                    exchanger,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }

        Ok(Self {
            coefficients,
            evaporator,
            condenser,
        })
    }

    /// A surface that returns `rating` at every operating point.
    #[must_use]
    pub fn constant(rating: Rating) -> Self {
        let first = |value: f64| {
            let mut row = [0.0; 10];
            row[0] = value;
            row
        };
        let everywhere = ThermodynamicTemperature::new::<kelvin>(0.0)
            ..=ThermodynamicTemperature::new::<kelvin>(f64::INFINITY);

        Self {
            coefficients: Coefficients {
                capacity: first(rating.cooling_capacity.get::<watt>()),
                power: first(rating.power.get::<watt>()),
                mass_flow: first(rating.mass_flow.get::<kilogram_per_hour>()),
                current: first(rating.current.get::<ampere>()),
            },
            evaporator: everywhere.clone(),
            condenser: everywhere,
        }
    }

    #[must_use]
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    #[must_use]
    pub fn evaporator_range(&self) -> &RangeInclusive<ThermodynamicTemperature> {
        &self.evaporator
    }

    #[must_use]
    pub fn condenser_range(&self) -> &RangeInclusive<ThermodynamicTemperature> {
        &self.condenser
    }

    /// Checks that an operating point lies inside the validity rectangle.
    ///
    /// The evaporator side is checked first.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] naming the first bound that is crossed.
    pub fn check(
        &self,
        evaporator: ThermodynamicTemperature,
        condenser: ThermodynamicTemperature,
    ) -> Result<(), OutOfRangeError> {
        let (te_min, te_max) = (*self.evaporator.start(), *self.evaporator.end());
        let (tc_min, tc_max) = (*self.condenser.start(), *self.condenser.end());

        let crossed = if evaporator < te_min {
            Some((Bound::EvaporatorMin, te_min, evaporator))
        } else if evaporator > te_max {
            Some((Bound::EvaporatorMax, te_max, evaporator))
        } else if condenser < tc_min {
            Some((Bound::CondenserMin, tc_min, condenser))
        } else if condenser > tc_max {
            Some((Bound::CondenserMax, tc_max, condenser))
        } else {
            None
        };

        match crossed {
            Some((bound, limit, actual)) => Err(OutOfRangeError {
                bound,
                limit,
                actual,
            }),
            None => Ok(()),
        }
    }

    /// Evaluates the rated outputs at an operating point.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if the point lies outside the validity rectangle.
    pub fn evaluate(
        &self,
        evaporator: ThermodynamicTemperature,
        condenser: ThermodynamicTemperature,
    ) -> Result<Rating, OutOfRangeError> {
        self.check(evaporator, condenser)?;

        let te = evaporator.get::<degree_celsius>();
        let tc = condenser.get::<degree_celsius>();
        let c = &self.coefficients;

        Ok(Rating {
            cooling_capacity: Power::new::<watt>(en12900(&c.capacity, te, tc)),
            power: Power::new::<watt>(en12900(&c.power, te, tc)),
            mass_flow: MassRate::new::<kilogram_per_second>(en12900(&c.mass_flow, te, tc) / 3600.0),
            current: ElectricCurrent::new::<ampere>(en12900(&c.current, te, tc)),
        })
    }
}

/// A rated compressor and the rating from its last in-range evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceCompressor {
    surface: PerformanceSurface,
    rating: Rating,
}

impl SurfaceCompressor {
    #[must_use]
    pub fn new(surface: PerformanceSurface) -> Self {
        Self {
            surface,
            rating: Rating::default(),
        }
    }

    #[must_use]
    pub fn surface(&self) -> &PerformanceSurface {
        &self.surface
    }

    /// The current rating.
    ///
    /// Until the first in-range update this is [`Rating::default`].
    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Re-evaluates the rating at a new operating point.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if the point is outside the surface, in
    /// which case the previous rating is kept.
    pub fn update(
        &mut self,
        evaporator: ThermodynamicTemperature,
        condenser: ThermodynamicTemperature,
    ) -> Result<Rating, OutOfRangeError> {
        self.rating = self.surface.evaluate(evaporator, condenser)?;
        Ok(self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::available_energy::joule_per_kilogram;

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    /// A small low-temperature compressor, coefficients in the usual sheet units.
    fn coefficients() -> Coefficients {
        Coefficients {
            capacity: [
                5893.0, 219.1, -61.55, 3.002, -2.418, 0.0938, 0.0117, -0.0256, 0.0165, -0.0011,
            ],
            power: [
                1633.0, -14.27, 36.76, -0.2187, 0.6425, 0.1031, -0.0015, 0.0041, -0.0013, 0.0003,
            ],
            mass_flow: [
                123.2, 4.441, -0.3317, 0.0594, -0.0263, -0.0016, 0.0002, -0.0003, 0.0001, 0.0,
            ],
            current: [4.1, -0.012, 0.021, 0.0, 0.0, 0.0002, 0.0, 0.0, 0.0, 0.0],
        }
    }

    fn surface() -> PerformanceSurface {
        PerformanceSurface::new(
            coefficients(),
            celsius(-40.0)..=celsius(0.0),
            celsius(20.0)..=celsius(50.0),
        )
        .unwrap()
    }

    #[test]
    fn polynomial_terms() {
        // One coefficient at a time picks out each term.
        let (te, tc) = (-10.0, 40.0);
        let expected = [
            1.0,
            te,
            tc,
            te * te,
            te * tc,
            tc * tc,
            te * te * te,
            tc * te * te,
            te * tc * tc,
            tc * tc * tc,
        ];
        for (i, term) in expected.into_iter().enumerate() {
            let mut c = [0.0; 10];
            c[i] = 1.0;
            assert_relative_eq!(en12900(&c, te, tc), term);
        }
    }

    #[test]
    fn evaluates_inside_the_rectangle() {
        let rating = surface().evaluate(celsius(-10.0), celsius(40.0)).unwrap();

        let mass_flow_per_hour = en12900(&coefficients().mass_flow, -10.0, 40.0);
        assert_relative_eq!(
            rating.mass_flow.get::<kilogram_per_second>(),
            mass_flow_per_hour / 3600.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            rating.specific_power().get::<joule_per_kilogram>(),
            rating.power.get::<watt>() / rating.mass_flow.get::<kilogram_per_second>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn out_of_range_keeps_the_previous_rating() {
        let mut compressor = SurfaceCompressor::new(surface());
        let before = compressor.update(celsius(-20.0), celsius(30.0)).unwrap();

        match compressor.update(celsius(10.0), celsius(30.0)) {
            Err(OutOfRangeError { bound, limit, actual }) => {
                assert_eq!(bound, Bound::EvaporatorMax);
                assert_relative_eq!(limit.get::<degree_celsius>(), 0.0, epsilon = 1e-9);
                assert_relative_eq!(actual.get::<degree_celsius>(), 10.0, epsilon = 1e-9);
            }
            other => panic!("expected out-of-range error, got {other:?}"),
        }
        assert_eq!(compressor.rating(), before);
    }

    #[test]
    fn first_crossed_bound_is_reported() {
        let s = surface();
        let bound = |te: f64, tc: f64| s.check(celsius(te), celsius(tc)).map_err(|e| e.bound);

        assert_eq!(bound(-45.0, 55.0), Err(Bound::EvaporatorMin));
        assert_eq!(bound(-20.0, 55.0), Err(Bound::CondenserMax));
        assert_eq!(bound(-20.0, 10.0), Err(Bound::CondenserMin));
        assert_eq!(bound(-40.0, 50.0), Ok(()));
    }

    #[test]
    fn default_rating_until_first_update() {
        let compressor = SurfaceCompressor::new(surface());
        assert_eq!(compressor.rating(), Rating::default());
        assert_relative_eq!(
            compressor.rating().mass_flow.get::<kilogram_per_second>(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn constant_surface() {
        let rating = Rating {
            cooling_capacity: Power::new::<watt>(12_000.0),
            power: Power::new::<watt>(5_000.0),
            mass_flow: MassRate::new::<kilogram_per_second>(0.08),
            current: ElectricCurrent::new::<ampere>(9.0),
        };
        let evaluated = PerformanceSurface::constant(rating)
            .evaluate(celsius(-60.0), celsius(70.0))
            .unwrap();
        assert_relative_eq!(evaluated.power.get::<watt>(), 5_000.0, epsilon = 1e-9);
        assert_relative_eq!(
            evaluated.mass_flow.get::<kilogram_per_second>(),
            0.08,
            epsilon = 1e-12
        );
    }

    #[test]
    fn rejects_malformed_surfaces() {
        let mut bad = coefficients();
        bad.power[3] = f64::NAN;
        let evaporator = celsius(-40.0)..=celsius(0.0);
        let condenser = celsius(20.0)..=celsius(50.0);
        match PerformanceSurface::new(bad, evaporator, condenser) {
            Err(SurfaceError::NonFiniteCoefficient { row, index }) => {
                assert_eq!(row, "power");
                assert_eq!(index, 3);
            }
            other => panic!("expected coefficient error, got {other:?}"),
        }

        assert!(matches!(
            PerformanceSurface::new(
                coefficients(),
                celsius(0.0)..=celsius(-40.0),
                celsius(20.0)..=celsius(50.0)
            ),
            Err(SurfaceError::InvalidRange { exchanger: "evaporator", .. })
        ));
    }
}
