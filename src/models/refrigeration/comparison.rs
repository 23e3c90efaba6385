//! Side-by-side comparison of refrigerants.
//!
//! A [`Comparison`] is a registry of cycle solvers keyed by refrigerant name
//! plus the curves recorded by sweeping them. Each [`Metric`] is a pure
//! function of a [`Solution`], so curves for any metric can be recorded from
//! the same sweep and compared against a baseline refrigerant afterwards.

use std::{collections::BTreeMap, fmt};

use thiserror::Error;
use tracing::{debug, warn};
use uom::si::{
    available_energy::kilojoule_per_kilogram,
    f64::ThermodynamicTemperature,
    mass_rate::kilogram_per_hour,
    power::kilowatt,
    pressure::kilopascal,
    ratio::ratio,
    thermodynamic_temperature::{degree_celsius, kelvin},
    volume_rate::cubic_meter_per_hour,
};

use crate::support::curve::{Curve, CurveError, Intersection};

use super::vcc::{Parameter, ParameterError, Solution, Vcc, VccError, VccThermoModel};

/// A performance metric recorded during a sweep.
///
/// Values are reported in display units: kW for power, kJ/m³ for volumetric
/// capacity, °C for temperature, kg/h and m³/h for flows and kJ/kg for
/// specific power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    CoolingCop,
    HeatingCop,
    CoolingCapacity,
    VolumetricCoolingCapacity,
    DischargeTemperature,
    MassFlowRate,
    VolumetricFlowRate,
    IsentropicEfficiency,
    SpecificPower,
    CompressorPower,
    PressureRatio,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::CoolingCop,
        Metric::HeatingCop,
        Metric::CoolingCapacity,
        Metric::VolumetricCoolingCapacity,
        Metric::DischargeTemperature,
        Metric::MassFlowRate,
        Metric::VolumetricFlowRate,
        Metric::IsentropicEfficiency,
        Metric::SpecificPower,
        Metric::CompressorPower,
        Metric::PressureRatio,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CoolingCop => "cop_2",
            Self::HeatingCop => "cop_1",
            Self::CoolingCapacity => "cooling_capacity",
            Self::VolumetricCoolingCapacity => "volumetric_cooling_capacity",
            Self::DischargeTemperature => "discharge_temperature",
            Self::MassFlowRate => "mass_flow_rate",
            Self::VolumetricFlowRate => "volumetric_flow_rate",
            Self::IsentropicEfficiency => "isentropic_efficiency",
            Self::SpecificPower => "specific_power",
            Self::CompressorPower => "compressor_power",
            Self::PressureRatio => "pressure_ratio",
        }
    }

    /// Evaluates the metric on a solution in display units.
    #[must_use]
    pub fn evaluate(self, solution: &Solution) -> f64 {
        match self {
            Self::CoolingCop => solution.cop_2().get::<ratio>(),
            Self::HeatingCop => solution.cop_1().get::<ratio>(),
            Self::CoolingCapacity => solution.cooling_capacity().get::<kilowatt>(),
            Self::VolumetricCoolingCapacity => {
                solution.volumetric_cooling_capacity().get::<kilopascal>()
            }
            Self::DischargeTemperature => solution.discharge_temperature().get::<degree_celsius>(),
            Self::MassFlowRate => solution.mass_flow_rate().get::<kilogram_per_hour>(),
            Self::VolumetricFlowRate => {
                solution.volumetric_flow_rate().get::<cubic_meter_per_hour>()
            }
            Self::IsentropicEfficiency => solution.isentropic_efficiency().get::<ratio>(),
            Self::SpecificPower => solution.specific_power().get::<kilojoule_per_kilogram>(),
            Self::CompressorPower => solution.compressor_power().get::<kilowatt>(),
            Self::PressureRatio => solution.pressure_ratio().get::<ratio>(),
        }
    }

    /// Percent deviation of `value` from `reference`, both in display units.
    ///
    /// Discharge temperature is recorded in °C, so its deviation is relative
    /// to the Celsius value.
    #[must_use]
    pub fn relative(self, value: f64, reference: f64) -> f64 {
        (value - reference) / reference * 100.0
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The operating parameter varied by a sweep.
///
/// Sweep values are given in °C for temperatures and kelvin for
/// temperature differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sweep {
    EvaporatorTemperature,
    CondenserTemperature,
    SuperHeat,
    SubCooling,
}

impl Sweep {
    #[must_use]
    pub fn parameter(self) -> Parameter {
        match self {
            Self::EvaporatorTemperature => Parameter::EvaporatorTemperature,
            Self::CondenserTemperature => Parameter::CondenserTemperature,
            Self::SuperHeat => Parameter::EvaporatorSuperHeat,
            Self::SubCooling => Parameter::CondenserSubCooling,
        }
    }

    /// Converts a sweep value to the flat SI value of its parameter.
    #[must_use]
    pub fn to_flat(self, x: f64) -> f64 {
        match self {
            Self::EvaporatorTemperature | Self::CondenserTemperature => {
                ThermodynamicTemperature::new::<degree_celsius>(x).get::<kelvin>()
            }
            Self::SuperHeat | Self::SubCooling => x,
        }
    }
}

/// An operating point a sweep could not solve.
#[derive(Debug)]
pub struct SkippedPoint {
    pub refrigerant: String,
    pub x: f64,
    pub error: VccError,
}

/// Outcome of [`Comparison::sweep`].
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Points left out of the recorded curves.
    pub skipped: Vec<SkippedPoint>,
}

impl SweepReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Errors from a [`Comparison`].
#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("no solver registered for refrigerant {0}")]
    UnknownRefrigerant(String),

    #[error("no {metric} curve recorded for refrigerant {refrigerant}")]
    MissingCurve { metric: Metric, refrigerant: String },

    #[error("sweep value {x} rejected")]
    Parameter {
        x: f64,
        #[source]
        source: ParameterError,
    },

    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// A registry of cycle solvers and their recorded curves.
#[derive(Debug, Clone)]
pub struct Comparison<M> {
    solvers: BTreeMap<String, Vcc<M>>,
    curves: BTreeMap<(Metric, String), Curve>,
}

impl<M> Default for Comparison<M> {
    fn default() -> Self {
        Self {
            solvers: BTreeMap::new(),
            curves: BTreeMap::new(),
        }
    }
}

impl<M: VccThermoModel> Comparison<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a solver under its refrigerant's name.
    ///
    /// Returns the solver previously registered under that name, whose
    /// recorded curves are discarded.
    pub fn insert(&mut self, vcc: Vcc<M>) -> Option<Vcc<M>> {
        let name = vcc.refrigerant().name().to_owned();
        self.curves.retain(|(_, refrigerant), _| *refrigerant != name);
        self.solvers.insert(name, vcc)
    }

    #[must_use]
    pub fn get(&self, refrigerant: &str) -> Option<&Vcc<M>> {
        self.solvers.get(refrigerant)
    }

    pub fn get_mut(&mut self, refrigerant: &str) -> Option<&mut Vcc<M>> {
        self.solvers.get_mut(refrigerant)
    }

    /// Registered refrigerant names in order.
    pub fn refrigerants(&self) -> impl Iterator<Item = &str> + '_ {
        self.solvers.keys().map(String::as_str)
    }

    /// The recorded curve of `metric` for `refrigerant`.
    #[must_use]
    pub fn curve(&self, metric: Metric, refrigerant: &str) -> Option<&Curve> {
        self.curves.get(&(metric, refrigerant.to_owned()))
    }

    /// Sweeps every registered solver over `values`, recording `metrics`.
    ///
    /// Previously recorded curves for the swept metrics are replaced.
    /// Infeasible operating points are skipped and listed in the report.
    /// Each solver's conditions are restored once its sweep ends.
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError::Parameter`] before solving anything if a
    /// sweep value would be rejected.
    pub fn sweep(
        &mut self,
        sweep: Sweep,
        values: &[f64],
        metrics: &[Metric],
    ) -> Result<SweepReport, ComparisonError> {
        let parameter = sweep.parameter();
        for &x in values {
            parameter
                .check(sweep.to_flat(x))
                .map_err(|source| ComparisonError::Parameter { x, source })?;
        }

        let mut report = SweepReport::default();
        for (name, vcc) in &mut self.solvers {
            let mut curves: Vec<_> = metrics.iter().map(|_| Curve::default()).collect();
            let original = *vcc.conditions();

            let result = sweep_one(vcc, sweep, values, |x, outcome| match outcome {
                Ok(solution) => metrics.iter().zip(&mut curves).try_for_each(|(m, curve)| {
                    curve.push(x, m.evaluate(solution))
                }),
                Err(error) => {
                    warn!(refrigerant = %name, x, %error, "skipping infeasible operating point");
                    report.skipped.push(SkippedPoint {
                        refrigerant: name.clone(),
                        x,
                        error,
                    });
                    Ok(())
                }
            });
            vcc.restore_conditions(original);
            result?;

            debug!(refrigerant = %name, points = values.len(), "sweep complete");
            for (&metric, curve) in metrics.iter().zip(curves) {
                self.curves.insert((metric, name.clone()), curve);
            }
        }
        Ok(report)
    }

    /// `metric` for `refrigerant` as percent deviation from `baseline`.
    ///
    /// Only `x` values recorded for both refrigerants are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError::MissingCurve`] if either curve was not recorded.
    pub fn relative_curve(
        &self,
        metric: Metric,
        refrigerant: &str,
        baseline: &str,
    ) -> Result<Curve, ComparisonError> {
        let curve = self.recorded(metric, refrigerant)?;
        let reference = self.recorded(metric, baseline)?;

        let points = curve.points().filter_map(|(x, y)| {
            reference
                .y_at(x)
                .map(|reference| (x, metric.relative(y, reference)))
        });
        Ok(Curve::from_points(points)?)
    }

    /// Where `a`'s recorded `metric` curve crosses `b`'s.
    ///
    /// # Errors
    ///
    /// Returns [`ComparisonError::MissingCurve`] if either curve was not recorded.
    pub fn intersections(
        &self,
        metric: Metric,
        a: &str,
        b: &str,
    ) -> Result<Vec<Intersection>, ComparisonError> {
        Ok(self
            .recorded(metric, a)?
            .intersections(self.recorded(metric, b)?))
    }

    fn recorded(&self, metric: Metric, refrigerant: &str) -> Result<&Curve, ComparisonError> {
        if !self.solvers.contains_key(refrigerant) {
            return Err(ComparisonError::UnknownRefrigerant(refrigerant.to_owned()));
        }
        self.curve(metric, refrigerant)
            .ok_or_else(|| ComparisonError::MissingCurve {
                metric,
                refrigerant: refrigerant.to_owned(),
            })
    }
}

/// Runs one solver across the sweep values, handing each outcome to `record`.
fn sweep_one<M: VccThermoModel>(
    vcc: &mut Vcc<M>,
    sweep: Sweep,
    values: &[f64],
    mut record: impl FnMut(f64, Result<&Solution, VccError>) -> Result<(), CurveError>,
) -> Result<(), ComparisonError> {
    let parameter = sweep.parameter();
    for &x in values {
        vcc.set(parameter, sweep.to_flat(x))
            .map_err(|source| ComparisonError::Parameter { x, source })?;
        record(x, vcc.calculate())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin as delta_kelvin};

    use crate::{
        models::refrigeration::vcc::{
            OperatingConditions,
            test_support::{blend, celsius, halocarbon},
        },
        support::thermo::{
            fluid::Refrigerant,
            model::{IdealRefrigerant, IdealRefrigerantParameters},
        },
    };

    fn registry() -> Comparison<IdealRefrigerant> {
        let mut comparison = Comparison::new();
        comparison.insert(Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap());
        comparison.insert(Vcc::new(blend(4.0), OperatingConditions::sandbox()).unwrap());
        comparison
    }

    #[test]
    fn solvers_are_keyed_by_refrigerant() {
        let mut comparison = registry();
        assert_eq!(comparison.refrigerants().collect::<Vec<_>>(), ["R134A", "R404A"]);
        assert!(comparison.get("R134A").is_some());
        assert!(comparison.get_mut("R404A").is_some());
        assert!(comparison.get("R32").is_none());

        let again = Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap();
        let replaced = comparison.insert(again);
        assert!(replaced.is_some());
        assert_eq!(comparison.refrigerants().count(), 2);
    }

    #[test]
    fn sweep_records_every_metric() {
        let mut comparison = registry();
        let values = [-40.0, -30.0, -20.0];

        let report = comparison
            .sweep(Sweep::EvaporatorTemperature, &values, &Metric::ALL)
            .unwrap();
        assert!(report.is_complete());

        for name in ["R134A", "R404A"] {
            for metric in Metric::ALL {
                let curve = comparison.curve(metric, name).unwrap();
                assert_eq!(curve.x(), values);
            }

            let cop = comparison.curve(Metric::CoolingCop, name).unwrap().y();
            assert!(cop[0] < cop[1] && cop[1] < cop[2]);

            // The first point matches a direct solve at the same conditions.
            let mut vcc = Vcc::new(
                comparison.get(name).unwrap().thermo().clone(),
                OperatingConditions::sandbox(),
            )
            .unwrap();
            let solution = vcc.calculate().unwrap();
            for metric in Metric::ALL {
                let y = comparison.curve(metric, name).unwrap().y()[0];
                assert_relative_eq!(y, metric.evaluate(solution), max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn sweep_restores_the_conditions() {
        let mut comparison = registry();
        comparison
            .sweep(Sweep::SuperHeat, &[2.0, 10.0], &[Metric::CoolingCop])
            .unwrap();

        let vcc = comparison.get("R134A").unwrap();
        assert_eq!(vcc.conditions(), &OperatingConditions::sandbox());
    }

    #[test]
    fn infeasible_points_are_skipped() {
        let conditions = OperatingConditions::new(celsius(-10.0), celsius(30.0));
        let mut comparison = Comparison::new();
        comparison.insert(Vcc::new(halocarbon(), conditions).unwrap());

        let report = comparison
            .sweep(Sweep::SubCooling, &[0.0, 5.0, 75.0, 10.0], &[Metric::CoolingCapacity])
            .unwrap();

        assert_eq!(report.skipped.len(), 1);
        let skipped = &report.skipped[0];
        assert_eq!(skipped.refrigerant, "R134A");
        assert_relative_eq!(skipped.x, 75.0);
        match &skipped.error {
            VccError::NotTwoPhase { .. } => {}
            other => panic!("expected not two-phase, got {other:?}"),
        }

        let curve = comparison.curve(Metric::CoolingCapacity, "R134A").unwrap();
        assert_eq!(curve.x(), [0.0, 5.0, 10.0]);
        assert!(curve.y()[0] < curve.y()[1]);
    }

    #[test]
    fn rejected_values_solve_nothing() {
        let mut comparison = registry();

        match comparison.sweep(Sweep::SuperHeat, &[5.0, -1.0], &[Metric::CoolingCop]) {
            Err(ComparisonError::Parameter { x, source }) => {
                assert_relative_eq!(x, -1.0);
                assert_eq!(source.parameter, Parameter::EvaporatorSuperHeat);
            }
            other => panic!("expected a rejected sweep value, got {other:?}"),
        }
        assert!(comparison.curve(Metric::CoolingCop, "R134A").is_none());
        assert!(comparison.get("R134A").unwrap().solution().is_none());
    }

    #[test]
    fn relative_curve_against_a_baseline() {
        let mut comparison = registry();
        comparison
            .sweep(Sweep::CondenserTemperature, &[30.0, 40.0], &[Metric::CoolingCop])
            .unwrap();

        let itself = comparison
            .relative_curve(Metric::CoolingCop, "R404A", "R404A")
            .unwrap();
        assert!(itself.y().iter().all(|&y| y == 0.0));

        let relative = comparison
            .relative_curve(Metric::CoolingCop, "R134A", "R404A")
            .unwrap();
        let cop = |name| comparison.curve(Metric::CoolingCop, name).unwrap().y()[1];
        assert_eq!(relative.x(), [30.0, 40.0]);
        assert_relative_eq!(
            relative.y()[1],
            (cop("R134A") - cop("R404A")) / cop("R404A") * 100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn identical_refrigerants_never_cross() {
        let twin = IdealRefrigerant::new(
            Refrigerant::pure("R134A-twin"),
            IdealRefrigerantParameters::halocarbon(),
        )
        .unwrap();
        let mut comparison = Comparison::new();
        comparison.insert(Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap());
        comparison.insert(Vcc::new(twin, OperatingConditions::sandbox()).unwrap());
        comparison
            .sweep(Sweep::EvaporatorTemperature, &[-40.0, -35.0, -30.0], &[Metric::CoolingCop])
            .unwrap();

        let crossings = comparison
            .intersections(Metric::CoolingCop, "R134A", "R134A-twin")
            .unwrap();
        assert!(crossings.is_empty());
    }

    #[test]
    fn missing_curves() {
        let mut comparison = registry();
        comparison
            .sweep(Sweep::SuperHeat, &[5.0], &[Metric::CoolingCop])
            .unwrap();

        match comparison.intersections(Metric::PressureRatio, "R134A", "R404A") {
            Err(ComparisonError::MissingCurve { metric, .. }) => {
                assert_eq!(metric, Metric::PressureRatio);
            }
            other => panic!("expected a missing curve, got {other:?}"),
        }
        match comparison.relative_curve(Metric::CoolingCop, "R32", "R404A") {
            Err(ComparisonError::UnknownRefrigerant(name)) => assert_eq!(name, "R32"),
            other => panic!("expected an unknown refrigerant, got {other:?}"),
        }
    }

    #[test]
    fn reinserting_discards_curves() {
        let mut comparison = registry();
        comparison
            .sweep(Sweep::SuperHeat, &[5.0], &[Metric::CoolingCop])
            .unwrap();
        comparison.insert(Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap());

        assert!(comparison.curve(Metric::CoolingCop, "R134A").is_none());
        assert!(comparison.curve(Metric::CoolingCop, "R404A").is_some());
    }

    #[test]
    fn sweep_values_convert_to_flat_units() {
        assert_relative_eq!(Sweep::EvaporatorTemperature.to_flat(-40.0), 233.15);
        assert_eq!(
            Sweep::CondenserTemperature.to_flat(35.0),
            celsius(35.0).get::<kelvin>()
        );
        assert_relative_eq!(Sweep::SubCooling.to_flat(3.0), 3.0);

        let mut vcc = Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap();
        let evaporator = vcc.conditions().evaporator.temperature;
        vcc.set(
            Sweep::EvaporatorTemperature.parameter(),
            Sweep::EvaporatorTemperature.to_flat(-40.0),
        )
        .unwrap();
        assert_eq!(vcc.conditions().evaporator.temperature, evaporator);

        let super_heat = TemperatureInterval::new::<delta_kelvin>(3.0);
        let mut vcc = Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap();
        vcc.set(Sweep::SuperHeat.parameter(), Sweep::SuperHeat.to_flat(3.0))
            .unwrap();
        assert_eq!(vcc.conditions().evaporator.super_heat, super_heat);
    }
}
