//! Single-stage vapor-compression cycle solver.
//!
//! The cycle is fixed by ten state points. The condenser and evaporator mean
//! pressures are found by fixed-point searches against the property model,
//! then the suction line, compressor and discharge line are propagated
//! between them. The two searches are cached separately so a change that
//! only affects one of them does not rerun the other.

mod compressor;
mod config;
mod error;
mod input;
mod points;
mod solution;
mod solve;
mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use compressor::{
    Bound, Coefficients, Compressor, OutOfRangeError, PerformanceSurface, Rating,
    SurfaceCompressor, SurfaceError,
};
pub use config::{SearchConfig, VccConfig};
pub use error::{Exchanger, VccError};
pub use input::{
    Condenser, Evaporator, Line, OperatingConditions, Parameter, ParameterError,
    ParseParameterError, Stale,
};
pub use points::{CycleState, Deviation, Deviations, Point, Table};
pub use solution::Solution;
pub use traits::VccThermoModel;

use tracing::{debug, warn};
use uom::si::{
    f64::{Ratio, TemperatureInterval, ThermodynamicTemperature, VolumeRate},
    ratio::ratio,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
    volume_rate::cubic_meter_per_second,
};

use crate::support::thermo::{
    capability::HasCriticalPoint,
    envelope::{self, EnvelopeConfig, EnvelopeError, PhaseEnvelope},
    fluid::Refrigerant,
};

use solve::{CondenserPoints, EvaporatorPoints};

/// A vapor-compression cycle bound to one refrigerant.
///
/// `Vcc` owns the operating conditions and compressor, tracks which
/// sub-solves their changes invalidated, and keeps the most recent
/// [`Solution`].
///
/// Every mutator either applies a value completely or rejects it with
/// [`ParameterError`] and leaves the solver untouched. A successful mutation
/// discards the current solution, so [`Vcc::solution`] never describes
/// inputs other than the current ones.
///
/// # Example
///
/// ```
/// use twine_refrigeration::{
///     models::refrigeration::vcc::{OperatingConditions, Vcc},
///     support::thermo::{fluid::Refrigerant, model::{IdealRefrigerant, IdealRefrigerantParameters}},
/// };
/// use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};
///
/// let thermo = IdealRefrigerant::new(
///     Refrigerant::named("R134A"),
///     IdealRefrigerantParameters::halocarbon(),
/// )?;
/// let mut vcc = Vcc::new(thermo, OperatingConditions::sandbox())?;
///
/// let cold = vcc.calculate()?.cop_2();
/// vcc.set_evaporator_temperature(ThermodynamicTemperature::new::<degree_celsius>(-20.0))?;
/// let warm = vcc.calculate()?.cop_2();
///
/// assert!(warm > cold);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Vcc<M> {
    thermo: M,
    conditions: OperatingConditions,
    compressor: Compressor,
    config: VccConfig,
    stale: Stale,
    condenser: Option<CondenserPoints>,
    evaporator: Option<EvaporatorPoints>,
    solution: Option<Solution>,
}

impl<M: VccThermoModel> Vcc<M> {
    /// Creates a solver with an isentropic compressor and default search settings.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if `conditions` fail validation.
    pub fn new(thermo: M, conditions: OperatingConditions) -> Result<Self, ParameterError> {
        Self::with_config(thermo, conditions, VccConfig::default())
    }

    /// Creates a solver with explicit search settings.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if `conditions` fail validation.
    pub fn with_config(
        thermo: M,
        conditions: OperatingConditions,
        config: VccConfig,
    ) -> Result<Self, ParameterError> {
        conditions.validate()?;
        Ok(Self {
            thermo,
            conditions,
            compressor: Compressor::default(),
            config,
            stale: Stale::BOTH,
            condenser: None,
            evaporator: None,
            solution: None,
        })
    }

    #[must_use]
    pub fn refrigerant(&self) -> &Refrigerant {
        self.thermo.fluid()
    }

    #[must_use]
    pub fn thermo(&self) -> &M {
        &self.thermo
    }

    #[must_use]
    pub fn conditions(&self) -> &OperatingConditions {
        &self.conditions
    }

    #[must_use]
    pub fn compressor(&self) -> &Compressor {
        &self.compressor
    }

    #[must_use]
    pub fn config(&self) -> &VccConfig {
        &self.config
    }

    /// Sub-solves that the next calculation will rerun.
    #[must_use]
    pub fn stale(&self) -> Stale {
        self.stale
    }

    /// The solution of the last successful calculation, if it is still current.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Replaces all operating conditions.
    ///
    /// Only the sub-solves fed by fields that actually changed are marked.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] for the first invalid field, leaving the
    /// solver unchanged.
    pub fn set_conditions(
        &mut self,
        conditions: OperatingConditions,
    ) -> Result<Stale, ParameterError> {
        conditions.validate()?;
        Ok(self.restore_conditions(conditions))
    }

    /// Replaces the conditions with ones that already passed validation.
    pub(crate) fn restore_conditions(&mut self, conditions: OperatingConditions) -> Stale {
        let scope = Parameter::ALL
            .into_iter()
            .filter(|&p| self.conditions.get(p) != conditions.get(p))
            .fold(Stale::NONE, |scope, p| scope.union(p.scope()));

        if self.conditions != conditions {
            self.conditions = conditions;
            self.invalidate(scope);
        }
        scope
    }

    /// Sets one flat parameter in SI base units.
    ///
    /// [`Parameter::EfficiencyIsentropic`] replaces the compressor with a
    /// fixed-efficiency one, where zero selects isentropic compression.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the value is rejected, leaving the
    /// solver unchanged.
    pub fn set(&mut self, parameter: Parameter, value: f64) -> Result<Stale, ParameterError> {
        self.set_many([(parameter, value)])
    }

    /// Sets several flat parameters at once.
    ///
    /// The update is atomic: if any value is rejected none are applied.
    /// Only values that actually change are marked, so setting the current
    /// values returns [`Stale::NONE`] and keeps the solution.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] for the first rejected value.
    pub fn set_many(
        &mut self,
        values: impl IntoIterator<Item = (Parameter, f64)>,
    ) -> Result<Stale, ParameterError> {
        let mut conditions = self.conditions;
        let mut compressor = None;

        for (parameter, value) in values {
            if parameter == Parameter::EfficiencyIsentropic {
                compressor = Some(
                    Compressor::from_efficiency(Ratio::new::<ratio>(value))
                        .map_err(|source| ParameterError { parameter, source })?,
                );
            } else {
                conditions.set(parameter, value)?;
            }
        }

        let mut scope = self.restore_conditions(conditions);
        if let Some(compressor) = compressor {
            scope = scope.union(self.set_compressor(compressor));
        }
        Ok(scope)
    }

    /// Sets the condenser mean saturation temperature.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the temperature is not positive.
    pub fn set_condenser_temperature(
        &mut self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Stale, ParameterError> {
        self.set(Parameter::CondenserTemperature, temperature.get::<kelvin>())
    }

    /// Sets the evaporator mean saturation temperature.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the temperature is not positive.
    pub fn set_evaporator_temperature(
        &mut self,
        temperature: ThermodynamicTemperature,
    ) -> Result<Stale, ParameterError> {
        self.set(Parameter::EvaporatorTemperature, temperature.get::<kelvin>())
    }

    /// Sets the condenser sub-cooling.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the interval is negative.
    pub fn set_sub_cooling(
        &mut self,
        sub_cooling: TemperatureInterval,
    ) -> Result<Stale, ParameterError> {
        self.set(Parameter::CondenserSubCooling, sub_cooling.get::<delta_kelvin>())
    }

    /// Sets the evaporator super-heat.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the interval is negative.
    pub fn set_super_heat(
        &mut self,
        super_heat: TemperatureInterval,
    ) -> Result<Stale, ParameterError> {
        self.set(Parameter::EvaporatorSuperHeat, super_heat.get::<delta_kelvin>())
    }

    /// Sets the nominal volumetric flow used without a rated compressor.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if the flow is not positive.
    pub fn set_volumetric_flow_rate(&mut self, flow: VolumeRate) -> Result<Stale, ParameterError> {
        self.set(
            Parameter::VolumetricFlowRate,
            flow.get::<cubic_meter_per_second>(),
        )
    }

    /// Replaces the compressor model.
    ///
    /// Setting an identical compressor marks nothing.
    pub fn set_compressor(&mut self, compressor: Compressor) -> Stale {
        if self.compressor == compressor {
            return Stale::NONE;
        }
        self.compressor = compressor;
        self.invalidate(Stale::BOTH);
        Stale::BOTH
    }

    /// Solves the cycle, rerunning only stale sub-solves.
    ///
    /// # Errors
    ///
    /// Returns [`VccError`] if a sub-solve fails. The solver then holds no
    /// solution, and the failed sub-solve stays stale.
    pub fn calculate(&mut self) -> Result<&Solution, VccError> {
        self.calculate_scoped(Stale::NONE)
    }

    /// Solves the cycle, also rerunning the sub-solves marked in `force`.
    ///
    /// # Errors
    ///
    /// See [`Vcc::calculate`].
    pub fn calculate_scoped(&mut self, force: Stale) -> Result<&Solution, VccError> {
        self.solution = None;
        let stale = self.stale.union(force);

        let condenser = match self.condenser {
            Some(points) if !stale.condenser => points,
            _ => {
                // Point 7 inherits the condenser's liquid-line enthalpy.
                self.condenser = None;
                self.evaporator = None;
                self.stale = Stale::BOTH;

                let points =
                    solve::condenser(&self.thermo, &self.conditions, &self.config.condenser)?;
                self.condenser = Some(points);
                self.stale.condenser = false;
                points
            }
        };

        let evaporator = match self.evaporator {
            Some(points) if !stale.evaporator => points,
            _ => {
                self.evaporator = None;
                self.stale.evaporator = true;

                let points = solve::evaporator(
                    &self.thermo,
                    &self.conditions,
                    condenser.liquid_line_outlet.enthalpy,
                    &self.config.evaporator,
                )?;
                self.evaporator = Some(points);
                self.stale.evaporator = false;
                points
            }
        };

        let (rating, compressor_warning) = self.update_compressor();

        let compression = solve::compression(
            &self.thermo,
            &self.conditions,
            &self.compressor,
            &evaporator.outlet,
            &condenser.dew,
        )?;

        let state = CycleState::new([
            compression.suction,
            compression.discharge,
            compression.condenser_inlet,
            condenser.dew,
            condenser.bubble,
            condenser.outlet,
            condenser.liquid_line_outlet,
            evaporator.inlet,
            evaporator.dew,
            evaporator.outlet,
        ]);

        let solution = Solution::new(
            state,
            compression.isentropic_enthalpy,
            self.conditions.volumetric_flow_rate,
            rating,
            compressor_warning,
        );

        debug!(
            refrigerant = self.refrigerant().name(),
            cop_2 = solution.cop_2().get::<ratio>(),
            discharge_c = solution.discharge_temperature().get::<degree_celsius>(),
            "cycle solved"
        );

        Ok(self.solution.insert(solution))
    }

    /// The two-phase envelope of the bound refrigerant in (h, p).
    ///
    /// Uses the refrigerant's resolution hint when it has one.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] if the property model cannot trace the dome.
    pub fn phase_envelope(&self) -> Result<PhaseEnvelope, EnvelopeError>
    where
        M: HasCriticalPoint,
    {
        let defaults = EnvelopeConfig::default();
        let config = EnvelopeConfig {
            resolution: self
                .refrigerant()
                .envelope_resolution()
                .unwrap_or(defaults.resolution),
            ..defaults
        };
        envelope::build(&self.thermo, &config)
    }

    fn invalidate(&mut self, scope: Stale) {
        self.stale = self.stale.union(scope);
        self.solution = None;
    }

    /// Re-rates a surface compressor at the current mean temperatures.
    fn update_compressor(&mut self) -> (Option<Rating>, Option<OutOfRangeError>) {
        let Compressor::Surface(compressor) = &mut self.compressor else {
            return (None, None);
        };

        match compressor.update(
            self.conditions.evaporator.temperature,
            self.conditions.condenser.temperature,
        ) {
            Ok(rating) => (Some(rating), None),
            Err(err) => {
                warn!(%err, "compressor outside its rating surface, keeping the previous rating");
                (Some(compressor.rating()), Some(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::si::{
        available_energy::joule_per_kilogram, f64::Pressure, mass_rate::kilogram_per_second,
        power::watt, pressure::kilopascal,
    };

    use super::test_support::{blend, celsius, halocarbon};
    use crate::support::thermo::model::{IdealRefrigerant, IdealRefrigerantParameters};

    fn delta(value: f64) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(value)
    }

    fn efficiency(value: f64) -> Compressor {
        Compressor::from_efficiency(Ratio::new::<ratio>(value)).unwrap()
    }

    /// 2 kW at −10°C evaporating, rising 20 W per kelvin, and 180 kg/h.
    fn rated_compressor() -> Compressor {
        let row = |constant: f64, linear: f64| {
            let mut row = [0.0; 10];
            row[0] = constant;
            row[1] = linear;
            row
        };

        let surface = PerformanceSurface::new(
            Coefficients {
                capacity: row(6_000.0, 0.0),
                power: row(2_000.0, 20.0),
                mass_flow: row(180.0, 0.0),
                current: row(5.0, 0.0),
            },
            celsius(-40.0)..=celsius(0.0),
            celsius(20.0)..=celsius(50.0),
        )
        .unwrap();
        Compressor::from_surface(surface)
    }

    #[test]
    fn cop_2_matches_the_state_points() {
        let cases = [
            (
                halocarbon(),
                OperatingConditions::new(celsius(-10.0), celsius(40.0)),
            ),
            (blend(4.0), OperatingConditions::sandbox()),
            (
                blend(6.0),
                OperatingConditions::real_system()
                    .with_evaporator_pressure_drop(Pressure::new::<kilopascal>(10.0))
                    .with_condenser_pressure_drop(Pressure::new::<kilopascal>(30.0)),
            ),
        ];

        for (thermo, conditions) in cases {
            let mut vcc = Vcc::new(thermo, conditions).unwrap();
            vcc.set_compressor(efficiency(0.7));
            let solution = vcc.calculate().unwrap();

            let h = |point: Point| solution[point].enthalpy.get::<joule_per_kilogram>();
            let expected = (h(Point::SuctionLineOutlet) - h(Point::EvaporatorInlet))
                / (h(Point::CompressorOutlet) - h(Point::SuctionLineOutlet));
            assert_relative_eq!(solution.cop_2().get::<ratio>(), expected, max_relative = 1e-12);
            assert!(solution.cop_2().get::<ratio>() > 0.0);
        }
    }

    #[test]
    fn measured_low_temperature_system() {
        let mut vcc = Vcc::new(halocarbon(), OperatingConditions::real_system2()).unwrap();
        vcc.set_compressor(efficiency(0.555));
        let solution = vcc.calculate().unwrap();

        let cop_2 = solution.cop_2().get::<ratio>();
        assert!((1.5..=3.5).contains(&cop_2), "cop_2 = {cop_2}");
        assert_relative_eq!(cop_2, 1.955_192_522_697, max_relative = 1e-6);
        assert_relative_eq!(solution.cop_1().get::<ratio>(), cop_2 + 1.0, max_relative = 1e-9);
        assert_relative_eq!(
            solution.isentropic_efficiency().get::<ratio>(),
            0.555,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            solution.discharge_temperature().get::<degree_celsius>(),
            134.873,
            epsilon = 1e-2
        );
    }

    #[test]
    fn pressures_follow_the_losses() {
        let conditions = OperatingConditions::real_system2()
            .with_evaporator_pressure_drop(Pressure::new::<kilopascal>(5.0))
            .with_condenser_pressure_drop(Pressure::new::<kilopascal>(40.0))
            .with_suction_line(Line::new(delta(0.3), Pressure::new::<kilopascal>(2.0)))
            .with_discharge_line(Line::new(delta(4.7), Pressure::new::<kilopascal>(15.0)));
        let mut vcc = Vcc::new(blend(4.0), conditions).unwrap();
        let solution = vcc.calculate().unwrap();

        let p = |point: Point| solution[point].pressure.get::<kilopascal>();
        let drop = |from: Point, to: Point| p(from) - p(to);

        assert_relative_eq!(
            drop(Point::CondenserDew, Point::CondenserBubble),
            40.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            drop(Point::EvaporatorInlet, Point::EvaporatorDew),
            5.0,
            epsilon = 1e-6
        );
        assert_eq!(p(Point::EvaporatorOutlet), p(Point::EvaporatorDew));
        assert_relative_eq!(
            drop(Point::EvaporatorOutlet, Point::SuctionLineOutlet),
            2.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            drop(Point::CompressorOutlet, Point::CondenserDew),
            15.0,
            epsilon = 1e-9
        );
        assert_eq!(p(Point::DischargeLineOutlet), p(Point::CondenserDew));
    }

    #[test]
    fn repeated_calculation_is_idempotent() {
        let mut vcc = Vcc::new(blend(3.0), OperatingConditions::sandbox()).unwrap();
        let first = vcc.calculate().unwrap().clone();
        assert_eq!(vcc.stale(), Stale::NONE);

        let second = vcc.calculate().unwrap();
        assert_eq!(&first, second);
    }

    #[test]
    fn mutators_report_their_scope() {
        let mut vcc = Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap();
        vcc.calculate().unwrap();

        assert_eq!(vcc.set_super_heat(delta(5.0)), Ok(Stale::EVAPORATOR));
        assert_eq!(vcc.stale(), Stale::EVAPORATOR);
        assert!(vcc.solution().is_none());

        // The condenser is reused while only the evaporator is stale.
        let condenser = vcc.condenser;
        vcc.calculate().unwrap();
        assert_eq!(vcc.condenser, condenser);

        assert_eq!(
            vcc.set(Parameter::SuctionLinePressureDrop, 1_000.0),
            Ok(Stale::NONE)
        );
        assert_eq!(vcc.stale(), Stale::NONE);
        assert!(vcc.solution().is_none());

        assert_eq!(vcc.set_sub_cooling(delta(3.0)), Ok(Stale::BOTH));
        assert_eq!(vcc.set_compressor(Compressor::isentropic()), Stale::NONE);
        assert_eq!(vcc.set_compressor(efficiency(0.6)), Stale::BOTH);
    }

    #[test]
    fn unchanged_values_keep_the_solution() {
        let conditions = OperatingConditions::sandbox();
        let mut vcc = Vcc::new(halocarbon(), conditions).unwrap();
        vcc.set_compressor(efficiency(0.7));
        vcc.calculate().unwrap();

        assert_eq!(
            vcc.set_evaporator_temperature(conditions.evaporator.temperature),
            Ok(Stale::NONE)
        );
        assert_eq!(vcc.set_sub_cooling(conditions.condenser.sub_cooling), Ok(Stale::NONE));
        assert_eq!(vcc.set(Parameter::EfficiencyIsentropic, 0.7), Ok(Stale::NONE));
        assert_eq!(
            vcc.set_many([
                (Parameter::SuctionLinePressureDrop, 0.0),
                (Parameter::EvaporatorSuperHeat, 7.0),
            ]),
            Ok(Stale::NONE)
        );
        assert_eq!(vcc.stale(), Stale::NONE);
        assert!(vcc.solution().is_some());

        // Only the field that moved is marked.
        assert_eq!(
            vcc.set_many([
                (Parameter::CondenserSubCooling, 2.0),
                (Parameter::EvaporatorSuperHeat, 9.0),
            ]),
            Ok(Stale::EVAPORATOR)
        );
        assert!(vcc.solution().is_none());
    }

    #[test]
    fn forced_condenser_solve_also_solves_the_evaporator() {
        let mut vcc = Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap();
        let first = vcc.calculate().unwrap().clone();

        let forced = vcc
            .calculate_scoped(Stale {
                condenser: true,
                evaporator: false,
            })
            .unwrap();
        assert_eq!(&first, forced);
        assert_eq!(vcc.stale(), Stale::NONE);
        assert!(vcc.evaporator.is_some());
    }

    #[test]
    fn sub_cooling_moves_the_evaporator_inlet() {
        let mut vcc = Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap();
        let before = vcc.calculate().unwrap()[Point::EvaporatorInlet];

        vcc.set_sub_cooling(delta(6.0)).unwrap();
        let solution = vcc.calculate().unwrap();

        let inlet = solution[Point::EvaporatorInlet];
        assert!(inlet.enthalpy < before.enthalpy);
        assert_relative_eq!(
            inlet.enthalpy.get::<joule_per_kilogram>(),
            solution[Point::LiquidLineOutlet].enthalpy.get::<joule_per_kilogram>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn set_conditions_marks_changed_fields_only() {
        let mut vcc = Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap();
        vcc.calculate().unwrap();

        assert_eq!(vcc.set_conditions(OperatingConditions::sandbox()), Ok(Stale::NONE));
        assert!(vcc.solution().is_some());

        let warmer = OperatingConditions::sandbox().with_super_heat(delta(9.0));
        assert_eq!(vcc.set_conditions(warmer), Ok(Stale::EVAPORATOR));
        assert!(vcc.solution().is_none());
    }

    #[test]
    fn rejected_values_change_nothing() {
        let mut vcc = Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap();
        vcc.calculate().unwrap();
        let before = *vcc.conditions();

        for (parameter, value) in [
            (Parameter::CondenserSubCooling, -1.0),
            (Parameter::EvaporatorTemperature, 0.0),
            (Parameter::CondenserPressureDrop, f64::NAN),
            (Parameter::EfficiencyIsentropic, 1.5),
        ] {
            match vcc.set(parameter, value) {
                Err(err) => assert_eq!(err.parameter, parameter),
                other => panic!("expected {parameter} to be rejected, got {other:?}"),
            }
        }

        let result = vcc.set_many([
            (Parameter::CondenserTemperature, 300.0),
            (Parameter::LiquidLinePressureDrop, -5.0),
        ]);
        assert!(result.is_err());

        assert_eq!(vcc.conditions(), &before);
        assert_eq!(vcc.compressor(), &Compressor::isentropic());
        assert_eq!(vcc.stale(), Stale::NONE);
        assert!(vcc.solution().is_some());
    }

    #[test]
    fn flat_parameters_are_applied() {
        let mut vcc = Vcc::new(halocarbon(), OperatingConditions::sandbox()).unwrap();
        let scope = vcc
            .set_many([
                (Parameter::CondenserTemperature, 310.0),
                (Parameter::LiquidLineTemperatureChange, 1.5),
                (Parameter::EfficiencyIsentropic, 0.65),
            ])
            .unwrap();

        assert_eq!(scope, Stale::BOTH);
        let conditions = vcc.conditions();
        assert_eq!(conditions.get(Parameter::CondenserTemperature), Some(310.0));
        assert_eq!(conditions.get(Parameter::LiquidLineTemperatureChange), Some(1.5));
        assert_eq!(vcc.compressor().efficiency(), Some(Ratio::new::<ratio>(0.65)));
    }

    #[test]
    fn failure_clears_the_solution() {
        let conditions = OperatingConditions::new(celsius(-10.0), celsius(30.0));
        let mut vcc = Vcc::new(halocarbon(), conditions).unwrap();
        vcc.calculate().unwrap();

        // Sub-cooled below the evaporator temperature.
        vcc.set_sub_cooling(delta(75.0)).unwrap();
        match vcc.calculate() {
            Err(VccError::NotTwoPhase { point, .. }) => {
                assert_eq!(point, Point::EvaporatorInlet);
            }
            other => panic!("expected not two-phase, got {other:?}"),
        }
        assert!(vcc.solution().is_none());
        assert!(vcc.stale().evaporator);

        vcc.set_sub_cooling(delta(5.0)).unwrap();
        assert!(vcc.calculate().is_ok());
    }

    #[test]
    fn out_of_range_compressor_keeps_the_previous_rating() {
        let conditions = OperatingConditions::new(celsius(-10.0), celsius(40.0));
        let mut vcc = Vcc::new(halocarbon(), conditions).unwrap();
        vcc.set_compressor(rated_compressor());

        let in_range = vcc.calculate().unwrap().clone();
        let rating = in_range.rating().unwrap();
        assert!(in_range.compressor_warning().is_none());
        assert_relative_eq!(in_range.compressor_power().get::<watt>(), 1_800.0, epsilon = 1e-6);

        vcc.set_evaporator_temperature(celsius(10.0)).unwrap();
        let solution = vcc.calculate().unwrap();

        match solution.compressor_warning() {
            Some(OutOfRangeError { bound, .. }) => assert_eq!(*bound, Bound::EvaporatorMax),
            other => panic!("expected an evaporator range warning, got {other:?}"),
        }
        assert_eq!(solution.rating(), Some(rating));
        assert_relative_eq!(
            solution.mass_flow_rate().get::<kilogram_per_second>(),
            0.05,
            epsilon = 1e-12
        );
    }

    #[test]
    fn phase_envelope_uses_the_refrigerant_hint() {
        let thermo = IdealRefrigerant::new(
            Refrigerant::named("R134A").with_envelope_resolution(12),
            IdealRefrigerantParameters::halocarbon(),
        )
        .unwrap();
        let vcc = Vcc::new(thermo, OperatingConditions::sandbox()).unwrap();

        // Both branches plus the eight points bridging the top.
        let envelope = vcc.phase_envelope().unwrap();
        assert_eq!(envelope.len(), 2 * 12 + 8);
    }

    proptest! {
        #[test]
        fn expansion_is_isenthalpic(
            evaporator in -40.0f64..-5.0,
            condenser in 25.0f64..45.0,
            sub_cooling in 0.0f64..10.0,
            glide in 0.0f64..6.0,
        ) {
            let conditions = OperatingConditions::new(celsius(evaporator), celsius(condenser))
                .with_sub_cooling(delta(sub_cooling));
            let mut vcc = Vcc::new(blend(glide), conditions).unwrap();
            let solution = vcc.calculate().unwrap();

            let h6 = solution[Point::LiquidLineOutlet].enthalpy.get::<joule_per_kilogram>();
            let h7 = solution[Point::EvaporatorInlet].enthalpy.get::<joule_per_kilogram>();
            prop_assert!((h6 - h7).abs() <= 1e-9 * h6.abs().max(1.0));
        }

        #[test]
        fn efficiency_is_recovered(eta in 0.3f64..1.0, super_heat in 0.0f64..10.0) {
            let conditions = OperatingConditions::new(celsius(-20.0), celsius(35.0))
                .with_super_heat(delta(super_heat));
            let mut vcc = Vcc::new(halocarbon(), conditions).unwrap();
            vcc.set(Parameter::EfficiencyIsentropic, eta).unwrap();
            let solution = vcc.calculate().unwrap();

            prop_assert!((solution.isentropic_efficiency().get::<ratio>() - eta).abs() < 1e-9);
        }

        #[test]
        fn heating_cop_exceeds_cooling_by_one(
            evaporator in -40.0f64..-5.0,
            super_heat in 0.0f64..10.0,
            eta in 0.4f64..1.0,
        ) {
            let conditions = OperatingConditions::new(celsius(evaporator), celsius(35.0))
                .with_super_heat(delta(super_heat))
                .with_sub_cooling(delta(2.0));
            let mut vcc = Vcc::new(blend(4.0), conditions).unwrap();
            vcc.set_compressor(efficiency(eta));
            let solution = vcc.calculate().unwrap();

            let excess = solution.cop_1().get::<ratio>() - solution.cop_2().get::<ratio>();
            prop_assert!((excess - 1.0).abs() < 1e-9);
        }
    }
}
