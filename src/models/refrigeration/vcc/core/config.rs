use uom::si::{f64::Pressure, pressure::pascal};

/// Settings for one mean-pressure search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of correction steps before the search gives up.
    pub max_iters: usize,

    /// The search stops once a pressure correction is no larger than this.
    pub pressure_tol: Pressure,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            pressure_tol: Pressure::new::<pascal>(1.0),
        }
    }
}

/// Solver configuration for a vapor-compression cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VccConfig {
    /// Mean-pressure search in the condenser.
    pub condenser: SearchConfig,

    /// Mean-pressure search in the evaporator.
    pub evaporator: SearchConfig,
}
