use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P1, P2, Z0},
};

/// Specific gas constant, J/kg·K in SI.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Specific entropy, J/kg·K in SI.
pub type SpecificEntropy = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Energy per unit volume, J/m³ in SI.
///
/// Shares the dimension of pressure, so values are read with pressure units
/// (one kilopascal is one kilojoule per cubic meter).
pub type VolumetricEnergy = Quantity<ISQ<N1, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;
