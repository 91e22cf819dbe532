use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N2, P2, Z0},
};

/// Specific enthalpy, J/kg in SI.
///
/// Carries latent heats (crystallization, vaporization) and heating values.
/// Construct it with the [`uom::si::available_energy`] units, e.g.
/// `SpecificEnthalpy::new::<kilojoule_per_kilogram>(2400.0)`.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;
