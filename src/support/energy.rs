//! Energy arithmetic shared by every balance.
//!
//! These are the first-law building blocks: sensible and latent heat,
//! metabolic heat from CO₂ evolution, electrical energy from power and time,
//! and the conversion of a thermal duty into the electrical demand of a chiller
//! (through its COP) or a dryer (through its efficiency).
//!
//! All functions are pure. They take [`uom`] quantities and the validated
//! wrappers from [`crate::support::constraint`], so a zero COP or a zero
//! operating window cannot reach a division here.
//!
//! # Example
//!
//! ```
//! use sophorolipid_energy::support::energy::sensible_heat;
//! use uom::si::{
//!     energy::{kilojoule, kilowatt_hour},
//!     f64::{Mass, SpecificHeatCapacity, TemperatureInterval},
//!     mass::kilogram,
//!     specific_heat_capacity::kilojoule_per_kilogram_kelvin,
//!     temperature_interval::kelvin,
//! };
//!
//! let q = sensible_heat(
//!     Mass::new::<kilogram>(95.6),
//!     SpecificHeatCapacity::new::<kilojoule_per_kilogram_kelvin>(1.6),
//!     TemperatureInterval::new::<kelvin>(24.0),
//! );
//!
//! assert!((q.get::<kilojoule>() - 3_671.04).abs() < 1e-9);
//! assert!((q.get::<kilowatt_hour>() - 1.019_733).abs() < 1e-6);
//! ```

pub mod conversion;
mod rating;

pub use rating::{CoefficientOfPerformance, Efficiency, Fraction};

use uom::si::{
    f64::{
        AmountOfSubstance, Energy, Mass, MolarEnergy, MolarMass, Power, SpecificHeatCapacity,
        TemperatureInterval, Time,
    },
    molar_mass::gram_per_mole,
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    units::SpecificEnthalpy,
};

/// A strictly positive operating window.
pub type OperatingTime = Constrained<Time, StrictlyPositive>;

/// Molar mass of carbon dioxide, g/mol.
pub const CO2_MOLAR_MASS_G_PER_MOL: f64 = 44.01;

/// Sensible heat `m · cp · |ΔT|`.
///
/// The magnitude of `delta_t` is used; whether the heat is added or removed
/// is up to the caller.
#[must_use]
pub fn sensible_heat(
    mass: Mass,
    cp: SpecificHeatCapacity,
    delta_t: TemperatureInterval,
) -> Energy {
    mass * cp * delta_t.abs()
}

/// Latent heat `m · L`.
///
/// For crystallization, `L` is the heat released per kilogram; a coolant load
/// adds this term rather than subtracting it.
#[must_use]
pub fn latent_heat(mass: Mass, enthalpy: SpecificEnthalpy) -> Energy {
    mass * enthalpy
}

/// Metabolic heat released by aerobic growth.
///
/// Converts the evolved CO₂ mass to moles and assumes one mole of O₂ consumed
/// per mole of CO₂ released (respiratory quotient of one).
#[must_use]
pub fn metabolic_heat(co2: Mass, heat_per_mole_o2: MolarEnergy) -> Energy {
    let moles: AmountOfSubstance = co2 / MolarMass::new::<gram_per_mole>(CO2_MOLAR_MASS_G_PER_MOL);
    moles * heat_per_mole_o2
}

/// Electrical energy drawn by a consumer running at `power` for `time`.
#[must_use]
pub fn equipment_energy(power: Power, time: Time) -> Energy {
    power * time
}

/// Heat leaking to (or from) the surroundings at a constant rate.
#[must_use]
pub fn ambient_loss(power: Power, time: Time) -> Energy {
    power * time
}

/// Share of shaft work that ends up as heat in the process stream.
#[must_use]
pub fn mechanical_dissipation(electrical: Energy, fraction: Fraction) -> Energy {
    electrical * *fraction
}

/// Electrical demand of a chiller removing a given amount of heat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChillerDuty {
    /// Mean electrical power over the operating window.
    pub average_power: Power,
    /// Electrical energy, `heat_removed / COP`.
    pub electrical_energy: Energy,
    /// Heat removed from the process.
    pub heat_removed: Energy,
}

/// Converts the heat a chiller must remove into electrical energy and power.
#[must_use]
pub fn chiller_power_and_energy(
    heat_removed: Energy,
    cop: CoefficientOfPerformance,
    time: OperatingTime,
) -> ChillerDuty {
    let electrical_energy = heat_removed / *cop;
    ChillerDuty {
        average_power: electrical_energy / time.into_inner(),
        electrical_energy,
        heat_removed,
    }
}

/// Electrical demand of a heater or dryer supplying a given amount of heat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryerDuty {
    /// Mean electrical power over the operating window.
    pub average_power: Power,
    /// Electrical energy, `useful_heat / efficiency`.
    pub electrical_energy: Energy,
    /// Heat delivered to the product and the surroundings.
    pub useful_heat: Energy,
}

/// Converts the heat a dryer must supply into electrical energy and power.
#[must_use]
pub fn dryer_power_and_energy(
    useful_heat: Energy,
    efficiency: Efficiency,
    time: OperatingTime,
) -> DryerDuty {
    let electrical_energy = useful_heat / *efficiency;
    DryerDuty {
        average_power: electrical_energy / time.into_inner(),
        electrical_energy,
        useful_heat,
    }
}
