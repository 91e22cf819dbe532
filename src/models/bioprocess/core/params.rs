//! Checked conversion of recipe numbers into quantities.
//!
//! Each helper takes the dotted recipe path of the value so a rejected value
//! can be traced back to the recipe field that produced it.

use uom::si::{
    available_energy::{kilojoule_per_kilogram, megajoule_per_kilogram},
    energy::kilowatt_hour,
    f64::{
        Energy, Mass, MolarEnergy, Power, SpecificHeatCapacity, ThermodynamicTemperature, Time,
    },
    mass::kilogram,
    molar_energy::kilojoule_per_mole,
    power::kilowatt,
    specific_heat_capacity::kilojoule_per_kilogram_kelvin,
    thermodynamic_temperature::degree_celsius,
    time::hour,
};

use crate::support::{
    constraint::{Constrained, Constraint, ConstraintError, NonNegative, StrictlyPositive},
    energy::{CoefficientOfPerformance, Efficiency, Fraction, OperatingTime},
    units::SpecificEnthalpy,
};

use super::BalanceError;

fn checked<T, C: Constraint<T>>(parameter: &str, value: T) -> Result<T, BalanceError> {
    Constrained::<T, C>::new(value)
        .map(Constrained::into_inner)
        .map_err(|source| BalanceError::invalid(parameter, source))
}

pub(crate) fn mass(parameter: &str, kg: f64) -> Result<Mass, BalanceError> {
    checked::<_, NonNegative>(parameter, Mass::new::<kilogram>(kg))
}

pub(crate) fn positive_mass(
    parameter: &str,
    kg: f64,
) -> Result<Constrained<Mass, StrictlyPositive>, BalanceError> {
    StrictlyPositive::new(Mass::new::<kilogram>(kg))
        .map_err(|source| BalanceError::invalid(parameter, source))
}

pub(crate) fn temperature(
    parameter: &str,
    celsius: f64,
) -> Result<ThermodynamicTemperature, BalanceError> {
    if celsius.is_finite() {
        Ok(ThermodynamicTemperature::new::<degree_celsius>(celsius))
    } else {
        Err(BalanceError::invalid(parameter, ConstraintError::NotANumber))
    }
}

pub(crate) fn specific_heat(
    parameter: &str,
    kj_per_kg_k: f64,
) -> Result<SpecificHeatCapacity, BalanceError> {
    checked::<_, StrictlyPositive>(
        parameter,
        SpecificHeatCapacity::new::<kilojoule_per_kilogram_kelvin>(kj_per_kg_k),
    )
}

pub(crate) fn enthalpy(parameter: &str, kj_per_kg: f64) -> Result<SpecificEnthalpy, BalanceError> {
    checked::<_, NonNegative>(
        parameter,
        SpecificEnthalpy::new::<kilojoule_per_kilogram>(kj_per_kg),
    )
}

pub(crate) fn heating_value(
    parameter: &str,
    mj_per_kg: f64,
) -> Result<SpecificEnthalpy, BalanceError> {
    checked::<_, NonNegative>(
        parameter,
        SpecificEnthalpy::new::<megajoule_per_kilogram>(mj_per_kg),
    )
}

pub(crate) fn molar_heat(parameter: &str, kj_per_mol: f64) -> Result<MolarEnergy, BalanceError> {
    checked::<_, NonNegative>(parameter, MolarEnergy::new::<kilojoule_per_mole>(kj_per_mol))
}

pub(crate) fn power(parameter: &str, kw: f64) -> Result<Power, BalanceError> {
    checked::<_, NonNegative>(parameter, Power::new::<kilowatt>(kw))
}

pub(crate) fn energy(parameter: &str, kwh: f64) -> Result<Energy, BalanceError> {
    checked::<_, NonNegative>(parameter, Energy::new::<kilowatt_hour>(kwh))
}

/// A window that may be skipped entirely.
pub(crate) fn hold(parameter: &str, hours: f64) -> Result<Time, BalanceError> {
    checked::<_, NonNegative>(parameter, Time::new::<hour>(hours))
}

/// A window something is divided by.
pub(crate) fn window(parameter: &str, hours: f64) -> Result<OperatingTime, BalanceError> {
    operating_time(parameter, Time::new::<hour>(hours))
}

pub(crate) fn operating_time(parameter: &str, time: Time) -> Result<OperatingTime, BalanceError> {
    StrictlyPositive::new(time).map_err(|source| BalanceError::invalid(parameter, source))
}

pub(crate) fn cop(parameter: &str, value: f64) -> Result<CoefficientOfPerformance, BalanceError> {
    CoefficientOfPerformance::new(value).map_err(|source| BalanceError::invalid(parameter, source))
}

pub(crate) fn efficiency(parameter: &str, value: f64) -> Result<Efficiency, BalanceError> {
    Efficiency::new(value).map_err(|source| BalanceError::invalid(parameter, source))
}

pub(crate) fn fraction(parameter: &str, value: f64) -> Result<Fraction, BalanceError> {
    Fraction::new(value).map_err(|source| BalanceError::invalid(parameter, source))
}
