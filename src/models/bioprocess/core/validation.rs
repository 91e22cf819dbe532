//! Plausibility checks on a completed run.
//!
//! None of these abort the run. A failed check is recorded in the
//! [`ValidationReport`] and logged by the caller.

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::bioprocess::ProcessConstants;

use super::{
    BalanceResult, ChillerReconciliation, ElectricalSummary, Metrics, balance::BALANCE_TOLERANCE,
};

/// Largest acceptable chiller deviation.
pub const CHILLER_TOLERANCE: f64 = 0.15;
/// Plausible process temperatures, °C.
pub const TEMPERATURE_RANGE: (f64, f64) = (-10.0, 150.0);
/// Plausible specific consumption, kWh per kg of product.
pub const SPECIFIC_CONSUMPTION_RANGE: (f64, f64) = (30.0, 250.0);
/// Plausible CO₂ released per kg of product.
pub const CO2_PRODUCT_RATIO_RANGE: (f64, f64) = (0.5, 2.0);
/// Plausible water evaporated in the dryer, kg.
pub const EVAPORATED_WATER_RANGE: (f64, f64) = (10.0, 100.0);
/// Largest acceptable mismatch between mass in and mass out.
pub const MASS_TOLERANCE: f64 = 0.15;
/// Range a batch-level energy in kWh is expected to fall in. Values far
/// outside it usually mean kJ or MJ slipped through.
pub const ENERGY_KWH_RANGE: (f64, f64) = (0.001, 50_000.0);

fn within((low, high): (f64, f64), value: f64) -> bool {
    (low..=high).contains(&value)
}

/// Agreement between the chiller's table entry and the whole-process load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChillerConsistency {
    /// Relative deviation reported by the reconciliation.
    pub deviation: f64,

    /// Whether the deviation is below [`CHILLER_TOLERANCE`].
    pub consistent: bool,
}

/// Range checks on the reported values and the recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicalRanges {
    /// Every reported energy is zero or positive.
    pub energies_non_negative: bool,

    /// Every recipe temperature lies in [`TEMPERATURE_RANGE`].
    pub temperatures_physical: bool,

    /// The specific consumption lies in [`SPECIFIC_CONSUMPTION_RANGE`].
    pub specific_consumption_reasonable: bool,

    /// The closure error is below [`BALANCE_TOLERANCE`].
    pub balance_error_acceptable: bool,
}

/// Coherence of the recipe masses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassBalanceCoherence {
    /// CO₂ released per kg of final product.
    pub co2_product_ratio: f64,

    /// Whether the ratio lies in [`CO2_PRODUCT_RATIO_RANGE`].
    pub co2_product_coherent: bool,

    /// Whether the water evaporated in drying lies in
    /// [`EVAPORATED_WATER_RANGE`].
    pub evaporated_water_coherent: bool,

    /// `|in - out| / in` over the batch masses.
    pub mass_deviation: f64,

    /// Whether the deviation is below [`MASS_TOLERANCE`].
    pub mass_balance_coherent: bool,
}

/// Magnitude check of every reported energy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSanity {
    /// Outcome per metric key.
    pub checks: IndexMap<String, bool>,

    /// Whether every check passed.
    pub all_units_correct: bool,
}

/// Every check of a completed run, grouped by concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub chiller: ChillerConsistency,

    pub physical: PhysicalRanges,

    pub mass_balance: MassBalanceCoherence,

    pub units: UnitSanity,
}

impl ValidationReport {
    /// Names of every failed check.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<String> {
        let flags = [
            ("chiller.consistent", self.chiller.consistent),
            (
                "physical.energies_non_negative",
                self.physical.energies_non_negative,
            ),
            (
                "physical.temperatures_physical",
                self.physical.temperatures_physical,
            ),
            (
                "physical.specific_consumption_reasonable",
                self.physical.specific_consumption_reasonable,
            ),
            (
                "physical.balance_error_acceptable",
                self.physical.balance_error_acceptable,
            ),
            (
                "mass_balance.co2_product_coherent",
                self.mass_balance.co2_product_coherent,
            ),
            (
                "mass_balance.evaporated_water_coherent",
                self.mass_balance.evaporated_water_coherent,
            ),
            (
                "mass_balance.mass_balance_coherent",
                self.mass_balance.mass_balance_coherent,
            ),
        ];

        flags
            .into_iter()
            .filter(|(_, passed)| !passed)
            .map(|(name, _)| name.to_owned())
            .chain(
                self.units
                    .checks
                    .iter()
                    .filter(|(_, passed)| !**passed)
                    .map(|(key, _)| format!("units.{key}")),
            )
            .collect()
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_checks().is_empty()
    }

    pub(crate) fn record(&self, metrics: &mut Metrics) {
        metrics.ratio("validation.chiller.deviation", self.chiller.deviation);
        metrics.flag("validation.chiller.consistent", self.chiller.consistent);
        metrics.flag(
            "validation.physical.energies_non_negative",
            self.physical.energies_non_negative,
        );
        metrics.flag(
            "validation.physical.temperatures_physical",
            self.physical.temperatures_physical,
        );
        metrics.flag(
            "validation.physical.specific_consumption_reasonable",
            self.physical.specific_consumption_reasonable,
        );
        metrics.flag(
            "validation.physical.balance_error_acceptable",
            self.physical.balance_error_acceptable,
        );
        metrics.ratio(
            "validation.mass_balance.co2_product_ratio",
            self.mass_balance.co2_product_ratio,
        );
        metrics.flag(
            "validation.mass_balance.co2_product_coherent",
            self.mass_balance.co2_product_coherent,
        );
        metrics.flag(
            "validation.mass_balance.evaporated_water_coherent",
            self.mass_balance.evaporated_water_coherent,
        );
        metrics.ratio(
            "validation.mass_balance.mass_deviation",
            self.mass_balance.mass_deviation,
        );
        metrics.flag(
            "validation.mass_balance.mass_balance_coherent",
            self.mass_balance.mass_balance_coherent,
        );
        metrics.flag("validation.units.all_units_correct", self.units.all_units_correct);
    }
}

/// Runs every check on a completed run.
///
/// `metrics` must already hold the run's energies.
#[must_use]
pub fn validate(
    constants: &ProcessConstants,
    reconciliation: &ChillerReconciliation,
    electrical: &ElectricalSummary,
    balance: &BalanceResult,
    metrics: &Metrics,
) -> ValidationReport {
    ValidationReport {
        chiller: chiller_consistency(reconciliation),
        physical: physical_ranges(constants, metrics, electrical, balance),
        mass_balance: mass_balance_coherence(constants),
        units: unit_sanity(constants, metrics),
    }
}

#[must_use]
pub fn chiller_consistency(reconciliation: &ChillerReconciliation) -> ChillerConsistency {
    let deviation = reconciliation.deviation();
    ChillerConsistency {
        deviation,
        consistent: deviation < CHILLER_TOLERANCE,
    }
}

/// Range checks over the reported energies, the recipe temperatures, the
/// specific consumption and the closure error.
#[must_use]
pub fn physical_ranges(
    constants: &ProcessConstants,
    metrics: &Metrics,
    electrical: &ElectricalSummary,
    balance: &BalanceResult,
) -> PhysicalRanges {
    PhysicalRanges {
        energies_non_negative: metrics.energies().all(|(_, kwh)| kwh >= 0.0),
        temperatures_physical: constants
            .temperatures
            .labelled()
            .iter()
            .all(|(_, celsius)| within(TEMPERATURE_RANGE, *celsius)),
        specific_consumption_reasonable: within(
            SPECIFIC_CONSUMPTION_RANGE,
            electrical.specific_consumption_kwh_per_kg,
        ),
        balance_error_acceptable: balance.error() < BALANCE_TOLERANCE,
    }
}

/// Consistency of the recipe masses with each other.
#[must_use]
pub fn mass_balance_coherence(constants: &ProcessConstants) -> MassBalanceCoherence {
    let m = &constants.masses;

    let co2_product_ratio = m.co2_produced / m.final_product;
    let total_in = m.total_input();
    let mass_deviation = (total_in - m.total_output()).abs() / total_in;

    MassBalanceCoherence {
        co2_product_ratio,
        co2_product_coherent: within(CO2_PRODUCT_RATIO_RANGE, co2_product_ratio),
        evaporated_water_coherent: within(EVAPORATED_WATER_RANGE, m.water_evaporated_drying),
        mass_deviation,
        mass_balance_coherent: mass_deviation < MASS_TOLERANCE,
    }
}

/// Checks every energy in `metrics` against [`ENERGY_KWH_RANGE`].
///
/// Terms the recipe switches off (steam without a boiler, chemical energy
/// when excluded, useful work) are skipped while they are exactly zero.
#[must_use]
pub fn unit_sanity(constants: &ProcessConstants, metrics: &Metrics) -> UnitSanity {
    let checks: IndexMap<String, bool> = metrics
        .energies()
        .filter(|(key, kwh)| !(*kwh == 0.0 && switched_off(constants, key)))
        .map(|(key, kwh)| (key.to_owned(), within(ENERGY_KWH_RANGE, kwh)))
        .collect();
    let all_units_correct = checks.values().all(|passed| *passed);
    UnitSanity {
        checks,
        all_units_correct,
    }
}

fn switched_off(constants: &ProcessConstants, key: &str) -> bool {
    match key {
        "balance.out.work_kwh" => true,
        "balance.in.steam_kwh" => !constants.use_boiler,
        "balance.in.chemical_kwh"
        | "balance.out.chemical_kwh"
        | "chemical.input_kwh"
        | "chemical.output_kwh"
        | "chemical.net_kwh" => !constants.include_chemical_energy,
        _ => false,
    }
}
