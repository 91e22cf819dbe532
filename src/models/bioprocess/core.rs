//! Batch energy balance.
//!
//! A run goes through the stages in a fixed order:
//!
//! 1. Chiller and dryer duties, each with the model the recipe selects.
//! 2. The working equipment table: the recipe's table with those duties
//!    written in, plus the electric heater when there is no boiler.
//! 3. Stage thermal loads, with mechanical dissipation read from the working
//!    table, and the stage heat losses.
//! 4. Chemical energy, if the recipe includes it.
//! 5. Chiller reconciliation against the whole process load, which rewrites
//!    the chiller entry of the working table.
//! 6. Electrical totals of the reconciled table.
//! 7. Balance closure and validation.

mod balance;
mod chemical;
mod chiller;
mod dryer;
mod electrical;
mod metrics;
mod params;
mod reconcile;
mod results;
mod stages;
mod validation;

pub use balance::{BALANCE_TOLERANCE, BalanceInputs, BalanceOutputs, BalanceResult};
pub use chemical::ChemicalEnergy;
pub use chiller::{
    ChillerBalance, SimpleChillerBalance, SimpleChillerInput, ThreePhaseChillerBalance,
    ThreePhaseChillerInput, simple_chiller_balance, three_phase_chiller_balance,
};
pub use dryer::{DryerBalance, DryerInput, dryer_balance};
pub use electrical::{ElectricalSummary, build_equipment_table};
pub use metrics::{ENERGY_SUFFIX, Metrics};
pub use reconcile::{ChillerReconciliation, reconcile_chiller};
pub use results::BatchResults;
pub use stages::{HeatLosses, Stage, StageLoad, ThermalLoads, terms};
pub use validation::{
    CHILLER_TOLERANCE, ChillerConsistency, MassBalanceCoherence, PhysicalRanges, UnitSanity,
    ValidationReport,
};

use log::{debug, warn};
use uom::{ConstZero, si::energy::kilowatt_hour, si::f64::Energy};

use super::{BalanceError, ProcessConstants};

/// Runs the full balance for one batch.
///
/// # Errors
///
/// Returns a [`BalanceError`] if the recipe holds an invalid value, if the
/// equipment table lacks the chiller, dryer or a dissipating consumer, or if
/// the closure or the chiller deviation is undefined. Failed validation
/// checks are not errors.
pub fn run(constants: &ProcessConstants) -> Result<BatchResults, BalanceError> {
    let chiller = ChillerBalance::from_constants(constants)?;
    let dryer = DryerBalance::from_constants(constants)?;
    let mut equipment = build_equipment_table(constants, &chiller, &dryer)?;

    let thermal = ThermalLoads::compute(constants, &equipment)?;
    let losses = HeatLosses::compute(constants, &thermal)?;
    let chemical = ChemicalEnergy::from_constants(constants)?;

    let reconciliation = reconcile_chiller(constants, thermal.total(), &mut equipment)?;
    let electrical = ElectricalSummary::from_table(constants, &equipment)?;

    let steam = if constants.use_boiler {
        let boiler = params::efficiency("efficiencies.boiler", constants.efficiencies.boiler)?;
        balance::steam_input(thermal.sterilization_heating_duty(), boiler)
    } else {
        Energy::ZERO
    };
    let balance = balance::close_balance(
        electrical.total,
        steam,
        &chemical,
        thermal.total(),
        losses.total(),
    )?;
    debug!(
        "balance: {:.3} kWh in, {:.3} kWh out, {:.2} % error",
        balance.inputs.total().get::<kilowatt_hour>(),
        balance.outputs.total().get::<kilowatt_hour>(),
        balance.error() * 100.0
    );

    let mut metrics = Metrics::default();
    chiller.record(&mut metrics);
    dryer.record(&mut metrics);
    thermal.record(&mut metrics);
    losses.record(&mut metrics);
    chemical.record(&mut metrics);
    reconciliation.record(&mut metrics);
    electrical.record(&mut metrics, &equipment);
    balance.record(&mut metrics);

    let validation =
        validation::validate(constants, &reconciliation, &electrical, &balance, &metrics);
    validation.record(&mut metrics);
    for check in validation.failed_checks() {
        warn!("validation check failed: {check}");
    }

    Ok(BatchResults {
        chiller,
        dryer,
        thermal,
        losses,
        chemical,
        reconciliation,
        equipment,
        electrical,
        balance,
        validation,
        metrics,
    })
}
