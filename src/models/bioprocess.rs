//! Energy balance of a sophorolipid production batch.
//!
//! The batch runs sterilization, fermentation, crystallization (with a
//! chiller) and drying. [`run`] takes a [`ProcessConstants`] recipe and
//! returns every stage's thermal load, the electrical consumption of the
//! plant, the first-law closure and a set of plausibility checks, collected
//! in [`BatchResults`].
//!
//! [`SophorolipidBatch`] exposes the same computation as a
//! [`twine_core::Model`]. The computational core is in the internal `core`
//! module.
//!
//! ```
//! use sophorolipid_energy::models::bioprocess::{ProcessConstants, run};
//!
//! let results = run(&ProcessConstants::default()).unwrap();
//! assert!(results.validation.chiller.deviation > 0.0);
//! assert!(results.metrics().get("electrical.total_kwh").is_some());
//! ```

pub mod constants;
pub mod equipment;

pub(crate) mod core;
mod error;

pub use constants::{
    BatchMasses, ChillerModel, ChillerSetup, ConfigError, DryerModel, DryerSetup, Efficiencies,
    MaterialProperties, ProcessConstants, ProcessTemperatures, ProcessTimes, StageLossFractions,
    Utilities,
};
pub use self::core::{
    BALANCE_TOLERANCE, BalanceInputs, BalanceOutputs, BalanceResult, BatchResults,
    CHILLER_TOLERANCE, ChemicalEnergy, ChillerBalance, ChillerConsistency, ChillerReconciliation,
    DryerBalance, DryerInput, ENERGY_SUFFIX, ElectricalSummary, HeatLosses, MassBalanceCoherence,
    Metrics, PhysicalRanges, SimpleChillerBalance, SimpleChillerInput, Stage, StageLoad,
    ThermalLoads, ThreePhaseChillerBalance, ThreePhaseChillerInput, UnitSanity, ValidationReport,
    build_equipment_table, dryer_balance, reconcile_chiller, run, simple_chiller_balance, terms,
    three_phase_chiller_balance,
};
pub use error::BalanceError;

use twine_core::Model;

/// A sophorolipid batch as a [`Model`].
///
/// The input is the recipe and the output the full set of results.
#[derive(Debug, Clone, Copy, Default)]
pub struct SophorolipidBatch;

impl Model for SophorolipidBatch {
    type Input = ProcessConstants;
    type Output = BatchResults;
    type Error = BalanceError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        run(input)
    }
}
