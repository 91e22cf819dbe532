use crate::models::bioprocess::equipment::EquipmentTable;

use super::{
    BalanceResult, ChemicalEnergy, ChillerBalance, ChillerReconciliation, DryerBalance,
    ElectricalSummary, HeatLosses, Metrics, ThermalLoads, ValidationReport,
};

/// Everything computed for one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResults {
    pub chiller: ChillerBalance,
    pub dryer: DryerBalance,
    pub thermal: ThermalLoads,
    pub losses: HeatLosses,
    pub chemical: ChemicalEnergy,
    pub reconciliation: ChillerReconciliation,
    /// Working equipment table after the chiller was reconciled.
    pub equipment: EquipmentTable,
    pub electrical: ElectricalSummary,
    pub balance: BalanceResult,
    pub validation: ValidationReport,
    pub(super) metrics: Metrics,
}

impl BatchResults {
    /// Flat, insertion-ordered view of the run for a reporting layer.
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
