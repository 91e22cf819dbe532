use log::debug;
use uom::si::{
    energy::kilowatt_hour,
    f64::{Energy, Power, Ratio},
    ratio::ratio,
};

use crate::{
    models::bioprocess::{
        ProcessConstants,
        equipment::{EquipmentTable, codes},
    },
    support::energy::CoefficientOfPerformance,
};

use super::{BalanceError, Metrics, params};

/// Chiller energy recomputed from the whole process load.
///
/// The chiller's duty-derived entry only covers the crystallization train.
/// Reconciliation charges the chiller with every stage's heat instead and
/// reports how far that is from the entry it replaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChillerReconciliation {
    /// Chiller energy in the table before reconciliation.
    pub tabulated_energy: Energy,

    /// `process heat / COP`.
    pub recalculated_energy: Energy,

    /// Recalculated energy spread over the chiller's listed hours.
    pub recalculated_power: Power,

    /// `|recalculated - tabulated| / tabulated`.
    pub deviation: Ratio,
}

impl ChillerReconciliation {
    #[must_use]
    pub fn deviation(&self) -> f64 {
        self.deviation.get::<ratio>()
    }

    pub(crate) fn record(&self, metrics: &mut Metrics) {
        metrics.energy("reconciliation.tabulated", self.tabulated_energy);
        metrics.energy("reconciliation.recalculated", self.recalculated_energy);
        metrics.power("reconciliation.recalculated_power", self.recalculated_power);
        metrics.ratio("reconciliation.deviation", self.deviation());
    }
}

/// Recomputes the chiller energy and rewrites its table entry.
///
/// # Errors
///
/// Returns [`BalanceError::MissingEquipment`] without a chiller entry,
/// [`BalanceError::ZeroChillerReference`] if the entry's energy is zero, and
/// [`BalanceError::InvalidParameter`] for an invalid COP or an entry with no
/// operating hours.
pub fn reconcile_chiller(
    constants: &ProcessConstants,
    process_heat: Energy,
    table: &mut EquipmentTable,
) -> Result<ChillerReconciliation, BalanceError> {
    let cop: CoefficientOfPerformance = params::cop("chiller.cop", constants.chiller.cop)?;
    let recalculated_energy = process_heat / *cop;

    let record = table
        .get_mut(codes::CHILLER)
        .ok_or_else(|| BalanceError::MissingEquipment {
            code: codes::CHILLER.into(),
        })?;

    let tabulated_energy = record.energy();
    if tabulated_energy.get::<kilowatt_hour>() == 0.0 {
        return Err(BalanceError::ZeroChillerReference);
    }
    let deviation: Ratio =
        ((recalculated_energy - tabulated_energy) / tabulated_energy).abs();

    record
        .set_energy(recalculated_energy)
        .map_err(|source| BalanceError::invalid("equipment.FT-101.hours", source))?;

    debug!(
        "chiller reconciled: {:.3} -> {:.3} kWh ({:.1} % deviation)",
        tabulated_energy.get::<kilowatt_hour>(),
        recalculated_energy.get::<kilowatt_hour>(),
        deviation.get::<ratio>() * 100.0
    );

    Ok(ChillerReconciliation {
        tabulated_energy,
        recalculated_energy,
        recalculated_power: record.average_power(),
        deviation,
    })
}
