//! Electrical consumption of the batch.

use log::debug;
use uom::si::{energy::kilowatt_hour, f64::Energy, mass::kilogram, power::kilowatt, time::hour};

use crate::{
    models::bioprocess::{
        ProcessConstants,
        equipment::{EquipmentRecord, EquipmentTable, codes},
    },
    support::{
        energy::{OperatingTime, equipment_energy},
        units::SpecificEnthalpy,
    },
};

use super::{BalanceError, ChillerBalance, DryerBalance, Metrics, params};

/// Builds the working equipment table of a run.
///
/// Starts from the recipe's table, replaces the chiller and dryer operating
/// points with their computed duties, and adds the electric sterilization
/// heater when no boiler is used.
///
/// # Errors
///
/// Returns [`BalanceError::MissingEquipment`] if the recipe's table has no
/// chiller or dryer, and [`BalanceError::InvalidParameter`] for an invalid
/// heater rating or sterilization time.
pub fn build_equipment_table(
    constants: &ProcessConstants,
    chiller: &ChillerBalance,
    dryer: &DryerBalance,
) -> Result<EquipmentTable, BalanceError> {
    let mut table = constants.equipment.clone();

    let chiller_time = params::operating_time("chiller.total_time", chiller.operating_time())?;
    update(&mut table, codes::CHILLER, chiller.electrical_energy(), chiller_time)?;

    let dryer_time = params::operating_time("times.drying", dryer.operating_time)?;
    update(&mut table, codes::DRYER, dryer.electrical_energy, dryer_time)?;

    if !constants.use_boiler {
        let power = params::power(
            "utilities.electric_heater_power_kw",
            constants.utilities.electric_heater_power_kw,
        )?;
        let time = params::hold("times.sterilization", constants.times.sterilization)?;
        let heater = EquipmentRecord::new(
            "Electric sterilization heater",
            power.get::<kilowatt>(),
            power.get::<kilowatt>(),
            time.get::<hour>(),
        );
        debug!(
            "{}: {:.3} kWh (no boiler)",
            codes::ELECTRIC_HEATER,
            equipment_energy(power, time).get::<kilowatt_hour>()
        );
        table.insert(codes::ELECTRIC_HEATER, heater);
    }

    Ok(table)
}

fn update(
    table: &mut EquipmentTable,
    code: &str,
    energy: Energy,
    time: OperatingTime,
) -> Result<(), BalanceError> {
    let record = table
        .get_mut(code)
        .ok_or_else(|| BalanceError::MissingEquipment { code: code.into() })?;
    record.set_duty(energy, time);
    debug!(
        "{code}: {:.3} kWh at {:.3} kW",
        record.energy_kwh(),
        record.average_power_kw()
    );
    Ok(())
}

/// Electrical energy of the batch.
///
/// The kWh totals are summed directly over the table's stored kWh values and
/// are the canonical figures; the typed quantities are views of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectricalSummary {
    /// Sum over the equipment table, kWh.
    pub equipment_kwh: f64,

    /// Fixed utilities not itemized in the table, kWh.
    pub utilities_kwh: f64,

    /// `equipment_kwh + utilities_kwh`.
    pub total_kwh: f64,

    /// `total_kwh` per kilogram of final product.
    pub specific_consumption_kwh_per_kg: f64,

    /// Sum over the equipment table.
    pub equipment: Energy,

    /// Fixed utilities not itemized in the table.
    pub utilities: Energy,

    /// `equipment + utilities`.
    pub total: Energy,

    /// Total energy per kilogram of final product.
    pub specific_consumption: SpecificEnthalpy,
}

impl ElectricalSummary {
    /// Totals a working equipment table.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidParameter`] for negative utilities or a
    /// final product mass that is not strictly positive.
    pub fn from_table(
        constants: &ProcessConstants,
        table: &EquipmentTable,
    ) -> Result<Self, BalanceError> {
        let product = params::positive_mass("masses.final_product", constants.masses.final_product)?
            .into_inner();
        let utilities = params::energy(
            "utilities.fixed_energy_kwh",
            constants.utilities.fixed_energy_kwh,
        )?;

        let equipment_kwh = table.total_energy_kwh();
        let utilities_kwh = constants.utilities.fixed_energy_kwh;
        let total_kwh = equipment_kwh + utilities_kwh;
        let total = Energy::new::<kilowatt_hour>(total_kwh);

        Ok(Self {
            equipment_kwh,
            utilities_kwh,
            total_kwh,
            specific_consumption_kwh_per_kg: total_kwh / product.get::<kilogram>(),
            equipment: Energy::new::<kilowatt_hour>(equipment_kwh),
            utilities,
            total,
            specific_consumption: total / product,
        })
    }

    pub(crate) fn record(&self, metrics: &mut Metrics, table: &EquipmentTable) {
        for (code, record) in table.iter() {
            metrics.energy_kwh(&format!("electrical.{code}"), record.energy_kwh());
            metrics.power(&format!("electrical.{code}.average_power"), record.average_power());
            metrics.time(&format!("electrical.{code}.operating_time"), record.operating_time());
        }
        metrics.energy_kwh("electrical.equipment", self.equipment_kwh);
        metrics.energy_kwh("electrical.utilities", self.utilities_kwh);
        metrics.energy_kwh("electrical.total", self.total_kwh);
        metrics.ratio(
            "electrical.specific_consumption_kwh_per_kg",
            self.specific_consumption_kwh_per_kg,
        );
    }
}
