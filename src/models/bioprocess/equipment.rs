//! Electrical consumers of the plant.
//!
//! An [`EquipmentTable`] maps an equipment code to its [`EquipmentRecord`],
//! keeping the order in which items were listed. A record's energy is always
//! its average power times its operating hours; the setters keep it that way.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uom::si::{
    energy::kilowatt_hour,
    f64::{Energy, Power, Time},
    power::kilowatt,
    time::hour,
};

use crate::support::{
    constraint::{ConstraintError, StrictlyPositive},
    energy::OperatingTime,
};

/// Equipment codes the balance reads or rewrites.
pub mod codes {
    /// Crystallization chiller.
    pub const CHILLER: &str = "FT-101";
    /// Electric tray dryer.
    pub const DRYER: &str = "TDR-101";
    /// Main fermenter agitator.
    pub const AGITATOR: &str = "FR-101";
    /// Low-pressure aeration blower.
    pub const BLOWER: &str = "BLW-101";
    /// Transfer pumps.
    pub const TRANSFER_PUMPS: &str = "PUMPS";
    /// Electric sterilization heater, present only without a boiler.
    pub const ELECTRIC_HEATER: &str = "EH-101";
}

/// One electrical consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EquipmentEntry")]
pub struct EquipmentRecord {
    name: String,
    nominal_power_kw: f64,
    average_power_kw: f64,
    hours: f64,
    energy_kwh: f64,
}

/// Serialized form of a record; energy is always derived.
#[derive(Deserialize)]
struct EquipmentEntry {
    name: String,
    nominal_power_kw: f64,
    average_power_kw: f64,
    hours: f64,
}

impl From<EquipmentEntry> for EquipmentRecord {
    fn from(entry: EquipmentEntry) -> Self {
        Self::new(
            entry.name,
            entry.nominal_power_kw,
            entry.average_power_kw,
            entry.hours,
        )
    }
}

impl EquipmentRecord {
    /// Creates a record from nameplate power, average power (kW) and hours.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        nominal_power_kw: f64,
        average_power_kw: f64,
        hours: f64,
    ) -> Self {
        Self {
            name: name.into(),
            nominal_power_kw,
            average_power_kw,
            hours,
            energy_kwh: average_power_kw * hours,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn nominal_power_kw(&self) -> f64 {
        self.nominal_power_kw
    }

    #[must_use]
    pub fn average_power_kw(&self) -> f64 {
        self.average_power_kw
    }

    #[must_use]
    pub fn hours(&self) -> f64 {
        self.hours
    }

    #[must_use]
    pub fn energy_kwh(&self) -> f64 {
        self.energy_kwh
    }

    #[must_use]
    pub fn average_power(&self) -> Power {
        Power::new::<kilowatt>(self.average_power_kw)
    }

    #[must_use]
    pub fn operating_time(&self) -> Time {
        Time::new::<hour>(self.hours)
    }

    #[must_use]
    pub fn energy(&self) -> Energy {
        Energy::new::<kilowatt_hour>(self.energy_kwh)
    }

    /// Replaces the operating point with a computed duty.
    ///
    /// The energy is stored as given and the average power becomes
    /// `energy / time`.
    pub fn set_duty(&mut self, energy: Energy, time: OperatingTime) {
        let time = time.into_inner();
        let average_power: Power = energy / time;
        self.energy_kwh = energy.get::<kilowatt_hour>();
        self.hours = time.get::<hour>();
        self.average_power_kw = average_power.get::<kilowatt>();
    }

    /// Replaces the energy while keeping the listed operating hours.
    ///
    /// # Errors
    ///
    /// Fails if the record has no positive operating hours to spread the
    /// energy over.
    pub fn set_energy(&mut self, energy: Energy) -> Result<(), ConstraintError> {
        let time = StrictlyPositive::new(self.operating_time())?;
        self.set_duty(energy, time);
        Ok(())
    }
}

/// Equipment records keyed by code, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentTable(IndexMap<String, EquipmentRecord>);

impl EquipmentTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference plant: inoculum train, 1 m³ fermenter, downstream
    /// processing and the chiller and dryer at their listed ratings.
    #[must_use]
    pub fn reference() -> Self {
        let mut table = Self::new();
        for (code, name, nominal, average, hours) in [
            ("SFR-101", "Shake-flask shaker", 0.15, 0.15, 24.0),
            ("SFR-102", "Seed fermenter agitator", 1.0, 0.75, 48.0),
            ("V-104", "Oil tank agitator", 0.5, 0.5, 8.0),
            ("DE-101", "Cartridge filter pump", 0.4, 0.4, 2.0),
            (codes::AGITATOR, "Fermenter agitator (1 m³)", 3.0, 3.0, 168.0),
            (codes::BLOWER, "Low-pressure blower", 1.0, 1.0, 168.0),
            (codes::CHILLER, "Chiller (COP 3)", 5.0, 2.0, 168.0),
            ("HX-101", "Cooling water pumps", 2.0, 2.0, 4.0),
            ("V-109", "Decanter", 3.0, 3.0, 3.0),
            ("SC-101", "Screw conveyor", 1.5, 1.5, 1.0),
            ("V-102", "Precipitation mixer", 2.0, 2.0, 12.0),
            ("BCFBD-101", "Basket centrifuge", 6.0, 6.0, 4.0),
            ("DS-101", "Disc-stack centrifuge", 4.0, 4.0, 4.0),
            (codes::DRYER, "Electric dryer", 6.0, 6.0, 12.0),
            (codes::TRANSFER_PUMPS, "Transfer pumps", 5.0, 5.0, 2.0),
        ] {
            table.insert(code, EquipmentRecord::new(name, nominal, average, hours));
        }
        table
    }

    /// Inserts or replaces a record, returning the previous one.
    pub fn insert(
        &mut self,
        code: impl Into<String>,
        record: EquipmentRecord,
    ) -> Option<EquipmentRecord> {
        self.0.insert(code.into(), record)
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&EquipmentRecord> {
        self.0.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut EquipmentRecord> {
        self.0.get_mut(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EquipmentRecord)> {
        self.0.iter().map(|(code, record)| (code.as_str(), record))
    }

    /// Sum of every record's energy in kWh.
    ///
    /// Summed over the stored kWh values, so the total matches the records
    /// exactly.
    #[must_use]
    pub fn total_energy_kwh(&self) -> f64 {
        self.0.values().map(EquipmentRecord::energy_kwh).sum()
    }

    #[must_use]
    pub fn total_energy(&self) -> Energy {
        Energy::new::<kilowatt_hour>(self.total_energy_kwh())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn reference_table_energies() {
        let table = EquipmentTable::reference();

        assert_eq!(table.len(), 15);
        assert_eq!(table.get(codes::AGITATOR).unwrap().energy_kwh(), 504.0);
        assert_eq!(table.get("SFR-102").unwrap().energy_kwh(), 36.0);
        assert_relative_eq!(table.total_energy_kwh(), 1216.9, epsilon = 1e-9);
    }

    #[test]
    fn total_is_the_exact_sum_of_records() {
        let mut table = EquipmentTable::new();
        for (i, (power, hours)) in [(0.1, 0.3), (1.7, 13.0), (2.3, 0.7), (0.15, 24.0), (3.3, 1.1)]
            .into_iter()
            .enumerate()
        {
            table.insert(format!("X-{i}"), EquipmentRecord::new("x", power, power, hours));
        }

        let mut expected = 0.0;
        for (_, record) in table.iter() {
            expected += record.energy_kwh();
        }
        assert_eq!(table.total_energy_kwh(), expected);
    }

    #[test]
    fn every_record_is_power_times_hours() {
        for (code, record) in EquipmentTable::reference().iter() {
            assert_relative_eq!(
                record.energy_kwh(),
                record.average_power_kw() * record.hours(),
                epsilon = 1e-12
            );
            assert!(!code.is_empty());
        }
    }

    #[test]
    fn listing_order_is_kept() {
        let table = EquipmentTable::reference();
        let listed: Vec<_> = table.iter().map(|(code, _)| code).collect();
        assert_eq!(listed.first(), Some(&"SFR-101"));
        assert_eq!(listed.last(), Some(&codes::TRANSFER_PUMPS));
    }

    #[test]
    fn set_duty_derives_average_power() {
        let mut record = EquipmentRecord::new("Chiller", 5.0, 2.0, 168.0);
        let time = StrictlyPositive::new(Time::new::<hour>(13.0)).unwrap();
        record.set_duty(Energy::new::<kilowatt_hour>(4.2), time);

        assert_relative_eq!(record.energy_kwh(), 4.2, epsilon = 1e-12);
        assert_relative_eq!(record.hours(), 13.0, epsilon = 1e-12);
        assert_relative_eq!(record.average_power_kw(), 4.2 / 13.0, epsilon = 1e-12);
        assert_eq!(record.nominal_power_kw(), 5.0);
    }

    #[test]
    fn set_energy_keeps_hours() {
        let mut record = EquipmentRecord::new("Chiller", 5.0, 2.0, 168.0);
        record.set_energy(Energy::new::<kilowatt_hour>(252.0)).unwrap();

        assert_relative_eq!(record.hours(), 168.0, epsilon = 1e-12);
        assert_relative_eq!(record.average_power_kw(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn set_energy_needs_operating_hours() {
        let mut record = EquipmentRecord::new("Idle", 1.0, 0.0, 0.0);
        assert_eq!(
            record.set_energy(Energy::new::<kilowatt_hour>(1.0)),
            Err(ConstraintError::Zero)
        );
    }

    #[test]
    fn deserialized_records_derive_energy() {
        let table: EquipmentTable = serde_json::from_str(
            r#"{ "X-1": { "name": "Mixer", "nominal_power_kw": 2.0, "average_power_kw": 1.5, "hours": 4.0 } }"#,
        )
        .unwrap();
        assert_eq!(table.get("X-1").unwrap().energy_kwh(), 6.0);
    }
}
