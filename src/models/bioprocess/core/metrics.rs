//! Flat view of a run for reporting.
//!
//! Keys are dotted paths with a unit suffix (`_kwh`, `_kw`, `_h`, `_kg`), so
//! a reporting layer can tell energies from the other values without knowing
//! the result types. Unitless values (ratios, flags) carry no suffix; flags
//! are stored as `1.0` or `0.0`.

use indexmap::IndexMap;
use serde::Serialize;
use uom::si::{
    energy::kilowatt_hour,
    f64::{Energy, Mass, Power, Time},
    mass::kilogram,
    power::kilowatt,
    time::hour,
};

/// Suffix of every energy key.
pub const ENERGY_SUFFIX: &str = "_kwh";

/// Insertion-ordered metric map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metrics(IndexMap<String, f64>);

impl Metrics {
    pub(crate) fn energy(&mut self, key: &str, value: Energy) {
        self.insert(key, ENERGY_SUFFIX, value.get::<kilowatt_hour>());
    }

    /// Records a value already held in kWh without a unit round trip.
    pub(crate) fn energy_kwh(&mut self, key: &str, kwh: f64) {
        self.insert(key, ENERGY_SUFFIX, kwh);
    }

    pub(crate) fn power(&mut self, key: &str, value: Power) {
        self.insert(key, "_kw", value.get::<kilowatt>());
    }

    pub(crate) fn time(&mut self, key: &str, value: Time) {
        self.insert(key, "_h", value.get::<hour>());
    }

    pub(crate) fn mass(&mut self, key: &str, value: Mass) {
        self.insert(key, "_kg", value.get::<kilogram>());
    }

    pub(crate) fn ratio(&mut self, key: &str, value: f64) {
        self.insert(key, "", value);
    }

    pub(crate) fn flag(&mut self, key: &str, value: bool) {
        self.insert(key, "", if value { 1.0 } else { 0.0 });
    }

    fn insert(&mut self, key: &str, suffix: &str, value: f64) {
        self.0.insert(format!("{key}{suffix}"), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Every energy value, in kWh.
    pub fn energies(&self) -> impl Iterator<Item = (&str, f64)> {
        self.iter().filter(|(key, _)| key.ends_with(ENERGY_SUFFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_carry_their_unit() {
        let mut metrics = Metrics::default();
        metrics.energy("thermal.total", Energy::new::<kilowatt_hour>(736.0));
        metrics.power("dryer.average_power", Power::new::<kilowatt>(2.7));
        metrics.time("dryer.operating_time", Time::new::<hour>(12.0));
        metrics.mass("chiller.phase_2.mass", Mass::new::<kilogram>(96.93));
        metrics.ratio("balance.error", 0.4);
        metrics.flag("balance.balanced", false);

        let keys: Vec<_> = metrics.iter().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            [
                "thermal.total_kwh",
                "dryer.average_power_kw",
                "dryer.operating_time_h",
                "chiller.phase_2.mass_kg",
                "balance.error",
                "balance.balanced",
            ]
        );
        assert_eq!(metrics.get("balance.balanced"), Some(0.0));
    }

    #[test]
    fn energies_only_lists_kwh_keys() {
        let mut metrics = Metrics::default();
        metrics.energy("electrical.total", Energy::new::<kilowatt_hour>(4700.0));
        metrics.power("electrical.FT-101.average_power", Power::new::<kilowatt>(1.0));
        metrics.ratio("electrical.specific_consumption_kwh_per_kg", 58.0);

        let energies: Vec<_> = metrics.energies().collect();
        assert_eq!(energies.len(), 1);
        assert_eq!(energies[0].0, "electrical.total_kwh");
    }

    #[test]
    fn serializes_as_a_flat_object() {
        let mut metrics = Metrics::default();
        metrics.energy("a", Energy::new::<kilowatt_hour>(1.0));
        metrics.flag("b", true);
        assert_eq!(
            serde_json::to_string(&metrics).unwrap(),
            r#"{"a_kwh":1.0,"b":1.0}"#
        );
    }
}
