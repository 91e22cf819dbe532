//! Dryer (TDR-101) duty.

use log::debug;
use uom::{
    ConstZero,
    si::{
        energy::kilowatt_hour,
        f64::{Energy, Mass, Power, SpecificHeatCapacity, ThermodynamicTemperature, Time},
    },
};

use crate::{
    models::bioprocess::{DryerModel, ProcessConstants},
    support::{
        energy::{
            Efficiency, OperatingTime, ambient_loss, dryer_power_and_energy, latent_heat,
            sensible_heat,
        },
        units::{SpecificEnthalpy, TemperatureDifference},
    },
};

use super::{BalanceError, Metrics, params};

/// Inputs shared by both dryer models.
///
/// The water-only model ignores the crystal and ethanol fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryerInput {
    /// Centrifuged crystals entering the dryer.
    pub wet_crystals: Mass,

    /// Water to evaporate.
    pub water: Mass,

    /// Wash ethanol to evaporate.
    pub ethanol: Mass,

    pub cp_crystals: SpecificHeatCapacity,

    pub cp_water: SpecificHeatCapacity,

    pub cp_ethanol: SpecificHeatCapacity,

    /// Temperature the crystals arrive at.
    pub inlet_temperature: ThermodynamicTemperature,

    /// Dryer operating temperature.
    pub drying_temperature: ThermodynamicTemperature,

    /// Latent heat of water at the drying temperature.
    pub water_vaporization: SpecificEnthalpy,

    /// Latent heat of the wash ethanol.
    pub ethanol_vaporization: SpecificEnthalpy,

    /// Heat lost by the dryer casing.
    pub ambient_loss: Power,

    /// Dryer operating window.
    pub drying_time: OperatingTime,

    /// Electric-to-heat efficiency.
    pub efficiency: Efficiency,
}

impl DryerInput {
    /// Reads the dryer inputs from a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidParameter`] for any out-of-range value.
    pub fn from_constants(constants: &ProcessConstants) -> Result<Self, BalanceError> {
        let p = &constants.properties;
        let d = &constants.dryer;
        Ok(Self {
            wet_crystals: params::mass(
                "masses.crystals_after_centrifugation",
                constants.masses.crystals_after_centrifugation,
            )?,
            water: params::mass("dryer.water_to_evaporate", d.water_to_evaporate)?,
            ethanol: params::mass("dryer.ethanol_to_evaporate", d.ethanol_to_evaporate)?,
            cp_crystals: params::specific_heat("properties.cp_sophorolipid", p.cp_sophorolipid)?,
            cp_water: params::specific_heat("properties.cp_water", p.cp_water)?,
            cp_ethanol: params::specific_heat("properties.cp_wash_ethanol", p.cp_wash_ethanol)?,
            inlet_temperature: params::temperature(
                "temperatures.crystallization",
                constants.temperatures.crystallization,
            )?,
            drying_temperature: params::temperature(
                "temperatures.drying",
                constants.temperatures.drying,
            )?,
            water_vaporization: params::enthalpy(
                "properties.latent_vaporization_water_45c",
                p.latent_vaporization_water_45c,
            )?,
            ethanol_vaporization: params::enthalpy(
                "properties.latent_vaporization_wash_ethanol",
                p.latent_vaporization_wash_ethanol,
            )?,
            ambient_loss: params::power("dryer.ambient_loss_kw", d.ambient_loss_kw)?,
            drying_time: params::window("times.drying", constants.times.drying)?,
            efficiency: params::efficiency("dryer.efficiency", d.efficiency)?,
        })
    }
}

/// Heat terms of a dryer balance.
///
/// Terms a model does not account for are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryerBalance {
    /// Model the terms were computed with.
    pub model: DryerModel,

    /// Heat to bring the crystals to drying temperature.
    pub crystal_sensible: Energy,

    /// Heat to bring the water to drying temperature.
    pub water_sensible: Energy,

    /// Heat to evaporate the water.
    pub water_latent: Energy,

    /// Heat to bring the ethanol to drying temperature.
    pub ethanol_sensible: Energy,

    /// Heat to evaporate the ethanol.
    pub ethanol_latent: Energy,

    /// Sum of the sensible and latent terms.
    pub useful_heat: Energy,

    /// Casing losses over the drying time.
    pub ambient_losses: Energy,

    /// `useful_heat + ambient_losses`.
    pub total_heat: Energy,

    /// `total_heat / efficiency`.
    pub electrical_energy: Energy,

    /// Electrical energy over the drying time.
    pub average_power: Power,

    /// Drying time.
    pub operating_time: Time,
}

impl DryerBalance {
    /// Runs the dryer model selected in the recipe.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidParameter`] for any out-of-range value.
    pub fn from_constants(constants: &ProcessConstants) -> Result<Self, BalanceError> {
        let input = DryerInput::from_constants(constants)?;
        let balance = dryer_balance(&input, constants.dryer_model);
        debug!(
            "dryer ({:?}): {:.3} kWh heat, {:.3} kWh electrical",
            balance.model,
            balance.total_heat.get::<kilowatt_hour>(),
            balance.electrical_energy.get::<kilowatt_hour>(),
        );
        Ok(balance)
    }

    pub(crate) fn record(&self, metrics: &mut Metrics) {
        if self.model == DryerModel::WaterAndEthanol {
            metrics.energy("dryer.crystal_sensible", self.crystal_sensible);
        }
        metrics.energy("dryer.water_sensible", self.water_sensible);
        metrics.energy("dryer.water_latent", self.water_latent);
        if self.model == DryerModel::WaterAndEthanol {
            metrics.energy("dryer.ethanol_sensible", self.ethanol_sensible);
            metrics.energy("dryer.ethanol_latent", self.ethanol_latent);
        }
        metrics.energy("dryer.useful_heat", self.useful_heat);
        metrics.energy("dryer.ambient_losses", self.ambient_losses);
        metrics.energy("dryer.total_heat", self.total_heat);
        metrics.energy("dryer.electrical", self.electrical_energy);
        metrics.power("dryer.average_power", self.average_power);
        metrics.time("dryer.operating_time", self.operating_time);
    }
}

/// Computes the dryer balance with the given model.
#[must_use]
pub fn dryer_balance(input: &DryerInput, model: DryerModel) -> DryerBalance {
    let heating = input.drying_temperature.minus(input.inlet_temperature);

    let water_sensible = sensible_heat(input.water, input.cp_water, heating);
    let water_latent = latent_heat(input.water, input.water_vaporization);

    let (crystal_sensible, ethanol_sensible, ethanol_latent) = match model {
        DryerModel::WaterOnly => (Energy::ZERO, Energy::ZERO, Energy::ZERO),
        DryerModel::WaterAndEthanol => (
            sensible_heat(input.wet_crystals, input.cp_crystals, heating),
            sensible_heat(input.ethanol, input.cp_ethanol, heating),
            latent_heat(input.ethanol, input.ethanol_vaporization),
        ),
    };

    let useful_heat =
        crystal_sensible + water_sensible + water_latent + ethanol_sensible + ethanol_latent;
    let drying_time = *input.drying_time.as_ref();
    let ambient_losses = ambient_loss(input.ambient_loss, drying_time);
    let total_heat = useful_heat + ambient_losses;

    let duty = dryer_power_and_energy(total_heat, input.efficiency, input.drying_time);

    DryerBalance {
        model,
        crystal_sensible,
        water_sensible,
        water_latent,
        ethanol_sensible,
        ethanol_latent,
        useful_heat,
        ambient_losses,
        total_heat,
        electrical_energy: duty.electrical_energy,
        average_power: duty.average_power,
        operating_time: drying_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{energy::kilojoule, power::kilowatt};

    fn reference_input() -> DryerInput {
        DryerInput::from_constants(&ProcessConstants::default()).unwrap()
    }

    #[test]
    fn water_only_model() {
        let b = dryer_balance(&reference_input(), DryerModel::WaterOnly);

        // 1 kg × 4.18 × 41 K, 1 kg × 2400 kJ/kg, 2 kW over 12 h.
        assert_relative_eq!(b.water_sensible.get::<kilojoule>(), 171.38, epsilon = 1e-9);
        assert_relative_eq!(b.water_latent.get::<kilojoule>(), 2_400.0, epsilon = 1e-9);
        assert_eq!(b.crystal_sensible.get::<kilojoule>(), 0.0);
        assert_eq!(b.ethanol_latent.get::<kilojoule>(), 0.0);
        assert_relative_eq!(b.ambient_losses.get::<kilojoule>(), 86_400.0, epsilon = 1e-9);
        assert_relative_eq!(b.total_heat.get::<kilojoule>(), 88_971.38, epsilon = 1e-9);
        assert_relative_eq!(
            b.electrical_energy.get::<kilowatt_hour>(),
            88_971.38 / 0.8 / 3600.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn water_and_ethanol_model() {
        let b = dryer_balance(&reference_input(), DryerModel::WaterAndEthanol);

        let crystals = 81.8 * 1.6 * 41.0;
        let ethanol_sensible = 1.5 * 3.0 * 41.0;
        let useful = crystals + 171.38 + 2_400.0 + ethanol_sensible + 1_500.0;

        assert_relative_eq!(b.crystal_sensible.get::<kilojoule>(), crystals, epsilon = 1e-9);
        assert_relative_eq!(b.ethanol_sensible.get::<kilojoule>(), ethanol_sensible, epsilon = 1e-9);
        assert_relative_eq!(b.ethanol_latent.get::<kilojoule>(), 1_500.0, epsilon = 1e-9);
        assert_relative_eq!(b.useful_heat.get::<kilojoule>(), useful, epsilon = 1e-9);
        assert_relative_eq!(
            b.total_heat.get::<kilojoule>(),
            useful + 86_400.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            b.average_power.get::<kilowatt>(),
            b.electrical_energy.get::<kilowatt_hour>() / 12.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn models_are_selected_by_the_recipe() {
        let mut constants = ProcessConstants::default();
        let full = DryerBalance::from_constants(&constants).unwrap();
        constants.dryer_model = DryerModel::WaterOnly;
        let water_only = DryerBalance::from_constants(&constants).unwrap();

        assert_eq!(full.model, DryerModel::WaterAndEthanol);
        assert_eq!(water_only.model, DryerModel::WaterOnly);
        assert!(full.electrical_energy > water_only.electrical_energy);
    }

    #[test]
    fn zero_efficiency_is_rejected() {
        let mut constants = ProcessConstants::default();
        constants.dryer.efficiency = 0.0;
        let err = DryerBalance::from_constants(&constants).unwrap_err();
        assert!(matches!(
            err,
            BalanceError::InvalidParameter { ref parameter, .. } if parameter == "dryer.efficiency"
        ));
    }

    #[test]
    fn water_only_metrics_omit_unused_terms() {
        let mut constants = ProcessConstants::default();
        constants.dryer_model = DryerModel::WaterOnly;
        let mut metrics = Metrics::default();
        DryerBalance::from_constants(&constants)
            .unwrap()
            .record(&mut metrics);

        assert!(metrics.get("dryer.water_latent_kwh").is_some());
        assert!(metrics.get("dryer.ethanol_latent_kwh").is_none());
    }
}
