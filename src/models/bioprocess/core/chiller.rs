//! Chiller (FT-101) duty for the crystallization train.
//!
//! Two decompositions of the same cooling job are supported, selected by
//! [`ChillerModel`]. They give different answers from the same recipe:
//!
//! - [`ChillerModel::Simple`] treats the crystallizing product as the only
//!   mass in the vessel and splits the run into cooling + crystallization and
//!   maintenance.
//! - [`ChillerModel::ThreePhase`] tracks product, biomass and acid solution
//!   during cooling, a crystallization hold, and a cold ethanol wash.
//!
//! In both, the heat released by crystallization is added to the load the
//! chiller has to remove.

use log::debug;
use uom::si::{
    energy::kilowatt_hour,
    f64::{Energy, Mass, Power, SpecificHeatCapacity, ThermodynamicTemperature, Time},
};

use crate::{
    models::bioprocess::{ChillerModel, ProcessConstants},
    support::{
        energy::{
            CoefficientOfPerformance, OperatingTime, ambient_loss, chiller_power_and_energy,
            latent_heat, sensible_heat,
        },
        units::{SpecificEnthalpy, TemperatureDifference},
    },
};

use super::{BalanceError, Metrics, params};

/// Inputs of the single-product chiller balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleChillerInput {
    /// Precipitated crystals cooled as one homogeneous mass.
    pub product: Mass,

    /// Specific heat of the crystals.
    pub cp_product: SpecificHeatCapacity,

    /// Temperature the product arrives at.
    pub initial_temperature: ThermodynamicTemperature,

    /// Crystallization temperature.
    pub final_temperature: ThermodynamicTemperature,

    /// Heat released per kg crystallized.
    pub crystallization_enthalpy: SpecificEnthalpy,

    /// Heat gained from the surroundings while cold.
    pub ambient_loss: Power,

    /// Active cooling window.
    pub cooling_time: OperatingTime,

    /// Time held at crystallization temperature.
    pub maintenance_time: Time,

    /// Chiller coefficient of performance.
    pub cop: CoefficientOfPerformance,
}

impl SimpleChillerInput {
    /// Reads the simple chiller inputs from a recipe.
    ///
    /// The product is the precipitated crystal mass, and maintenance covers
    /// both the crystallization and the wash holds.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidParameter`] for any out-of-range value.
    pub fn from_constants(constants: &ProcessConstants) -> Result<Self, BalanceError> {
        let c = &constants.chiller;
        Ok(Self {
            product: params::mass(
                "masses.crystals_after_precipitation",
                constants.masses.crystals_after_precipitation,
            )?,
            cp_product: params::specific_heat(
                "properties.cp_sophorolipid",
                constants.properties.cp_sophorolipid,
            )?,
            initial_temperature: params::temperature(
                "temperatures.fermentation",
                constants.temperatures.fermentation,
            )?,
            final_temperature: params::temperature(
                "temperatures.crystallization",
                constants.temperatures.crystallization,
            )?,
            crystallization_enthalpy: params::enthalpy(
                "properties.latent_crystallization",
                constants.properties.latent_crystallization,
            )?,
            ambient_loss: params::power("chiller.ambient_loss_kw", c.ambient_loss_kw)?,
            cooling_time: params::window("chiller.cooling_time", c.cooling_time)?,
            maintenance_time: params::hold(
                "chiller.crystallization_hold",
                c.crystallization_hold,
            )? + params::hold("chiller.wash_hold", c.wash_hold)?,
            cop: params::cop("chiller.cop", c.cop)?,
        })
    }
}

/// Result of the single-product chiller balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleChillerBalance {
    /// Sensible heat removed from the product.
    pub product_sensible: Energy,

    /// Crystallization heat removed.
    pub crystallization_latent: Energy,

    /// Ambient gain during cooling.
    pub cooling_losses: Energy,

    /// Ambient gain during maintenance.
    pub maintenance_losses: Energy,

    /// Cooling and crystallization.
    pub phase_1: Energy,

    /// Maintenance at crystallization temperature.
    pub phase_2: Energy,

    /// `phase_1 + phase_2`.
    pub total_heat: Energy,

    /// `total_heat / COP`.
    pub electrical_energy: Energy,

    /// Electrical energy over the operating time.
    pub average_power: Power,

    /// Cooling plus maintenance.
    pub operating_time: Time,
}

/// Computes the single-product chiller balance.
///
/// # Errors
///
/// Returns [`BalanceError::InvalidParameter`] if the maintenance window is
/// negative or not a number.
pub fn simple_chiller_balance(
    input: &SimpleChillerInput,
) -> Result<SimpleChillerBalance, BalanceError> {
    let delta_t = input
        .initial_temperature
        .minus(input.final_temperature);

    let product_sensible = sensible_heat(input.product, input.cp_product, delta_t);
    let crystallization_latent = latent_heat(input.product, input.crystallization_enthalpy);
    let cooling_losses = ambient_loss(input.ambient_loss, *input.cooling_time.as_ref());
    let maintenance_losses = ambient_loss(input.ambient_loss, input.maintenance_time);

    let phase_1 = product_sensible + crystallization_latent + cooling_losses;
    let phase_2 = maintenance_losses;
    let total_heat = phase_1 + phase_2;

    let operating_time = params::operating_time(
        "chiller.total_time",
        *input.cooling_time.as_ref() + input.maintenance_time,
    )?;
    let duty = chiller_power_and_energy(total_heat, input.cop, operating_time);

    Ok(SimpleChillerBalance {
        product_sensible,
        crystallization_latent,
        cooling_losses,
        maintenance_losses,
        phase_1,
        phase_2,
        total_heat,
        electrical_energy: duty.electrical_energy,
        average_power: duty.average_power,
        operating_time: operating_time.into_inner(),
    })
}

/// Inputs of the three-phase chiller balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePhaseChillerInput {
    /// Crude product entering the chiller.
    pub product: Mass,

    /// Biomass cooled together with the product.
    pub biomass: Mass,

    /// Acid solution cooled together with the product.
    pub acid_solution: Mass,

    /// Biomass left in the vessel for the holds.
    pub residual_biomass: Mass,

    /// Acid solution left in the vessel for the holds.
    pub residual_acid: Mass,

    /// Crystals held through the crystallization hold.
    pub product_to_crystallize: Mass,

    /// Ethanol added for the cold wash.
    pub wash_solvent: Mass,

    pub cp_product: SpecificHeatCapacity,

    pub cp_biomass: SpecificHeatCapacity,

    pub cp_acid_solution: SpecificHeatCapacity,

    /// Specific heat of the wash ethanol.
    pub cp_wash_solvent: SpecificHeatCapacity,

    /// Temperature the batch arrives at.
    pub initial_temperature: ThermodynamicTemperature,

    /// Crystallization temperature.
    pub final_temperature: ThermodynamicTemperature,

    /// Temperature at which the wash solvent arrives.
    pub ambient_temperature: ThermodynamicTemperature,

    /// Heat released per kg crystallized.
    pub crystallization_enthalpy: SpecificEnthalpy,

    /// Heat gained from the surroundings while cold.
    pub ambient_loss: Power,

    /// Active cooling window.
    pub cooling_time: OperatingTime,

    pub crystallization_hold: Time,

    /// Cold wash hold.
    pub wash_hold: Time,

    pub cop: CoefficientOfPerformance,
}

impl ThreePhaseChillerInput {
    /// Reads the three-phase chiller inputs from a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidParameter`] for any out-of-range value.
    pub fn from_constants(constants: &ProcessConstants) -> Result<Self, BalanceError> {
        let m = &constants.masses;
        let p = &constants.properties;
        let t = &constants.temperatures;
        let c = &constants.chiller;
        Ok(Self {
            product: params::mass("masses.crude_product", m.crude_product)?,
            biomass: params::mass("masses.final_biomass", m.final_biomass)?,
            acid_solution: params::mass("masses.hydrochloric_acid", m.hydrochloric_acid)?,
            residual_biomass: params::mass("chiller.residual_biomass", c.residual_biomass)?,
            residual_acid: params::mass("chiller.residual_acid", c.residual_acid)?,
            product_to_crystallize: params::mass(
                "masses.crystals_after_precipitation",
                m.crystals_after_precipitation,
            )?,
            wash_solvent: params::mass("masses.ethanol", m.ethanol)?,
            cp_product: params::specific_heat("properties.cp_sophorolipid", p.cp_sophorolipid)?,
            cp_biomass: params::specific_heat("properties.cp_biomass", p.cp_biomass)?,
            cp_acid_solution: params::specific_heat(
                "properties.cp_acid_solution",
                p.cp_acid_solution,
            )?,
            cp_wash_solvent: params::specific_heat("properties.cp_wash_ethanol", p.cp_wash_ethanol)?,
            initial_temperature: params::temperature("temperatures.fermentation", t.fermentation)?,
            final_temperature: params::temperature(
                "temperatures.crystallization",
                t.crystallization,
            )?,
            ambient_temperature: params::temperature("temperatures.ambient", t.ambient)?,
            crystallization_enthalpy: params::enthalpy(
                "properties.latent_crystallization",
                p.latent_crystallization,
            )?,
            ambient_loss: params::power("chiller.ambient_loss_kw", c.ambient_loss_kw)?,
            cooling_time: params::window("chiller.cooling_time", c.cooling_time)?,
            crystallization_hold: params::hold(
                "chiller.crystallization_hold",
                c.crystallization_hold,
            )?,
            wash_hold: params::hold("chiller.wash_hold", c.wash_hold)?,
            cop: params::cop("chiller.cop", c.cop)?,
        })
    }
}

/// Result of the three-phase chiller balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePhaseChillerBalance {
    /// Sensible heat removed from the crude product.
    pub product_sensible: Energy,

    /// Crystallization heat removed.
    pub crystallization_latent: Energy,

    /// Sensible heat removed from the biomass.
    pub biomass_sensible: Energy,

    /// Sensible heat removed from the acid solution.
    pub acid_sensible: Energy,

    /// Sensible heat removed from the wash solvent.
    pub wash_sensible: Energy,

    /// Ambient gain during cooling.
    pub cooling_losses: Energy,

    /// Ambient gain during the crystallization hold.
    pub hold_losses: Energy,

    /// Ambient gain during the wash.
    pub wash_losses: Energy,

    /// Cooling and crystallization.
    pub phase_1: Energy,

    /// Crystallization hold.
    pub phase_2: Energy,

    /// Cold wash.
    pub phase_3: Energy,

    /// Sum of the three phases.
    pub total_heat: Energy,

    /// `total_heat / COP`.
    pub electrical_energy: Energy,

    /// Electrical energy over the operating time.
    pub average_power: Power,

    /// Sum of the three windows.
    pub operating_time: Time,

    /// Mass held cold during the crystallization hold.
    pub phase_2_mass: Mass,

    /// Mass held cold during the wash.
    pub phase_3_mass: Mass,
}

impl ThreePhaseChillerBalance {
    #[must_use]
    pub fn ambient_losses(&self) -> Energy {
        self.cooling_losses + self.hold_losses + self.wash_losses
    }
}

/// Computes the three-phase chiller balance.
///
/// # Errors
///
/// Returns [`BalanceError::InvalidParameter`] if a hold window is negative or
/// not a number.
pub fn three_phase_chiller_balance(
    input: &ThreePhaseChillerInput,
) -> Result<ThreePhaseChillerBalance, BalanceError> {
    let cooling = input.initial_temperature.minus(input.final_temperature);
    let cooling_time = *input.cooling_time.as_ref();

    let product_sensible = sensible_heat(input.product, input.cp_product, cooling);
    let crystallization_latent = latent_heat(input.product, input.crystallization_enthalpy);
    let biomass_sensible = sensible_heat(input.biomass, input.cp_biomass, cooling);
    let acid_sensible = sensible_heat(input.acid_solution, input.cp_acid_solution, cooling);
    let cooling_losses = ambient_loss(input.ambient_loss, cooling_time);
    let phase_1 =
        product_sensible + crystallization_latent + biomass_sensible + acid_sensible + cooling_losses;

    let hold_losses = ambient_loss(input.ambient_loss, input.crystallization_hold);
    let phase_2 = hold_losses;

    let wash_sensible = sensible_heat(
        input.wash_solvent,
        input.cp_wash_solvent,
        input.ambient_temperature.minus(input.final_temperature),
    );
    let wash_losses = ambient_loss(input.ambient_loss, input.wash_hold);
    let phase_3 = wash_sensible + wash_losses;

    let total_heat = phase_1 + phase_2 + phase_3;

    let operating_time = params::operating_time(
        "chiller.total_time",
        cooling_time + input.crystallization_hold + input.wash_hold,
    )?;
    let duty = chiller_power_and_energy(total_heat, input.cop, operating_time);

    let phase_2_mass = input.residual_biomass + input.residual_acid + input.product_to_crystallize;

    Ok(ThreePhaseChillerBalance {
        product_sensible,
        crystallization_latent,
        biomass_sensible,
        acid_sensible,
        wash_sensible,
        cooling_losses,
        hold_losses,
        wash_losses,
        phase_1,
        phase_2,
        phase_3,
        total_heat,
        electrical_energy: duty.electrical_energy,
        average_power: duty.average_power,
        operating_time: operating_time.into_inner(),
        phase_2_mass,
        phase_3_mass: phase_2_mass + input.wash_solvent,
    })
}

/// Chiller balance produced by the configured [`ChillerModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChillerBalance {
    Simple(SimpleChillerBalance),
    ThreePhase(ThreePhaseChillerBalance),
}

impl ChillerBalance {
    /// Runs the chiller model selected in the recipe.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidParameter`] for any out-of-range value.
    pub fn from_constants(constants: &ProcessConstants) -> Result<Self, BalanceError> {
        let balance = match constants.chiller_model {
            ChillerModel::Simple => Self::Simple(simple_chiller_balance(
                &SimpleChillerInput::from_constants(constants)?,
            )?),
            ChillerModel::ThreePhase => Self::ThreePhase(three_phase_chiller_balance(
                &ThreePhaseChillerInput::from_constants(constants)?,
            )?),
        };
        debug!(
            "chiller ({:?}): {:.3} kWh heat, {:.3} kWh electrical",
            constants.chiller_model,
            balance.total_heat().get::<kilowatt_hour>(),
            balance.electrical_energy().get::<kilowatt_hour>(),
        );
        Ok(balance)
    }

    #[must_use]
    pub fn model(&self) -> ChillerModel {
        match self {
            Self::Simple(_) => ChillerModel::Simple,
            Self::ThreePhase(_) => ChillerModel::ThreePhase,
        }
    }

    #[must_use]
    pub fn total_heat(&self) -> Energy {
        match self {
            Self::Simple(b) => b.total_heat,
            Self::ThreePhase(b) => b.total_heat,
        }
    }

    #[must_use]
    pub fn electrical_energy(&self) -> Energy {
        match self {
            Self::Simple(b) => b.electrical_energy,
            Self::ThreePhase(b) => b.electrical_energy,
        }
    }

    #[must_use]
    pub fn average_power(&self) -> Power {
        match self {
            Self::Simple(b) => b.average_power,
            Self::ThreePhase(b) => b.average_power,
        }
    }

    #[must_use]
    pub fn operating_time(&self) -> Time {
        match self {
            Self::Simple(b) => b.operating_time,
            Self::ThreePhase(b) => b.operating_time,
        }
    }

    /// Heat removed in each phase, in order.
    #[must_use]
    pub fn phases(&self) -> Vec<Energy> {
        match self {
            Self::Simple(b) => vec![b.phase_1, b.phase_2],
            Self::ThreePhase(b) => vec![b.phase_1, b.phase_2, b.phase_3],
        }
    }

    pub(crate) fn record(&self, metrics: &mut Metrics) {
        match self {
            Self::Simple(b) => {
                metrics.energy("chiller.phase_1.product_sensible", b.product_sensible);
                metrics.energy("chiller.phase_1.crystallization_latent", b.crystallization_latent);
                metrics.energy("chiller.phase_1.ambient_losses", b.cooling_losses);
                metrics.energy("chiller.phase_2.ambient_losses", b.maintenance_losses);
            }
            Self::ThreePhase(b) => {
                metrics.energy("chiller.phase_1.product_sensible", b.product_sensible);
                metrics.energy("chiller.phase_1.crystallization_latent", b.crystallization_latent);
                metrics.energy("chiller.phase_1.biomass_sensible", b.biomass_sensible);
                metrics.energy("chiller.phase_1.acid_sensible", b.acid_sensible);
                metrics.energy("chiller.phase_1.ambient_losses", b.cooling_losses);
                metrics.energy("chiller.phase_2.ambient_losses", b.hold_losses);
                metrics.energy("chiller.phase_3.wash_sensible", b.wash_sensible);
                metrics.energy("chiller.phase_3.ambient_losses", b.wash_losses);
                metrics.mass("chiller.phase_2.mass", b.phase_2_mass);
                metrics.mass("chiller.phase_3.mass", b.phase_3_mass);
            }
        }
        for (index, phase) in self.phases().into_iter().enumerate() {
            metrics.energy(&format!("chiller.phase_{}.total", index + 1), phase);
        }
        metrics.energy("chiller.total_heat", self.total_heat());
        metrics.energy("chiller.electrical", self.electrical_energy());
        metrics.power("chiller.average_power", self.average_power());
        metrics.time("chiller.operating_time", self.operating_time());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::ConstZero;
    use uom::si::{
        energy::kilojoule,
        mass::kilogram,
        power::kilowatt,
        time::hour,
    };

    #[test]
    fn simple_model_on_reference_recipe() {
        let constants = ProcessConstants::default();
        let input = SimpleChillerInput::from_constants(&constants).unwrap();
        let b = simple_chiller_balance(&input).unwrap();

        // 90.6 kg × 1.6 kJ/kg·K × 24 K and 90.6 kg × 85 kJ/kg.
        assert_relative_eq!(b.product_sensible.get::<kilojoule>(), 3_479.04, epsilon = 1e-6);
        assert_relative_eq!(b.crystallization_latent.get::<kilojoule>(), 7_701.0, epsilon = 1e-6);
        // 0.5 kW over 5 h, then over 6 + 2 h.
        assert_relative_eq!(b.phase_1.get::<kilojoule>(), 3_479.04 + 7_701.0 + 9_000.0, epsilon = 1e-6);
        assert_relative_eq!(b.phase_2.get::<kilojoule>(), 14_400.0, epsilon = 1e-6);
        assert_relative_eq!(b.total_heat.get::<kilojoule>(), 34_580.04, epsilon = 1e-6);
        assert_relative_eq!(
            b.electrical_energy.get::<kilowatt_hour>(),
            34_580.04 / 3.0 / 3600.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(b.operating_time.get::<hour>(), 13.0, epsilon = 1e-12);
        assert_relative_eq!(
            b.average_power.get::<kilowatt>(),
            b.electrical_energy.get::<kilowatt_hour>() / 13.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn three_phase_model_on_reference_recipe() {
        let constants = ProcessConstants::default();
        let input = ThreePhaseChillerInput::from_constants(&constants).unwrap();
        let b = three_phase_chiller_balance(&input).unwrap();

        let product_sensible = 95.59 * 1.6 * 24.0;
        let latent = 95.59 * 85.0;
        let biomass = 25.52 * 3.5 * 24.0;
        let acid = 37.76 * 3.9 * 24.0;
        let phase_1 = product_sensible + latent + biomass + acid + 9_000.0;
        let phase_2 = 10_800.0;
        let phase_3 = 75.42 * 3.0 * 21.0 + 3_600.0;

        assert_relative_eq!(b.product_sensible.get::<kilojoule>(), product_sensible, epsilon = 1e-6);
        assert_relative_eq!(b.crystallization_latent.get::<kilojoule>(), latent, epsilon = 1e-6);
        assert_relative_eq!(b.biomass_sensible.get::<kilojoule>(), biomass, epsilon = 1e-6);
        assert_relative_eq!(b.acid_sensible.get::<kilojoule>(), acid, epsilon = 1e-6);
        assert_relative_eq!(b.phase_1.get::<kilojoule>(), phase_1, epsilon = 1e-6);
        assert_relative_eq!(b.phase_2.get::<kilojoule>(), phase_2, epsilon = 1e-6);
        assert_relative_eq!(b.phase_3.get::<kilojoule>(), phase_3, epsilon = 1e-6);
        assert_relative_eq!(
            b.total_heat.get::<kilojoule>(),
            phase_1 + phase_2 + phase_3,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            b.ambient_losses().get::<kilojoule>(),
            9_000.0 + 10_800.0 + 3_600.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            b.electrical_energy.get::<kilowatt_hour>(),
            (phase_1 + phase_2 + phase_3) / 3.0 / 3600.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(b.phase_2_mass.get::<kilogram>(), 2.55 + 3.78 + 90.6, epsilon = 1e-9);
        assert_relative_eq!(
            b.phase_3_mass.get::<kilogram>(),
            2.55 + 3.78 + 90.6 + 75.42,
            epsilon = 1e-9
        );
    }

    #[test]
    fn crystallization_heat_adds_to_the_load() {
        let constants = ProcessConstants::default();
        let mut input = SimpleChillerInput::from_constants(&constants).unwrap();
        let with_latent = simple_chiller_balance(&input).unwrap();

        input.crystallization_enthalpy = SpecificEnthalpy::ZERO;
        let without_latent = simple_chiller_balance(&input).unwrap();

        assert!(with_latent.total_heat > without_latent.total_heat);
        assert_relative_eq!(
            (with_latent.total_heat - without_latent.total_heat).get::<kilojoule>(),
            with_latent.crystallization_latent.get::<kilojoule>(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn models_disagree_on_the_same_recipe() {
        let mut constants = ProcessConstants::default();
        let three_phase = ChillerBalance::from_constants(&constants).unwrap();

        constants.chiller_model = ChillerModel::Simple;
        let simple = ChillerBalance::from_constants(&constants).unwrap();

        assert_eq!(simple.model(), ChillerModel::Simple);
        assert_eq!(three_phase.model(), ChillerModel::ThreePhase);
        assert_eq!(simple.phases().len(), 2);
        assert_eq!(three_phase.phases().len(), 3);
        assert!(three_phase.total_heat() > simple.total_heat());
        assert_relative_eq!(
            simple.operating_time().get::<hour>(),
            three_phase.operating_time().get::<hour>(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_cop_is_a_configuration_error() {
        let mut constants = ProcessConstants::default();
        constants.chiller.cop = 0.0;
        let err = ChillerBalance::from_constants(&constants).unwrap_err();
        assert!(matches!(
            err,
            BalanceError::InvalidParameter { ref parameter, .. } if parameter == "chiller.cop"
        ));
    }

    #[test]
    fn zero_cooling_time_is_a_configuration_error() {
        let mut constants = ProcessConstants::default();
        constants.chiller.cooling_time = 0.0;
        assert!(ChillerBalance::from_constants(&constants).is_err());
    }

    #[test]
    fn records_prefixed_metrics() {
        let balance = ChillerBalance::from_constants(&ProcessConstants::default()).unwrap();
        let mut metrics = Metrics::default();
        balance.record(&mut metrics);

        assert!(metrics.get("chiller.phase_3.wash_sensible_kwh").is_some());
        assert!(metrics.get("chiller.average_power_kw").is_some());
        assert_relative_eq!(
            metrics.get("chiller.total_heat_kwh").unwrap(),
            balance.total_heat().get::<kilowatt_hour>()
        );
    }
}
