//! Process data for one sophorolipid batch.
//!
//! [`ProcessConstants`] is the only input of a balance run. Its [`Default`]
//! is the reference recipe; a JSON document may override any subset of it:
//!
//! ```
//! use sophorolipid_energy::models::bioprocess::ProcessConstants;
//!
//! let recipe = ProcessConstants::from_json_str(r#"{ "use_boiler": true }"#).unwrap();
//! assert!(recipe.use_boiler);
//! assert_eq!(recipe.masses.final_product, 80.8);
//! ```
//!
//! Values are plain numbers in engineering units (kg, °C, h, kJ/kg·K, kJ/kg,
//! MJ/kg, kW). They are checked and converted to typed quantities when a run
//! starts, so an invalid recipe fails before any balance is computed.

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::equipment::EquipmentTable;

/// Errors raised while loading a recipe document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read recipe file")]
    Io(#[from] io::Error),

    #[error("failed to parse recipe")]
    Parse(#[from] serde_json::Error),
}

/// Which chiller balance to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChillerModel {
    /// Single homogeneous product: cooling + crystallization, then maintenance.
    Simple,
    /// Product, biomass and acid cooled together, a crystallization hold, then a cold ethanol wash.
    #[default]
    ThreePhase,
}

/// Which dryer balance to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DryerModel {
    /// Residual water only; the crystals themselves are not heated.
    WaterOnly,
    /// Crystals heated, plus residual water and wash ethanol evaporated.
    #[default]
    WaterAndEthanol,
}

/// Complete description of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConstants {
    /// Sterilize with boiler steam instead of the electric heater.
    pub use_boiler: bool,
    /// Account for the heating value of feedstocks and products.
    pub include_chemical_energy: bool,
    pub chiller_model: ChillerModel,
    pub dryer_model: DryerModel,
    pub masses: BatchMasses,
    pub temperatures: ProcessTemperatures,
    pub times: ProcessTimes,
    pub properties: MaterialProperties,
    pub chiller: ChillerSetup,
    pub dryer: DryerSetup,
    pub efficiencies: Efficiencies,
    pub heat_losses: StageLossFractions,
    pub utilities: Utilities,
    pub equipment: EquipmentTable,
}

impl Default for ProcessConstants {
    fn default() -> Self {
        Self {
            use_boiler: false,
            include_chemical_energy: false,
            chiller_model: ChillerModel::default(),
            dryer_model: DryerModel::default(),
            masses: BatchMasses::default(),
            temperatures: ProcessTemperatures::default(),
            times: ProcessTimes::default(),
            properties: MaterialProperties::default(),
            chiller: ChillerSetup::default(),
            dryer: DryerSetup::default(),
            efficiencies: Efficiencies::default(),
            heat_losses: StageLossFractions::default(),
            utilities: Utilities::default(),
            equipment: EquipmentTable::reference(),
        }
    }
}

impl ProcessConstants {
    /// Parses a recipe, filling unspecified fields from the reference recipe.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not a valid recipe.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a recipe file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid recipe.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Batch masses from the mass balance, kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchMasses {
    // Feedstocks.
    pub sucrose: f64,
    pub vegetable_oil: f64,
    pub urea: f64,
    pub mineral_salts: f64,
    pub water: f64,
    pub hydrochloric_acid: f64,
    pub ethanol: f64,

    // Products and effluents.
    pub crude_product: f64,
    pub final_product: f64,
    pub final_biomass: f64,
    pub residual_oil: f64,
    pub aqueous_phase: f64,
    pub co2_produced: f64,

    // Intermediate streams.
    /// Broth charged to the main fermenter, oil included.
    pub fermenter_broth: f64,
    /// Biomass and product leaving the decanter.
    pub decanted_solids: f64,
    pub crystals_after_precipitation: f64,
    pub crystals_after_centrifugation: f64,
    /// Water driven off over the whole drying stage.
    pub water_evaporated_drying: f64,
    /// Live steam condensed into the medium during sterilization.
    pub sterilization_condensate: f64,
}

impl Default for BatchMasses {
    fn default() -> Self {
        Self {
            sucrose: 178.74,
            vegetable_oil: 160.0,
            urea: 25.38,
            mineral_salts: 1.88,
            water: 508.0,
            hydrochloric_acid: 37.76,
            ethanol: 75.42,
            crude_product: 95.59,
            final_product: 80.8,
            final_biomass: 25.52,
            residual_oil: 105.23,
            aqueous_phase: 376.47,
            co2_produced: 105.8,
            fermenter_broth: 907.62,
            decanted_solids: 121.12,
            crystals_after_precipitation: 90.6,
            crystals_after_centrifugation: 81.8,
            water_evaporated_drying: 55.0,
            sterilization_condensate: 15.0,
        }
    }
}

impl BatchMasses {
    /// Everything charged to the batch.
    #[must_use]
    pub fn total_input(&self) -> f64 {
        self.sucrose
            + self.vegetable_oil
            + self.urea
            + self.mineral_salts
            + self.water
            + self.hydrochloric_acid
            + self.ethanol
    }

    /// Everything leaving the batch as product, biomass, oil, aqueous phase or gas.
    #[must_use]
    pub fn total_output(&self) -> f64 {
        self.final_product
            + self.final_biomass
            + self.residual_oil
            + self.aqueous_phase
            + self.co2_produced
    }
}

/// Process temperatures, °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessTemperatures {
    pub ambient: f64,
    pub sterilization_medium: f64,
    pub sterilization_oil: f64,
    pub fermentation: f64,
    pub crystallization: f64,
    pub drying: f64,
}

impl Default for ProcessTemperatures {
    fn default() -> Self {
        Self {
            ambient: 25.0,
            sterilization_medium: 121.0,
            sterilization_oil: 109.0,
            fermentation: 28.0,
            crystallization: 4.0,
            drying: 45.0,
        }
    }
}

impl ProcessTemperatures {
    /// Every temperature in the recipe, labelled.
    #[must_use]
    pub fn labelled(&self) -> [(&'static str, f64); 6] {
        [
            ("ambient", self.ambient),
            ("sterilization_medium", self.sterilization_medium),
            ("sterilization_oil", self.sterilization_oil),
            ("fermentation", self.fermentation),
            ("crystallization", self.crystallization),
            ("drying", self.drying),
        ]
    }
}

/// Stage durations, h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessTimes {
    /// Sterilization hold; also the electric heater's run time.
    pub sterilization: f64,
    pub drying: f64,
}

impl Default for ProcessTimes {
    fn default() -> Self {
        Self {
            sterilization: 1.0,
            drying: 12.0,
        }
    }
}

/// Specific heats (kJ/kg·K), latent heats (kJ/kg), metabolic heat (kJ/mol O₂)
/// and higher heating values (MJ/kg).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialProperties {
    pub cp_water: f64,
    pub cp_vegetable_oil: f64,
    pub cp_aqueous_medium: f64,
    pub cp_sophorolipid: f64,
    pub cp_biomass: f64,
    pub cp_acid_solution: f64,
    /// 70 % ethanol used for the crystal wash.
    pub cp_wash_ethanol: f64,

    pub latent_vaporization_water_45c: f64,
    pub latent_vaporization_water_121c: f64,
    pub latent_vaporization_wash_ethanol: f64,
    /// Heat released per kilogram of sophorolipid crystallized.
    pub latent_crystallization: f64,

    pub metabolic_heat_per_mol_o2: f64,

    pub hhv_sucrose: f64,
    pub hhv_vegetable_oil: f64,
    pub hhv_sophorolipid: f64,
    pub hhv_biomass: f64,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            cp_water: 4.18,
            cp_vegetable_oil: 1.94,
            cp_aqueous_medium: 4.18,
            cp_sophorolipid: 1.6,
            cp_biomass: 3.5,
            cp_acid_solution: 3.9,
            cp_wash_ethanol: 3.0,
            latent_vaporization_water_45c: 2400.0,
            latent_vaporization_water_121c: 2199.0,
            latent_vaporization_wash_ethanol: 1000.0,
            latent_crystallization: 85.0,
            metabolic_heat_per_mol_o2: 450.0,
            hhv_sucrose: 16.7,
            hhv_vegetable_oil: 37.0,
            hhv_sophorolipid: 25.0,
            hhv_biomass: 20.0,
        }
    }
}

/// Chiller (FT-101) operation for the crystallization train.
///
/// The chiller takes the slurry from fermentation temperature down to
/// crystallization temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChillerSetup {
    pub cop: f64,
    /// Heat gained from the surroundings by the cold vessel, kW.
    pub ambient_loss_kw: f64,
    /// Active cooling from fermentation to crystallization temperature, h.
    pub cooling_time: f64,
    /// Crystallization hold at temperature, h.
    pub crystallization_hold: f64,
    /// Cold ethanol wash hold, h.
    pub wash_hold: f64,
    /// Biomass still in the vessel after decanting the liquor, kg.
    pub residual_biomass: f64,
    /// Acid solution still in the vessel after decanting the liquor, kg.
    pub residual_acid: f64,
}

impl Default for ChillerSetup {
    fn default() -> Self {
        Self {
            cop: 3.0,
            ambient_loss_kw: 0.5,
            cooling_time: 5.0,
            crystallization_hold: 6.0,
            wash_hold: 2.0,
            residual_biomass: 2.55,
            residual_acid: 3.78,
        }
    }
}

/// Dryer (TDR-101) operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DryerSetup {
    pub efficiency: f64,
    /// Heat lost by the dryer casing, kW.
    pub ambient_loss_kw: f64,
    /// Moisture left on the centrifuged crystals, kg.
    pub water_to_evaporate: f64,
    /// Wash ethanol left on the centrifuged crystals, kg.
    pub ethanol_to_evaporate: f64,
}

impl Default for DryerSetup {
    fn default() -> Self {
        Self {
            efficiency: 0.8,
            ambient_loss_kw: 2.0,
            water_to_evaporate: 1.0,
            ethanol_to_evaporate: 1.5,
        }
    }
}

/// Conversion efficiencies and shaft-work dissipation fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Efficiencies {
    pub boiler: f64,
    /// Share of agitator work dissipated into the broth.
    pub agitation_dissipation: f64,
    /// Share of blower work dissipated into the broth.
    pub aeration_dissipation: f64,
    /// Share of transfer-pump work dissipated into the pumped stream.
    pub pumping_dissipation: f64,
}

impl Default for Efficiencies {
    fn default() -> Self {
        Self {
            boiler: 0.85,
            agitation_dissipation: 0.32,
            aeration_dissipation: 0.20,
            pumping_dissipation: 0.90,
        }
    }
}

/// Thermal losses to the surroundings as a share of each stage's heat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageLossFractions {
    pub sterilization: f64,
    pub fermentation: f64,
    pub crystallization: f64,
    pub drying: f64,
}

impl Default for StageLossFractions {
    fn default() -> Self {
        Self {
            sterilization: 0.035,
            fermentation: 0.015,
            crystallization: 0.040,
            drying: 0.080,
        }
    }
}

/// Plant-wide consumers not itemized in the equipment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Utilities {
    /// Fixed utility energy per batch (HVAC, lighting, water treatment), kWh.
    pub fixed_energy_kwh: f64,
    /// Rating of the electric sterilization heater used when no boiler is available, kW.
    pub electric_heater_power_kw: f64,
}

impl Default for Utilities {
    fn default() -> Self {
        Self {
            fixed_energy_kwh: 3460.0,
            electric_heater_power_kw: 100.0,
        }
    }
}
