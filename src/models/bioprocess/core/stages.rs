//! Thermal loads of the four process stages and their losses to the
//! surroundings.
//!
//! Every stage is a list of named, non-negative heat terms. Heating and
//! cooling legs are both counted as magnitudes: the total is the heat the
//! utilities have to move, not a net enthalpy change.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use uom::{
    ConstZero,
    si::{
        energy::kilowatt_hour,
        f64::{Energy, Mass},
    },
};

use crate::{
    models::bioprocess::{
        ProcessConstants,
        equipment::{EquipmentTable, codes},
    },
    support::{
        constraint::ConstraintError,
        energy::{latent_heat, mechanical_dissipation, metabolic_heat, sensible_heat},
        units::TemperatureDifference,
    },
};

use super::{BalanceError, Metrics, params};

/// Names of the heat terms, as they appear in stage loads and metric keys.
pub mod terms {
    pub const MEDIUM_HEATING: &str = "medium_heating";
    pub const OIL_HEATING: &str = "oil_heating";
    pub const CONDENSATION: &str = "condensation";
    pub const MEDIUM_COOLING: &str = "medium_cooling";
    pub const OIL_COOLING: &str = "oil_cooling";

    pub const METABOLIC: &str = "metabolic";
    pub const AGITATION: &str = "agitation";
    pub const AERATION: &str = "aeration";
    pub const PUMPING: &str = "pumping";

    pub const PRODUCT_COOLING: &str = "product_cooling";
    pub const BIOMASS_COOLING: &str = "biomass_cooling";
    pub const CRYSTALLIZATION: &str = "crystallization";

    pub const CRYSTAL_HEATING: &str = "crystal_heating";
    pub const WATER_HEATING: &str = "water_heating";
    pub const WATER_EVAPORATION: &str = "water_evaporation";
}

/// A process stage with its own thermal load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Sterilization,
    Fermentation,
    Crystallization,
    Drying,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Sterilization,
        Stage::Fermentation,
        Stage::Crystallization,
        Stage::Drying,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Stage::Sterilization => "sterilization",
            Stage::Fermentation => "fermentation",
            Stage::Crystallization => "crystallization",
            Stage::Drying => "drying",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Named heat terms of one stage, in listing order.
#[derive(Debug, Clone, PartialEq)]
pub struct StageLoad {
    stage: Stage,
    terms: IndexMap<&'static str, Energy>,
}

impl StageLoad {
    fn new(stage: Stage) -> Self {
        Self {
            stage,
            terms: IndexMap::new(),
        }
    }

    fn with(mut self, term: &'static str, heat: Energy) -> Self {
        self.terms.insert(term, heat);
        self
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The named term, or `None` if this stage has no such term.
    #[must_use]
    pub fn term(&self, name: &str) -> Option<Energy> {
        self.terms.get(name).copied()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&'static str, Energy)> + '_ {
        self.terms.iter().map(|(name, heat)| (*name, *heat))
    }

    #[must_use]
    pub fn total(&self) -> Energy {
        self.terms.values().fold(Energy::ZERO, |sum, heat| sum + *heat)
    }
}

/// Thermal loads of every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalLoads {
    pub sterilization: StageLoad,
    pub fermentation: StageLoad,
    pub crystallization: StageLoad,
    pub drying: StageLoad,
}

impl ThermalLoads {
    /// Computes every stage load.
    ///
    /// Fermentation reads agitator, blower and transfer-pump energies from
    /// `equipment`, so dissipation follows any update made to that table.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidParameter`] for an out-of-range recipe
    /// value and [`BalanceError::MissingEquipment`] if one of the dissipating
    /// consumers is not in the table.
    pub fn compute(
        constants: &ProcessConstants,
        equipment: &EquipmentTable,
    ) -> Result<Self, BalanceError> {
        let loads = Self {
            sterilization: sterilization(constants)?,
            fermentation: fermentation(constants, equipment)?,
            crystallization: crystallization(constants)?,
            drying: drying(constants)?,
        };
        for load in loads.stages() {
            debug!(
                "{} load: {:.3} kWh",
                load.stage(),
                load.total().get::<kilowatt_hour>()
            );
        }
        Ok(loads)
    }

    #[must_use]
    pub fn stage(&self, stage: Stage) -> &StageLoad {
        match stage {
            Stage::Sterilization => &self.sterilization,
            Stage::Fermentation => &self.fermentation,
            Stage::Crystallization => &self.crystallization,
            Stage::Drying => &self.drying,
        }
    }

    pub fn stages(&self) -> impl Iterator<Item = &StageLoad> {
        Stage::ALL.into_iter().map(|stage| self.stage(stage))
    }

    /// Process heat, summed over all stages.
    #[must_use]
    pub fn total(&self) -> Energy {
        self.stages()
            .fold(Energy::ZERO, |sum, load| sum + load.total())
    }

    /// Heat a boiler has to raise for sterilization: medium and oil heating
    /// plus steam condensed into the medium.
    #[must_use]
    pub fn sterilization_heating_duty(&self) -> Energy {
        [terms::MEDIUM_HEATING, terms::OIL_HEATING, terms::CONDENSATION]
            .into_iter()
            .filter_map(|term| self.sterilization.term(term))
            .fold(Energy::ZERO, |sum, heat| sum + heat)
    }

    pub(crate) fn record(&self, metrics: &mut Metrics) {
        for load in self.stages() {
            let stage = load.stage();
            for (name, heat) in load.terms() {
                metrics.energy(&format!("thermal.{stage}.{name}"), heat);
            }
            metrics.energy(&format!("thermal.{stage}.total"), load.total());
        }
        metrics.energy("thermal.total", self.total());
    }
}

fn sterilization(constants: &ProcessConstants) -> Result<StageLoad, BalanceError> {
    let m = &constants.masses;
    let p = &constants.properties;
    let t = &constants.temperatures;

    let broth = params::mass("masses.fermenter_broth", m.fermenter_broth)?;
    let oil = params::mass("masses.vegetable_oil", m.vegetable_oil)?;
    let medium = difference("masses.fermenter_broth", broth, oil)?;
    let condensate = params::mass("masses.sterilization_condensate", m.sterilization_condensate)?;

    let cp_medium = params::specific_heat("properties.cp_aqueous_medium", p.cp_aqueous_medium)?;
    let cp_oil = params::specific_heat("properties.cp_vegetable_oil", p.cp_vegetable_oil)?;
    let vaporization = params::enthalpy(
        "properties.latent_vaporization_water_121c",
        p.latent_vaporization_water_121c,
    )?;

    let ambient = params::temperature("temperatures.ambient", t.ambient)?;
    let medium_hot = params::temperature(
        "temperatures.sterilization_medium",
        t.sterilization_medium,
    )?;
    let oil_hot = params::temperature("temperatures.sterilization_oil", t.sterilization_oil)?;
    let fermentation = params::temperature("temperatures.fermentation", t.fermentation)?;

    Ok(StageLoad::new(Stage::Sterilization)
        .with(
            terms::MEDIUM_HEATING,
            sensible_heat(medium, cp_medium, medium_hot.span(ambient)),
        )
        .with(
            terms::OIL_HEATING,
            sensible_heat(oil, cp_oil, oil_hot.span(ambient)),
        )
        .with(terms::CONDENSATION, latent_heat(condensate, vaporization))
        .with(
            terms::MEDIUM_COOLING,
            sensible_heat(medium, cp_medium, medium_hot.span(fermentation)),
        )
        .with(
            terms::OIL_COOLING,
            sensible_heat(oil, cp_oil, oil_hot.span(fermentation)),
        ))
}

fn fermentation(
    constants: &ProcessConstants,
    equipment: &EquipmentTable,
) -> Result<StageLoad, BalanceError> {
    let e = &constants.efficiencies;

    let co2 = params::mass("masses.co2_produced", constants.masses.co2_produced)?;
    let heat_per_mole = params::molar_heat(
        "properties.metabolic_heat_per_mol_o2",
        constants.properties.metabolic_heat_per_mol_o2,
    )?;

    let dissipated = |code: &str, parameter: &str, share: f64| {
        let fraction = params::fraction(parameter, share)?;
        let record = equipment
            .get(code)
            .ok_or_else(|| BalanceError::MissingEquipment { code: code.into() })?;
        Ok::<_, BalanceError>(mechanical_dissipation(record.energy(), fraction))
    };

    Ok(StageLoad::new(Stage::Fermentation)
        .with(terms::METABOLIC, metabolic_heat(co2, heat_per_mole))
        .with(
            terms::AGITATION,
            dissipated(
                codes::AGITATOR,
                "efficiencies.agitation_dissipation",
                e.agitation_dissipation,
            )?,
        )
        .with(
            terms::AERATION,
            dissipated(
                codes::BLOWER,
                "efficiencies.aeration_dissipation",
                e.aeration_dissipation,
            )?,
        )
        .with(
            terms::PUMPING,
            dissipated(
                codes::TRANSFER_PUMPS,
                "efficiencies.pumping_dissipation",
                e.pumping_dissipation,
            )?,
        ))
}

fn crystallization(constants: &ProcessConstants) -> Result<StageLoad, BalanceError> {
    let m = &constants.masses;
    let p = &constants.properties;
    let t = &constants.temperatures;

    let solids = params::mass("masses.decanted_solids", m.decanted_solids)?;
    let product = params::mass("masses.crude_product", m.crude_product)?;
    let biomass = difference("masses.decanted_solids", solids, product)?;
    let crystallizing = params::mass(
        "masses.crystals_after_precipitation",
        m.crystals_after_precipitation,
    )?;

    let cooling = params::temperature("temperatures.fermentation", t.fermentation)?
        .span(params::temperature("temperatures.crystallization", t.crystallization)?);

    Ok(StageLoad::new(Stage::Crystallization)
        .with(
            terms::PRODUCT_COOLING,
            sensible_heat(
                product,
                params::specific_heat("properties.cp_sophorolipid", p.cp_sophorolipid)?,
                cooling,
            ),
        )
        .with(
            terms::BIOMASS_COOLING,
            sensible_heat(
                biomass,
                params::specific_heat("properties.cp_biomass", p.cp_biomass)?,
                cooling,
            ),
        )
        .with(
            terms::CRYSTALLIZATION,
            latent_heat(
                crystallizing,
                params::enthalpy(
                    "properties.latent_crystallization",
                    p.latent_crystallization,
                )?,
            ),
        ))
}

fn drying(constants: &ProcessConstants) -> Result<StageLoad, BalanceError> {
    let m = &constants.masses;
    let p = &constants.properties;
    let t = &constants.temperatures;

    let crystals = params::mass(
        "masses.crystals_after_centrifugation",
        m.crystals_after_centrifugation,
    )?;
    let water = params::mass("masses.water_evaporated_drying", m.water_evaporated_drying)?;
    let heating = params::temperature("temperatures.drying", t.drying)?
        .span(params::temperature("temperatures.crystallization", t.crystallization)?);

    Ok(StageLoad::new(Stage::Drying)
        .with(
            terms::CRYSTAL_HEATING,
            sensible_heat(
                crystals,
                params::specific_heat("properties.cp_sophorolipid", p.cp_sophorolipid)?,
                heating,
            ),
        )
        .with(
            terms::WATER_HEATING,
            sensible_heat(
                water,
                params::specific_heat("properties.cp_water", p.cp_water)?,
                heating,
            ),
        )
        .with(
            terms::WATER_EVAPORATION,
            latent_heat(
                water,
                params::enthalpy(
                    "properties.latent_vaporization_water_45c",
                    p.latent_vaporization_water_45c,
                )?,
            ),
        ))
}

/// `whole - part`, rejected under `parameter` if the part is the larger.
fn difference(parameter: &str, whole: Mass, part: Mass) -> Result<Mass, BalanceError> {
    let rest = whole - part;
    if rest < Mass::ZERO {
        return Err(BalanceError::invalid(parameter, ConstraintError::Negative));
    }
    Ok(rest)
}

/// Heat lost to the surroundings by each stage.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatLosses {
    by_stage: IndexMap<Stage, Energy>,
}

impl HeatLosses {
    /// Applies each stage's loss fraction to its load.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidParameter`] if a fraction lies outside
    /// `[0, 1]`.
    pub fn compute(
        constants: &ProcessConstants,
        loads: &ThermalLoads,
    ) -> Result<Self, BalanceError> {
        let f = &constants.heat_losses;
        let mut by_stage = IndexMap::new();
        for (stage, parameter, share) in [
            (Stage::Sterilization, "heat_losses.sterilization", f.sterilization),
            (Stage::Fermentation, "heat_losses.fermentation", f.fermentation),
            (Stage::Crystallization, "heat_losses.crystallization", f.crystallization),
            (Stage::Drying, "heat_losses.drying", f.drying),
        ] {
            let fraction = params::fraction(parameter, share)?;
            by_stage.insert(stage, loads.stage(stage).total() * *fraction);
        }
        Ok(Self { by_stage })
    }

    #[must_use]
    pub fn stage(&self, stage: Stage) -> Energy {
        self.by_stage.get(&stage).copied().unwrap_or(Energy::ZERO)
    }

    pub fn stages(&self) -> impl Iterator<Item = (Stage, Energy)> + '_ {
        self.by_stage.iter().map(|(stage, loss)| (*stage, *loss))
    }

    #[must_use]
    pub fn total(&self) -> Energy {
        self.by_stage
            .values()
            .fold(Energy::ZERO, |sum, loss| sum + *loss)
    }

    pub(crate) fn record(&self, metrics: &mut Metrics) {
        for (stage, loss) in self.stages() {
            metrics.energy(&format!("losses.{stage}"), loss);
        }
        metrics.energy("losses.total", self.total());
    }
}
