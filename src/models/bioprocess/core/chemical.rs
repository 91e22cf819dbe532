use uom::{ConstZero, si::f64::Energy};

use crate::models::bioprocess::ProcessConstants;

use super::{BalanceError, Metrics, params};

/// Heating value carried in by feedstocks and out by products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemicalEnergy {
    /// Sucrose and vegetable oil.
    pub input: Energy,
    /// Final product and biomass.
    pub output: Energy,
    /// `input - output`; negative if the products carry more than the feed.
    pub net: Energy,
}

impl ChemicalEnergy {
    /// No chemical energy accounted for.
    pub const NONE: Self = Self {
        input: Energy::ZERO,
        output: Energy::ZERO,
        net: Energy::ZERO,
    };

    /// Heating values of the batch, or [`ChemicalEnergy::NONE`] when the
    /// recipe excludes chemical energy.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::InvalidParameter`] for a negative mass or
    /// heating value. Values are only checked when chemical energy is included.
    pub fn from_constants(constants: &ProcessConstants) -> Result<Self, BalanceError> {
        if !constants.include_chemical_energy {
            return Ok(Self::NONE);
        }

        let m = &constants.masses;
        let p = &constants.properties;

        let input = params::mass("masses.sucrose", m.sucrose)?
            * params::heating_value("properties.hhv_sucrose", p.hhv_sucrose)?
            + params::mass("masses.vegetable_oil", m.vegetable_oil)?
                * params::heating_value("properties.hhv_vegetable_oil", p.hhv_vegetable_oil)?;
        let output = params::mass("masses.final_product", m.final_product)?
            * params::heating_value("properties.hhv_sophorolipid", p.hhv_sophorolipid)?
            + params::mass("masses.final_biomass", m.final_biomass)?
                * params::heating_value("properties.hhv_biomass", p.hhv_biomass)?;

        Ok(Self {
            input,
            output,
            net: input - output,
        })
    }

    pub(crate) fn record(&self, metrics: &mut Metrics) {
        metrics.energy("chemical.input", self.input);
        metrics.energy("chemical.output", self.output);
        metrics.energy("chemical.net", self.net);
    }
}
