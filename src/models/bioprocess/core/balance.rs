//! First-law closure of the batch.

use uom::{
    ConstZero,
    si::{
        energy::kilowatt_hour,
        f64::{Energy, Ratio},
        ratio::ratio,
    },
};

use super::{BalanceError, ChemicalEnergy, Metrics};
use crate::support::energy::Efficiency;

/// Closure error below which the balance counts as closed.
pub const BALANCE_TOLERANCE: f64 = 0.02;

/// Energy entering the batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceInputs {
    pub electrical: Energy,
    /// Fuel energy of the boiler steam; zero without a boiler.
    pub steam: Energy,
    pub chemical: Energy,
}

impl BalanceInputs {
    #[must_use]
    pub fn total(&self) -> Energy {
        self.electrical + self.steam + self.chemical
    }
}

/// Energy leaving the batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceOutputs {
    pub process_heat: Energy,
    pub thermal_losses: Energy,
    pub chemical: Energy,
    /// Net useful work, taken as zero.
    pub work: Energy,
}

impl BalanceOutputs {
    #[must_use]
    pub fn total(&self) -> Energy {
        self.process_heat + self.thermal_losses + self.chemical + self.work
    }
}

/// Result of closing the balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceResult {
    pub inputs: BalanceInputs,
    pub outputs: BalanceOutputs,
    /// `|IN - OUT| / IN`.
    pub error: Ratio,
    pub balanced: bool,
}

impl BalanceResult {
    #[must_use]
    pub fn error(&self) -> f64 {
        self.error.get::<ratio>()
    }

    pub(crate) fn record(&self, metrics: &mut Metrics) {
        metrics.energy("balance.in.electrical", self.inputs.electrical);
        metrics.energy("balance.in.steam", self.inputs.steam);
        metrics.energy("balance.in.chemical", self.inputs.chemical);
        metrics.energy("balance.in.total", self.inputs.total());
        metrics.energy("balance.out.process_heat", self.outputs.process_heat);
        metrics.energy("balance.out.thermal_losses", self.outputs.thermal_losses);
        metrics.energy("balance.out.chemical", self.outputs.chemical);
        metrics.energy("balance.out.work", self.outputs.work);
        metrics.energy("balance.out.total", self.outputs.total());
        metrics.ratio("balance.error", self.error());
        metrics.flag("balance.balanced", self.balanced);
    }
}

/// Boiler fuel energy for a sterilization heating duty.
#[must_use]
pub fn steam_input(heating_duty: Energy, boiler: Efficiency) -> Energy {
    heating_duty / *boiler
}

/// Compares what enters the batch with what leaves it.
///
/// # Errors
///
/// Returns [`BalanceError::ZeroEnergyInput`] if nothing enters the balance.
pub fn close_balance(
    electrical: Energy,
    steam: Energy,
    chemical: &ChemicalEnergy,
    process_heat: Energy,
    thermal_losses: Energy,
) -> Result<BalanceResult, BalanceError> {
    let inputs = BalanceInputs {
        electrical,
        steam,
        chemical: chemical.input,
    };
    let outputs = BalanceOutputs {
        process_heat,
        thermal_losses,
        chemical: chemical.output,
        work: Energy::ZERO,
    };

    let total_in = inputs.total();
    if total_in.get::<kilowatt_hour>() == 0.0 {
        return Err(BalanceError::ZeroEnergyInput);
    }
    let error: Ratio = ((total_in - outputs.total()) / total_in).abs();

    Ok(BalanceResult {
        inputs,
        outputs,
        error,
        balanced: error.get::<ratio>() < BALANCE_TOLERANCE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn kwh(value: f64) -> Energy {
        Energy::new::<kilowatt_hour>(value)
    }

    #[test]
    fn equal_in_and_out_close_exactly() {
        let b = close_balance(
            kwh(900.0),
            Energy::ZERO,
            &ChemicalEnergy::NONE,
            kwh(850.0),
            kwh(50.0),
        )
        .unwrap();

        assert_relative_eq!(b.error(), 0.0, epsilon = 1e-12);
        assert!(b.balanced);
    }

    #[test]
    fn error_is_relative_to_input() {
        let b = close_balance(
            kwh(1000.0),
            kwh(250.0),
            &ChemicalEnergy::NONE,
            kwh(1100.0),
            kwh(100.0),
        )
        .unwrap();

        assert_relative_eq!(b.inputs.total().get::<kilowatt_hour>(), 1250.0, epsilon = 1e-9);
        assert_relative_eq!(b.error(), 50.0 / 1250.0, epsilon = 1e-12);
        assert!(!b.balanced);
    }

    #[test]
    fn chemical_energy_enters_both_sides() {
        let chemical = ChemicalEnergy {
            input: kwh(2000.0),
            output: kwh(700.0),
            net: kwh(1300.0),
        };
        let b = close_balance(kwh(1000.0), Energy::ZERO, &chemical, kwh(2200.0), kwh(100.0))
            .unwrap();

        assert_relative_eq!(b.inputs.total().get::<kilowatt_hour>(), 3000.0, epsilon = 1e-9);
        assert_relative_eq!(b.outputs.total().get::<kilowatt_hour>(), 3000.0, epsilon = 1e-9);
        assert!(b.balanced);
    }

    #[test]
    fn zero_input_is_an_error() {
        assert_eq!(
            close_balance(
                Energy::ZERO,
                Energy::ZERO,
                &ChemicalEnergy::NONE,
                kwh(10.0),
                Energy::ZERO
            ),
            Err(BalanceError::ZeroEnergyInput)
        );
    }

    #[test]
    fn steam_is_duty_over_boiler_efficiency() {
        let steam = steam_input(kwh(85.0), Efficiency::new(0.85).unwrap());
        assert_relative_eq!(steam.get::<kilowatt_hour>(), 100.0, epsilon = 1e-9);
    }
}
