use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// [`uom`] does not allow subtracting two [`ThermodynamicTemperature`] values
/// into a [`TemperatureInterval`]; see
/// [#380](https://github.com/iliekturtles/uom/issues/380) and
/// [#403](https://github.com/iliekturtles/uom/issues/403).
pub trait TemperatureDifference {
    /// Returns the signed temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;

    /// Returns the magnitude of the difference between `self` and `other`.
    ///
    /// Heating and cooling legs use the same span; the direction of heat flow
    /// is decided by the caller.
    fn span(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }

    fn span(self, other: Self) -> TemperatureInterval {
        self.minus(other).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        temperature_interval::degree_celsius as delta_celsius,
        thermodynamic_temperature::degree_celsius,
    };

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    #[test]
    fn cooling_leg_is_negative() {
        let delta = celsius(4.0).minus(celsius(28.0));
        assert_relative_eq!(delta.get::<delta_celsius>(), -24.0, epsilon = 1e-9);
    }

    #[test]
    fn heating_leg_is_positive() {
        let delta = celsius(121.0).minus(celsius(25.0));
        assert_relative_eq!(delta.get::<delta_kelvin>(), 96.0, epsilon = 1e-9);
    }

    #[test]
    fn span_ignores_direction() {
        let up = celsius(45.0).span(celsius(4.0));
        let down = celsius(4.0).span(celsius(45.0));
        assert_relative_eq!(up.get::<delta_kelvin>(), 41.0, epsilon = 1e-9);
        assert_relative_eq!(up.get::<delta_kelvin>(), down.get::<delta_kelvin>());
    }
}
