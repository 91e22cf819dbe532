//! Extensions to [`uom`].
//!
//! Every balance in this crate works on [`uom`] quantities, so kJ, kWh and MJ
//! are only different views of one stored energy value. This module adds the
//! pieces [`uom`] does not ship with.
//!
//! ## Temperature differences
//!
//! [`TemperatureDifference`] subtracts two absolute temperatures and yields a
//! temperature interval, which is what sensible-heat formulas multiply by:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::degree_celsius;
//! use sophorolipid_energy::support::units::TemperatureDifference;
//!
//! let fermentation = ThermodynamicTemperature::new::<degree_celsius>(28.0);
//! let crystallization = ThermodynamicTemperature::new::<degree_celsius>(4.0);
//! let cooling = fermentation.minus(crystallization);
//! // cooling is a TemperatureInterval of 24 K
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::SpecificEnthalpy;
pub use temperature_difference::TemperatureDifference;
