//! Plain-number energy conversions.
//!
//! Quantities inside the crate carry their own units. These helpers exist for
//! the edges where raw recipe numbers (heating values in MJ, legacy duties in
//! kJ) have to be turned into kWh before they become quantities.

/// Kilojoules in one kilowatt-hour.
pub const KJ_PER_KWH: f64 = 3600.0;

/// Megajoules in one kilowatt-hour.
pub const MJ_PER_KWH: f64 = 3.6;

/// Kilojoules to kilowatt-hours.
#[must_use]
pub fn kj_to_kwh(kj: f64) -> f64 {
    kj / KJ_PER_KWH
}

/// Kilowatt-hours to kilojoules.
#[must_use]
pub fn kwh_to_kj(kwh: f64) -> f64 {
    kwh * KJ_PER_KWH
}

/// Megajoules to kilowatt-hours.
#[must_use]
pub fn mj_to_kwh(mj: f64) -> f64 {
    mj / MJ_PER_KWH
}

/// Kilowatt-hours to megajoules.
#[must_use]
pub fn kwh_to_mj(kwh: f64) -> f64 {
    kwh * MJ_PER_KWH
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        energy::{kilojoule, kilowatt_hour, megajoule},
        f64::Energy,
    };

    #[test]
    fn agrees_with_uom() {
        let duty = Energy::new::<kilojoule>(86_400.0);
        assert_relative_eq!(kj_to_kwh(86_400.0), duty.get::<kilowatt_hour>());

        let hhv = Energy::new::<megajoule>(2_020.0);
        assert_relative_eq!(mj_to_kwh(2_020.0), hhv.get::<kilowatt_hour>());
    }

    #[test]
    fn inverse_pairs() {
        assert_relative_eq!(kwh_to_kj(kj_to_kwh(3_671.04)), 3_671.04);
        assert_relative_eq!(kwh_to_mj(mj_to_kwh(16.7)), 16.7);
    }
}
