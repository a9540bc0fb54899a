//! `uom` quantities for the typed accessors, and the physical constants of
//! the moist-air model.

use uom::si::f64::{Power as UomPower, Pressure as UomPressure, ThermodynamicTemperature};

pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Temperature = ThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn pa_of(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kilowatts_of(p: Power) -> f64 {
    use uom::si::power::kilowatt;
    p.get::<kilowatt>()
}

pub mod constants {
    /// Standard atmospheric pressure [Pa].
    pub const P_ATM_PA: f64 = 101_325.0;
    /// Specific heat of dry air [J/(kg·K)].
    pub const C_AIR: f64 = 1e3;
    /// Latent heat of vaporization of water [J/kg].
    pub const L_VAPOR: f64 = 2_496e3;
    /// 0 °C in kelvin.
    pub const T0_K: f64 = 273.15;
}
