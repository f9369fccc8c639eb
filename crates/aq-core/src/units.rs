// aq-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, Velocity as UomVelocity, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

pub mod constants {
    /// Gravitational acceleration used by the hydraulic formulas.
    pub const G_MPS2: f64 = 9.81;

    /// Kinematic viscosity of water at ~15 degC, m^2/s.
    pub const NU_WATER_M2PS: f64 = 1.1e-6;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(2.0);
        let _d = mm(110.2);
        let _v = mps(1.5);
        let _q = m3ps(0.05);
    }

    #[test]
    fn mm_is_millimeters() {
        use uom::si::length::meter;
        let d = mm(1000.0);
        assert!((d.get::<meter>() - 1.0).abs() < 1e-15);
    }
}
