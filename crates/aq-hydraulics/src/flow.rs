//! Head loss, discharge and diameter sizing for circular pressurized pipes.

use crate::friction::{colebrook_step, friction_factor};
use aq_core::ensure_finite;
use aq_core::units::constants::{G_MPS2, NU_WATER_M2PS};
use aq_core::units::{m, m3ps, mps, Length, Velocity, VolumeRate};
use aq_core::{AqError, AqResult};
use std::f64::consts::PI;

/// Mean velocity over a circular cross-section.
pub fn velocity(q: VolumeRate, d: Length) -> AqResult<Velocity> {
    if d.value <= 0.0 {
        return Err(AqError::InvalidArg {
            what: "diameter must be positive",
        });
    }
    Ok(mps(q.value * 4.0 / (PI * d.value * d.value)))
}

/// Reynolds number for the given kinematic viscosity (m^2/s).
pub fn reynolds_number(v: Velocity, d: Length, nu: f64) -> f64 {
    v.value * d.value / nu
}

/// Darcy-Weisbach slope per unit length, with hydraulic radius r = d/4.
#[inline]
fn darcy_weisbach_slope(v: f64, r: f64, f: f64) -> f64 {
    f * v * v / (4.0 * r * 2.0 * G_MPS2)
}

/// Friction slope (head loss per unit length) for a flow velocity.
pub fn energy_slope(v: Velocity, d: Length, ks: Length) -> AqResult<f64> {
    let re = reynolds_number(v, d, NU_WATER_M2PS).abs();
    let f = friction_factor(re, d, ks)?;
    ensure_finite(
        darcy_weisbach_slope(v.value, d.value / 4.0, f),
        "energy slope",
    )
}

/// Friction head loss over a pipe of length `l`.
pub fn head_loss(q: VolumeRate, d: Length, l: Length, ks: Length) -> AqResult<Length> {
    if l.value <= 0.0 {
        return Err(AqError::InvalidArg {
            what: "length must be positive",
        });
    }
    let slope = energy_slope(velocity(q, d)?, d, ks)?;
    Ok(m(ensure_finite(l.value * slope, "head loss")?))
}

/// Flow achieving a target head loss, via an explicit friction-factor
/// approximation (no iteration).
pub fn discharge(hf: Length, d: Length, l: Length, ks: Length) -> AqResult<VolumeRate> {
    if hf.value <= 0.0 || d.value <= 0.0 || l.value <= 0.0 {
        return Err(AqError::InvalidArg {
            what: "head loss, diameter and length must be positive",
        });
    }
    let (hf, d, l, ks) = (hf.value, d.value, l.value, ks.value);
    let re_f = (2.0 * G_MPS2 * hf / l).sqrt() * d.powf(1.5) / NU_WATER_M2PS;
    let log = -2.0 * ((ks / d) / 3.71 + 2.51 / re_f).log10();
    let f = 1.0 / (log * log);
    let v = (2.0 * G_MPS2 * hf * d / (l * f)).sqrt();
    Ok(m3ps(ensure_finite(v * PI * d * d / 4.0, "discharge")?))
}

/// Diameter achieving a target head loss for a given flow, length and
/// roughness.
///
/// Couples the head-loss and friction-factor relations iteratively, with
/// the same convergence policy as [`friction_factor`]: seed f = 0.02,
/// |Δf| < 1e-6 after at least 5 iterations, capped at 100. Past the cap
/// the last diameter estimate is returned without signaling.
pub fn diameter(q: VolumeRate, hf: Length, l: Length, ks: Length) -> AqResult<Length> {
    if q.value <= 0.0 || hf.value <= 0.0 || l.value <= 0.0 {
        return Err(AqError::InvalidArg {
            what: "flow, head loss and length must be positive",
        });
    }
    let (q, hf, l, ks) = (q.value, hf.value, l.value, ks.value);

    let d_for = |f: f64| (f * 8.0 * l * q * q / (hf * PI * PI * G_MPS2)).powf(0.2);
    let re_for = |d: f64| (q * 4.0 / (PI * d * d)) * d / NU_WATER_M2PS;

    let mut current = 0.02;
    let mut d = d_for(current);
    let mut next = colebrook_step(re_for(d), ks / d, current);
    let mut count = 1;
    while (count < 5 || (current - next).abs() > 1e-6) && count < 100 {
        current = next;
        d = d_for(current);
        next = colebrook_step(re_for(d), ks / d, current);
        count += 1;
    }
    Ok(m(ensure_finite(d, "diameter")?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_core::{nearly_equal, Tolerances};
    use proptest::prelude::*;

    const KS: f64 = 0.001;

    #[test]
    fn velocity_and_reynolds_conversions() {
        // q = 0.05 m^3/s through d = 0.2 m: v = 4q/(pi d^2)
        let v = velocity(m3ps(0.05), m(0.2)).unwrap();
        assert!((v.value - 0.05 * 4.0 / (PI * 0.04)).abs() < 1e-12);
        let re = reynolds_number(mps(1.0), m(0.2), NU_WATER_M2PS);
        assert!((re - 0.2 / NU_WATER_M2PS).abs() < 1e-6);
    }

    #[test]
    fn velocity_rejects_non_positive_diameter() {
        assert!(velocity(m3ps(0.05), m(0.0)).is_err());
        assert!(velocity(m3ps(0.05), m(-0.2)).is_err());
    }

    #[test]
    fn diameter_head_loss_inverse_consistency() {
        // head_loss(q, diameter(q, hf, l), l) ~ hf
        let q = m3ps(0.05);
        let hf = 2.0;
        let l = m(500.0);
        let d = diameter(q, m(hf), l, m(KS)).unwrap();
        let back = head_loss(q, d, l, m(KS)).unwrap();
        let tol = Tolerances { abs: 0.0, rel: 1e-2 };
        assert!(
            nearly_equal(back.value, hf, tol),
            "hf = {}, got {}",
            hf,
            back.value
        );
    }

    #[test]
    fn discharge_recovers_head_loss() {
        let d = m(0.2);
        let l = m(500.0);
        let q = discharge(m(2.0), d, l, m(KS)).unwrap();
        let back = head_loss(q, d, l, m(KS)).unwrap();
        // Explicit friction approximation: a few percent is expected.
        assert!((back.value - 2.0).abs() / 2.0 < 0.05, "got {}", back.value);
    }

    #[test]
    fn zero_flow_has_zero_head_loss() {
        let hf = head_loss(m3ps(0.0), m(0.2), m(100.0), m(KS)).unwrap();
        assert_eq!(hf.value, 0.0);
    }

    #[test]
    fn invalid_arguments_rejected() {
        assert!(head_loss(m3ps(0.05), m(0.2), m(0.0), m(KS)).is_err());
        assert!(discharge(m(0.0), m(0.2), m(100.0), m(KS)).is_err());
        assert!(diameter(m3ps(0.0), m(2.0), m(100.0), m(KS)).is_err());
    }

    proptest! {
        // For fixed discharge and length, increasing diameter strictly
        // decreases head loss.
        #[test]
        fn head_loss_monotone_in_diameter(d1 in 0.05_f64..0.5, step in 0.01_f64..0.5) {
            let d2 = d1 + step;
            let q = m3ps(0.05);
            let l = m(500.0);
            let h1 = head_loss(q, m(d1), l, m(KS)).unwrap().value;
            let h2 = head_loss(q, m(d2), l, m(KS)).unwrap().value;
            prop_assert!(h2 < h1, "h({d1}) = {h1}, h({d2}) = {h2}");
        }
    }
}
