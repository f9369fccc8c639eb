//! Minor (local) losses at diameter transitions.

use aq_core::units::constants::G_MPS2;
use aq_core::units::{m, Length, Velocity};

/// Loss coefficient for two adjoining diameters.
///
/// Zero when equal. Expansion (d2 > d1) uses `(1 - (d1/d2)^2)^2`.
/// Contraction with d2/d1 < 0.76 uses `0.42 * (1 - (d2/d1)^2)`; milder
/// contractions fall back to the symmetric expansion case with the
/// arguments swapped.
pub fn k_coefficient(d1: Length, d2: Length) -> f64 {
    let (d1, d2) = (d1.value, d2.value);
    if d1 == d2 {
        0.0
    } else if d2 > d1 {
        let r = d1 / d2;
        (1.0 - r * r) * (1.0 - r * r)
    } else {
        let ratio = d2 / d1;
        if ratio < 0.76 {
            0.42 * (1.0 - ratio * ratio)
        } else {
            k_coefficient(m(d2), m(d1))
        }
    }
}

/// Local energy loss across a transition, using the larger of the two
/// velocities.
pub fn local_loss(v1: Velocity, v2: Velocity, k: f64) -> Length {
    let v = v1.value.max(v2.value);
    m(k * v * v / (2.0 * G_MPS2))
}
