use crate::AqError;

/// Absolute/relative tolerance pair for float comparisons.
///
/// The defaults suit the magnitudes the hydraulic formulas work in
/// (heads in meters, friction factors near 1e-2).
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// Compare two floats under an absolute-or-relative tolerance.
pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, AqError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(AqError::NonFinite { what, value: v })
    }
}
