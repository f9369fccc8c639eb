//! Darcy friction factor from the implicit Colebrook-White relation.

use aq_core::units::Length;
use aq_core::{AqError, AqResult};

/// Fixed-point seed for the friction factor.
const F_SEED: f64 = 0.02;

/// Convergence threshold on |Δf| between successive estimates.
const F_TOL: f64 = 1e-6;

/// Iterations always performed before the convergence check applies.
const MIN_ITERS: usize = 5;

/// Hard cap on fixed-point iterations.
const MAX_ITERS: usize = 100;

/// One Colebrook-White fixed-point step: recompute f from the previous
/// estimate.
#[inline]
pub(crate) fn colebrook_step(re: f64, rel_roughness: f64, f: f64) -> f64 {
    let log = -2.0 * (rel_roughness / 3.71 + 2.51 / (re * f.sqrt())).log10();
    1.0 / (log * log)
}

/// Run the fixed-point iteration, returning the estimate and the number of
/// steps taken.
pub(crate) fn colebrook_iterate(re: f64, rel_roughness: f64) -> (f64, usize) {
    let mut current = F_SEED;
    let mut next = colebrook_step(re, rel_roughness, current);
    let mut count = 0;
    while (count < MIN_ITERS || (current - next).abs() > F_TOL) && count < MAX_ITERS {
        count += 1;
        current = next;
        next = colebrook_step(re, rel_roughness, current);
    }
    (next, count)
}

/// Darcy friction factor via Colebrook-White, solved by fixed-point
/// iteration seeded at f = 0.02.
///
/// Converged when |Δf| < 1e-6 after at least 5 iterations, hard-capped at
/// 100 iterations. Past the cap the last estimate is returned without
/// signaling; that is a documented limitation of this solver, not an error.
pub fn friction_factor(re: f64, d: Length, ks: Length) -> AqResult<f64> {
    if d.value <= 0.0 {
        return Err(AqError::InvalidArg {
            what: "diameter must be positive",
        });
    }
    if ks.value < 0.0 {
        return Err(AqError::InvalidArg {
            what: "roughness cannot be negative",
        });
    }
    if re < 0.0 {
        return Err(AqError::InvalidArg {
            what: "Reynolds number cannot be negative",
        });
    }
    let (f, _) = colebrook_iterate(re, ks.value / d.value);
    Ok(f)
}
