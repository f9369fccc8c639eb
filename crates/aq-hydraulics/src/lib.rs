//! aq-hydraulics: pure, stateless pressurized-pipe equations.
//!
//! Closed-form and iterative formulas for friction factor, head loss,
//! diameter sizing and minor losses, used for single-pipe design
//! calculations independently of the external hydraulic engine.
//!
//! Public APIs take uom SI quantities; the formulas themselves work on the
//! raw f64 values.

pub mod flow;
pub mod friction;
pub mod minor;

pub use flow::{diameter, discharge, energy_slope, head_loss, reynolds_number, velocity};
pub use friction::friction_factor;
pub use minor::{k_coefficient, local_loss};
