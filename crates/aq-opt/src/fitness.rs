//! The cost/penalty objective, to be maximized.

use crate::error::OptResult;
use aq_model::{HydraulicSolver, Network, NetworkTemplate};
use rayon::prelude::*;

/// Scaling constant coupling constraint violation to cost magnitude.
pub const PENALTY_SCALE: f64 = 5000.0;

/// Fitness of a solved network.
///
/// ```text
/// cost      = -sum(length * diameter)
/// violation = sum over short junctions of k * (pressure_demand - actual_head)
/// fitness   = cost - |cost * violation|
/// ```
///
/// The penalty couples violation multiplicatively to the current cost
/// magnitude, growing with both design cost and infeasibility. This exact
/// shape is load-bearing; confirm before altering it.
pub fn fitness_of(network: &Network) -> OptResult<f64> {
    let mut cost = 0.0;
    for pipe in network.pipes() {
        cost -= pipe.length() * pipe.diameter();
    }
    let mut violation = 0.0;
    for junction in network.junctions() {
        let head = junction.actual_head()?;
        if head < junction.pressure_demand {
            violation += PENALTY_SCALE * (junction.pressure_demand - head);
        }
    }
    Ok(cost - (cost * violation).abs())
}

/// Evaluate one candidate: fresh network from the template, positional
/// diameter assignment, one engine round trip, fitness extraction.
pub fn evaluate(
    template: &NetworkTemplate,
    genome: &[f64],
    solver: &dyn HydraulicSolver,
) -> OptResult<f64> {
    let mut network = Network::from_template(template)?;
    network.set_pipe_diameters(genome)?;
    solver.solve(&mut network)?;
    fitness_of(&network)
}

/// Evaluate a whole population in parallel.
///
/// Safe because every evaluation owns a private network and the solver
/// isolates its scratch files per invocation. The first failed evaluation
/// aborts the run (no retry policy).
pub fn evaluate_population(
    template: &NetworkTemplate,
    genomes: &[Vec<f64>],
    solver: &dyn HydraulicSolver,
) -> OptResult<Vec<f64>> {
    genomes
        .par_iter()
        .map(|genome| evaluate(template, genome, solver))
        .collect()
}
