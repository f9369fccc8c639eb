//! The optimization driver.

use crate::config::GaConfig;
use crate::error::{OptError, OptResult};
use crate::fitness::{evaluate_population, fitness_of};
use crate::ga::GaEngine;
use aq_model::{HydraulicSolver, Network, NetworkTemplate};
use std::cmp::Ordering;
use tracing::{debug, info};

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Best diameter assignment found, one value per pipe in stored order.
    pub genome: Vec<f64>,
    /// Fitness of the best genome after re-validation.
    pub fitness: f64,
    /// Junction ids whose pressure demand the best design still misses.
    pub unsatisfied_junctions: Vec<u32>,
    /// Best fitness after each generation (index 0 = initial population).
    pub history: Vec<f64>,
}

impl Outcome {
    pub fn is_feasible(&self) -> bool {
        self.unsatisfied_junctions.is_empty()
    }
}

pub struct Optimizer {
    config: GaConfig,
}

impl Optimizer {
    pub fn new(config: GaConfig) -> OptResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the search to its fixed generation budget.
    ///
    /// Each evaluation is one engine round trip; a solver failure aborts
    /// the run with the underlying error (no retry, no backoff). The best
    /// genome is reapplied to a fresh network, re-solved and re-checked
    /// before being reported.
    pub fn run(
        &self,
        template: &NetworkTemplate,
        solver: &dyn HydraulicSolver,
    ) -> OptResult<Outcome> {
        let genome_len = template.pipes().len();
        if genome_len == 0 {
            return Err(OptError::Config {
                what: "network has no pipes to size",
            });
        }

        let mut engine = GaEngine::new(&self.config, genome_len);
        let genomes = engine.initial_population();
        let fitnesses = evaluate_population(template, &genomes, solver)?;
        let mut ranked = rank(genomes, fitnesses);

        let mut best = ranked[0].clone();
        let mut history = vec![best.1];
        info!(
            population = self.config.population,
            generations = self.config.generations,
            pipes = genome_len,
            "starting diameter optimization"
        );

        for generation in 0..self.config.generations {
            let children = engine.breed(&ranked);
            let child_fitnesses = evaluate_population(template, &children, solver)?;

            let elites = self.config.elitism.min(ranked.len());
            let mut next: Vec<(Vec<f64>, f64)> = ranked[..elites].to_vec();
            next.extend(children.into_iter().zip(child_fitnesses));
            next.sort_by(|a, b| compare_fitness(b.1, a.1));
            ranked = next;

            if compare_fitness(ranked[0].1, best.1) == Ordering::Greater {
                best = ranked[0].clone();
            }
            history.push(best.1);
            debug!(generation, best_fitness = best.1, "generation complete");
        }

        // Re-validate the winner on a fresh network.
        let mut network = Network::from_template(template)?;
        network.set_pipe_diameters(&best.0)?;
        solver.solve(&mut network)?;
        let fitness = fitness_of(&network)?;
        let mut unsatisfied = Vec::new();
        for junction in network.junctions() {
            if !junction.has_enough_head()? {
                unsatisfied.push(junction.id());
            }
        }
        info!(
            fitness,
            feasible = unsatisfied.is_empty(),
            "optimization finished"
        );

        Ok(Outcome {
            genome: best.0,
            fitness,
            unsatisfied_junctions: unsatisfied,
            history,
        })
    }
}

fn rank(genomes: Vec<Vec<f64>>, fitnesses: Vec<f64>) -> Vec<(Vec<f64>, f64)> {
    let mut ranked: Vec<(Vec<f64>, f64)> = genomes.into_iter().zip(fitnesses).collect();
    ranked.sort_by(|a, b| compare_fitness(b.1, a.1));
    ranked
}

fn compare_fitness(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
