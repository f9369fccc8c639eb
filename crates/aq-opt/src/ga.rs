//! Genetic-algorithm operators over diameter genomes.
//!
//! Steady-state scheme: the top individuals become the parent pool, elites
//! carry over unchanged, children come from single-point crossover of two
//! random parents followed by per-gene mutation to a random catalog value.

use crate::config::GaConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub(crate) struct GaEngine<'a> {
    config: &'a GaConfig,
    genome_len: usize,
    rng: StdRng,
}

impl<'a> GaEngine<'a> {
    /// The config must have passed [`GaConfig::validate`].
    pub fn new(config: &'a GaConfig, genome_len: usize) -> Self {
        debug_assert!(!config.catalog.is_empty());
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            genome_len,
            rng,
        }
    }

    fn random_gene(&mut self) -> f64 {
        let catalog = &self.config.catalog;
        catalog[self.rng.gen_range(0..catalog.len())]
    }

    fn random_genome(&mut self) -> Vec<f64> {
        (0..self.genome_len).map(|_| self.random_gene()).collect()
    }

    pub fn initial_population(&mut self) -> Vec<Vec<f64>> {
        (0..self.config.population)
            .map(|_| self.random_genome())
            .collect()
    }

    fn crossover(&mut self, a: &[f64], b: &[f64]) -> Vec<f64> {
        if self.genome_len < 2 {
            return a.to_vec();
        }
        let point = self.rng.gen_range(1..self.genome_len);
        let mut child = Vec::with_capacity(self.genome_len);
        child.extend_from_slice(&a[..point]);
        child.extend_from_slice(&b[point..]);
        child
    }

    fn mutate(&mut self, genome: &mut [f64]) {
        for gene in genome {
            if self.rng.gen_bool(self.config.mutation_probability) {
                *gene = self.random_gene();
            }
        }
    }

    /// Breed the next generation's children from a fitness-descending
    /// ranking. Elites are handled by the caller; this produces
    /// `population - elitism` children.
    pub fn breed(&mut self, ranked: &[(Vec<f64>, f64)]) -> Vec<Vec<f64>> {
        let pool = &ranked[..self.config.parents.min(ranked.len())];
        let children = self.config.population - self.config.elitism.min(self.config.population);
        let mut out = Vec::with_capacity(children);
        for _ in 0..children {
            let a = &pool[self.rng.gen_range(0..pool.len())].0;
            let b = &pool[self.rng.gen_range(0..pool.len())].0;
            let mut child = self.crossover(a, b);
            self.mutate(&mut child);
            out.push(child);
        }
        out
    }
}
