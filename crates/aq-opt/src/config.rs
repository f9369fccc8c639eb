//! Search parameters, externally supplied.

use crate::error::{OptError, OptResult};
use serde::{Deserialize, Serialize};

/// Genetic-algorithm parameters for one optimization run.
///
/// Defaults mirror values that worked across test networks; they are not
/// claimed optimal and usually need tuning per problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GaConfig {
    /// Fixed generation budget; the only termination criterion.
    pub generations: usize,
    /// Individuals per generation.
    #[serde(default = "default_population")]
    pub population: usize,
    /// Top individuals eligible as parents each generation.
    #[serde(default = "default_parents")]
    pub parents: usize,
    /// Per-gene probability of mutating to a random catalog value.
    #[serde(default = "default_mutation_probability")]
    pub mutation_probability: f64,
    /// Best individuals carried over unchanged each generation.
    #[serde(default = "default_elitism")]
    pub elitism: usize,
    /// Ascending catalog of commercially available diameters, mm.
    #[serde(default = "default_catalog")]
    pub catalog: Vec<f64>,
    /// RNG seed; omit for an entropy seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_population() -> usize {
    100
}

fn default_parents() -> usize {
    5
}

fn default_mutation_probability() -> f64 {
    1e-7
}

fn default_elitism() -> usize {
    10
}

fn default_catalog() -> Vec<f64> {
    vec![
        55.4, 66.0, 79.2, 96.8, 110.2, 123.4, 141.0, 158.6, 176.2, 198.2, 220.4, 246.8, 277.6,
        312.8, 352.6, 396.6, 440.6, 493.6, 555.2,
    ]
}

impl GaConfig {
    pub fn new(generations: usize) -> Self {
        Self {
            generations,
            population: default_population(),
            parents: default_parents(),
            mutation_probability: default_mutation_probability(),
            elitism: default_elitism(),
            catalog: default_catalog(),
            seed: None,
        }
    }

    pub fn validate(&self) -> OptResult<()> {
        if self.generations == 0 {
            return Err(OptError::Config {
                what: "generations must be at least 1",
            });
        }
        if self.population == 0 {
            return Err(OptError::Config {
                what: "population must be at least 1",
            });
        }
        if self.parents == 0 || self.parents > self.population {
            return Err(OptError::Config {
                what: "parents must be in 1..=population",
            });
        }
        if self.elitism > self.population {
            return Err(OptError::Config {
                what: "elitism cannot exceed population",
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(OptError::Config {
                what: "mutation probability must be in [0, 1]",
            });
        }
        if self.catalog.is_empty() {
            return Err(OptError::Config {
                what: "diameter catalog cannot be empty",
            });
        }
        if self.catalog.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(OptError::Config {
                what: "diameter catalog values must be finite and non-negative",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_gets_defaults() {
        let config: GaConfig = serde_yaml::from_str("generations: 50").unwrap();
        assert_eq!(config.generations, 50);
        assert_eq!(config.population, 100);
        assert_eq!(config.parents, 5);
        assert_eq!(config.mutation_probability, 1e-7);
        assert_eq!(config.elitism, 10);
        assert_eq!(config.catalog.len(), 19);
        assert_eq!(config.catalog[0], 55.4);
        assert_eq!(config.seed, None);
        config.validate().unwrap();
    }

    #[test]
    fn validation_catches_bad_parameters() {
        let mut config = GaConfig::new(0);
        assert!(config.validate().is_err());
        config.generations = 10;
        config.validate().unwrap();

        config.parents = 0;
        assert!(config.validate().is_err());
        config.parents = 5;

        config.elitism = 1000;
        assert!(config.validate().is_err());
        config.elitism = 10;

        config.mutation_probability = 1.5;
        assert!(config.validate().is_err());
        config.mutation_probability = 0.01;

        config.catalog.clear();
        assert!(config.validate().is_err());
    }
}
