//! Genetic algorithm parameters.

use crate::error::GaError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Genetic Algorithm configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GAConfig {
    /// Population size
    pub population_size: usize,
    /// Individuals sampled per tournament
    pub tournament_size: usize,
    /// Per-gene mutation probability
    pub mutation_rate: f64,
    /// Give up after this many generations and report the best tour found.
    /// `None` searches until a complete tour appears.
    pub max_generations: Option<usize>,
    /// Random seed
    pub seed: u64,
    /// Generations between progress log lines
    pub log_interval: usize,
}

impl Default for GAConfig {
    fn default() -> Self {
        GAConfig {
            population_size: 50,
            tournament_size: 3,
            mutation_rate: 0.05,
            max_generations: None,
            seed: 42,
            log_interval: 100,
        }
    }
}

impl GAConfig {
    /// Load a JSON configuration; absent keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| GaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GAConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size < 2 {
            return Err(GaError::PopulationTooSmall(self.population_size));
        }
        if self.tournament_size < 2 {
            return Err(GaError::TournamentTooSmall(self.tournament_size));
        }
        if self.tournament_size > self.population_size {
            return Err(GaError::TournamentTooLarge {
                tournament: self.tournament_size,
                population: self.population_size,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::InvalidMutationRate(self.mutation_rate));
        }
        if self.max_generations == Some(0) {
            return Err(GaError::ZeroGenerationLimit);
        }
        if self.log_interval == 0 {
            return Err(GaError::ZeroLogInterval);
        }
        Ok(())
    }
}
