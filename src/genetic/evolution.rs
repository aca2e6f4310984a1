//! Generational driver.
//!
//! [`Evolution`] owns the population and the random source and advances one
//! generation per [`step`](Evolution::step):
//! repair every individual, score every individual, stop if some individual
//! visits all 64 squares, otherwise breed a replacement population.
//! It is also an [`Iterator`] over [`GenerationReport`]s, so callers can add
//! their own stopping policy on top of the optional generation ceiling.

use crate::board::SQUARES;
use crate::error::GaError;
use crate::genetic::config::GAConfig;
use crate::genetic::population::Population;
use crate::tour::Tour;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::iter::FusedIterator;
use std::time::Instant;

/// Summary of one scored generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    pub generation: usize,
    pub best_fitness: usize,
    pub mean_fitness: f64,
    /// Stalled repair steps summed over the population
    pub stalls: usize,
    /// This generation contains a complete tour
    pub solved: bool,
}

/// Genetic search for a knight's tour
pub struct Evolution {
    config: GAConfig,
    population: Population,
    rng: ChaCha8Rng,
    best: Tour,
    solved: bool,
    finished: bool,
    start: Instant,
}

impl Evolution {
    /// Validate `config` and build the first generation.
    pub fn new(config: GAConfig) -> Result<Self, GaError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let population = Population::new(config.population_size, &mut rng);

        Ok(Evolution {
            config,
            population,
            rng,
            best: Tour::new(),
            solved: false,
            finished: false,
            start: Instant::now(),
        })
    }

    /// Run one generation. `None` once a complete tour has been found or the
    /// generation ceiling has been spent.
    pub fn step(&mut self) -> Option<GenerationReport> {
        if self.finished {
            return None;
        }

        let generation = self.population.generation();
        let stalls = self.population.repair_all();
        let evaluation = self.population.evaluate()?;

        if evaluation.best_fitness > self.best.fitness {
            if let Some(best) = self.population.get(evaluation.best_index) {
                self.best = Tour::from_individual(best, generation);
                self.best.computation_time = self.start.elapsed().as_secs_f64();
            }
        }

        let report = GenerationReport {
            generation,
            best_fitness: evaluation.best_fitness,
            mean_fitness: evaluation.mean_fitness,
            stalls,
            solved: evaluation.best_fitness == SQUARES,
        };

        debug!(
            "[GA] Gen {} best {} mean {:.2} stalls {}",
            generation, report.best_fitness, report.mean_fitness, stalls
        );
        if generation % self.config.log_interval == 0 {
            info!(
                "[GA] Gen {}  Best fitness {}  Best so far {}  Elapsed {:.2}s",
                generation,
                report.best_fitness,
                self.best.fitness,
                self.start.elapsed().as_secs_f64()
            );
        }

        if report.solved {
            info!(
                "[GA] Complete tour found in generation {} after {:.2}s",
                generation,
                self.start.elapsed().as_secs_f64()
            );
            self.solved = true;
            self.finished = true;
        } else if self.config.max_generations.map_or(false, |limit| generation >= limit) {
            warn!(
                "[GA] Generation limit {} reached, best fitness {}/{}",
                generation, self.best.fitness, SQUARES
            );
            self.finished = true;
        } else {
            self.population.reproduce(
                &mut self.rng,
                self.config.tournament_size,
                self.config.mutation_rate,
            );
        }

        Some(report)
    }

    /// Run until a complete tour is found or the ceiling is reached and
    /// return the best tour seen.
    pub fn run(mut self) -> Tour {
        info!(
            "[GA] Searching with population {} (seed {})",
            self.config.population_size, self.config.seed
        );
        while self.step().is_some() {}
        self.into_best()
    }

    /// Best tour seen so far, by fitness; earliest wins ties
    pub fn best(&self) -> &Tour {
        &self.best
    }

    pub fn into_best(self) -> Tour {
        self.best
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current generation number
    pub fn generation(&self) -> usize {
        self.population.generation()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn config(&self) -> &GAConfig {
        &self.config
    }
}

impl Iterator for Evolution {
    type Item = GenerationReport;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

impl FusedIterator for Evolution {}
