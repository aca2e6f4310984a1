//! Genetic search engine.
//!
//! This module exports the genome, the two decoders, the population
//! operators and the generational driver.

pub mod config;
pub mod decode;
pub mod evolution;
pub mod genome;
pub mod individual;
pub mod population;

pub use config::GAConfig;
pub use decode::{fitness, repair, walk, Repair, RepairBias, Walk};
pub use evolution::{Evolution, GenerationReport};
pub use genome::Genome;
pub use individual::Individual;
pub use population::{Evaluation, Population};
