//! Knight's Tour Genetic Algorithm Library
//! 
//! Searches for a knight's tour of the 8×8 board (a path from the corner
//! that visits all 64 squares exactly once) with a genetic algorithm instead
//! of backtracking.
//! 
//! # Features
//! 
//! - Move-code genomes with single-point crossover and per-gene mutation
//! - Repair decoding that substitutes legal moves and rewrites the genome
//! - Non-repairing fitness decoding
//! - Tournament selection with full generational replacement
//! - Iterator-based driver with an optional generation ceiling
//! - Multi-seed benchmarking with CSV export
//! 
//! # Example
//! 
//! ```no_run
//! use knight_tour_ga::genetic::{Evolution, GAConfig};
//! 
//! let config = GAConfig {
//!     seed: 7,
//!     max_generations: Some(100_000),
//!     ..Default::default()
//! };
//! 
//! let tour = Evolution::new(config).unwrap().run();
//! 
//! println!("Fitness {} found in generation {}", tour.fitness, tour.generation);
//! for square in &tour.path {
//!     println!("{}", square);
//! }
//! ```

pub mod board;
pub mod error;
pub mod tour;
pub mod genetic;
pub mod benchmark;

pub use board::Position;
pub use error::GaError;
pub use tour::Tour;
