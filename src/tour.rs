//! Tour representation handed out by the search.
//!
//! A [`Tour`] carries the two values a front-end needs (the ordered path and
//! the generation it was found in) plus the genome and timing that produced it.

use crate::board::{MoveCode, Position, SQUARES};
use crate::genetic::individual::Individual;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Best tour found by a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    /// Squares in visiting order, starting at the origin
    pub path: Vec<Position>,
    /// Move codes that produce `path`
    pub genome: Vec<MoveCode>,
    /// Fitness-decode score of `genome`
    pub fitness: usize,
    /// Generation in which this tour was found
    pub generation: usize,
    /// Seconds from the start of the search until this tour was found
    pub computation_time: f64,
}

impl Tour {
    /// Placeholder before any generation has been scored
    pub fn new() -> Self {
        Tour {
            path: vec![Position::ORIGIN],
            genome: Vec::new(),
            fitness: 0,
            generation: 0,
            computation_time: 0.0,
        }
    }

    /// Snapshot of a repaired and scored individual
    pub fn from_individual(individual: &Individual, generation: usize) -> Self {
        Tour {
            path: individual.path().to_vec(),
            genome: individual.genome().genes().to_vec(),
            fitness: individual.fitness(),
            generation,
            computation_time: 0.0,
        }
    }

    /// Every square visited according to the fitness decode
    pub fn is_solved(&self) -> bool {
        self.fitness == SQUARES
    }

    /// Check the path itself: 64 distinct on-board squares from the origin,
    /// each reached by a knight move.
    pub fn is_complete(&self) -> bool {
        self.path.len() == SQUARES
            && self.path.first() == Some(&Position::ORIGIN)
            && self.path.iter().all(|p| p.is_on_board())
            && self.distinct_squares() == SQUARES
            && self.path.windows(2).all(|w| w[0].is_knight_move_to(&w[1]))
    }

    pub fn distinct_squares(&self) -> usize {
        self.path.iter().collect::<HashSet<_>>().len()
    }

    /// Number of transitions in the path
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

impl Default for Tour {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tour (generation {})", self.generation)?;
        writeln!(f, "  Fitness: {}/{}", self.fitness, SQUARES)?;
        writeln!(f, "  Moves: {}", self.moves())?;
        writeln!(f, "  Distinct squares: {}", self.distinct_squares())?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)
    }
}
