//! A genome together with its decoded state.

use crate::board::{Position, SQUARES};
use crate::genetic::decode::{self, RepairBias};
use crate::genetic::genome::Genome;
use rand::Rng;

/// Individual in the genetic algorithm population.
///
/// Path and fitness are caches filled by [`repair`](Individual::repair) and
/// [`score`](Individual::score); they only agree once both ran on the current genome.
#[derive(Debug, Clone)]
pub struct Individual {
    genome: Genome,
    position: Position,
    path: Vec<Position>,
    fitness: usize,
    bias: RepairBias,
}

impl Individual {
    /// Wrap `genome` with a freshly drawn repair bias
    pub fn new<R: Rng + ?Sized>(genome: Genome, rng: &mut R) -> Self {
        Self::with_bias(genome, RepairBias::random(rng))
    }

    pub fn with_bias(genome: Genome, bias: RepairBias) -> Self {
        Individual {
            genome,
            position: Position::ORIGIN,
            path: vec![Position::ORIGIN],
            fitness: 0,
            bias,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let genome = Genome::random(rng);
        Self::new(genome, rng)
    }

    /// Run the repair decode, replacing the genome with its repaired form and
    /// caching the resulting path. Returns the number of stalled steps.
    pub fn repair(&mut self) -> usize {
        let repair = decode::repair(&self.genome, self.bias);
        self.position = repair.position();
        self.genome = repair.genome;
        self.path = repair.path;
        repair.stalls
    }

    /// Run the fitness decode on the current genome and cache the result.
    pub fn score(&mut self) -> usize {
        let walk = decode::walk(&self.genome);
        self.position = walk.position;
        self.fitness = walk.visited;
        self.fitness
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn fitness(&self) -> usize {
        self.fitness
    }

    pub fn bias(&self) -> RepairBias {
        self.bias
    }

    /// Last score was a full tour
    pub fn is_complete(&self) -> bool {
        self.fitness == SQUARES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GENOME_LENGTH;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fresh_individual() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let individual = Individual::random(&mut rng);
        assert_eq!(individual.fitness(), 0);
        assert_eq!(individual.position(), Position::ORIGIN);
        assert_eq!(individual.path(), &[Position::ORIGIN]);
        assert_eq!(individual.genome().len(), GENOME_LENGTH);
    }

    #[test]
    fn test_repair_then_score() {
        let genome = Genome::from_genes(vec![0; GENOME_LENGTH]).unwrap();
        let mut individual = Individual::with_bias(genome, RepairBias::Forward);

        // unrepaired, the first move already leaves the board
        let mut raw = individual.clone();
        assert_eq!(raw.score(), 1);

        individual.repair();
        assert_eq!(individual.path().len(), 64);
        assert_eq!(individual.genome().genes()[0], 4);
        assert_eq!(individual.score(), 32);
        assert!(!individual.is_complete());
        assert_eq!(individual.bias(), RepairBias::Forward);
    }

    #[test]
    fn test_bias_is_drawn_per_individual() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let biases: Vec<_> = (0..64).map(|_| Individual::random(&mut rng).bias()).collect();
        assert!(biases.contains(&RepairBias::Forward));
        assert!(biases.contains(&RepairBias::Backward));
    }
}
