//! Move-code genome.
//!
//! A genome is exactly [`GENOME_LENGTH`] move codes, one per transition of a
//! 64-square tour starting at the origin.

use crate::board::{MoveCode, GENOME_LENGTH, MOVE_COUNT};
use crate::error::GaError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed-length sequence of move codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<MoveCode>", into = "Vec<MoveCode>")]
pub struct Genome {
    genes: Vec<MoveCode>,
}

impl Genome {
    /// Draw every gene independently and uniformly from `0..MOVE_COUNT`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let genes = (0..GENOME_LENGTH)
            .map(|_| rng.gen_range(0..MOVE_COUNT))
            .collect();
        Genome { genes }
    }

    /// Build a genome from explicit move codes, checking length and range.
    pub fn from_genes(genes: Vec<MoveCode>) -> Result<Self, GaError> {
        if genes.len() != GENOME_LENGTH {
            return Err(GaError::GenomeLength {
                expected: GENOME_LENGTH,
                actual: genes.len(),
            });
        }
        if let Some((index, &code)) = genes.iter().enumerate().find(|&(_, &c)| c >= MOVE_COUNT) {
            return Err(GaError::InvalidMoveCode { index, code });
        }
        Ok(Genome { genes })
    }

    pub fn genes(&self) -> &[MoveCode] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Overwrite a single gene. Callers keep `code < MOVE_COUNT`.
    pub(crate) fn set(&mut self, index: usize, code: MoveCode) {
        debug_assert!(code < MOVE_COUNT);
        self.genes[index] = code;
    }

    /// Single-point crossover with a point drawn uniformly from `1..GENOME_LENGTH`,
    /// so both parents always contribute at least one gene.
    pub fn crossover<R: Rng + ?Sized>(&self, other: &Genome, rng: &mut R) -> Genome {
        let point = rng.gen_range(1..GENOME_LENGTH);
        self.crossover_at(other, point)
    }

    /// Child made of `self[..point]` followed by `other[point..]`.
    ///
    /// # Panics
    ///
    /// Panics if `point > GENOME_LENGTH`.
    pub fn crossover_at(&self, other: &Genome, point: usize) -> Genome {
        let mut genes = Vec::with_capacity(GENOME_LENGTH);
        genes.extend_from_slice(&self.genes[..point]);
        genes.extend_from_slice(&other.genes[point..]);
        Genome { genes }
    }

    /// Redraw each gene with probability `rate`. The new value may equal the
    /// old one. Returns how many genes were redrawn.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R, rate: f64) -> usize {
        let mut redrawn = 0;
        for gene in self.genes.iter_mut() {
            if rng.gen::<f64>() < rate {
                *gene = rng.gen_range(0..MOVE_COUNT);
                redrawn += 1;
            }
        }
        redrawn
    }
}

impl TryFrom<Vec<MoveCode>> for Genome {
    type Error = GaError;

    fn try_from(genes: Vec<MoveCode>) -> Result<Self, Self::Error> {
        Genome::from_genes(genes)
    }
}

impl From<Genome> for Vec<MoveCode> {
    fn from(genome: Genome) -> Self {
        genome.genes
    }
}
