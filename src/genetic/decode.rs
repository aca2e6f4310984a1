//! Genome decoding.
//!
//! Two policies share the knight move table:
//! - [`repair`] walks the genome and, when a gene points off the board or onto
//!   a visited square, substitutes the first legal alternate move in the order
//!   given by a [`RepairBias`]. It produces a full 64-entry path and the
//!   rewritten genome.
//! - [`walk`] / [`fitness`] replay the genome as-is and stop at the first
//!   illegal move. They never rewrite anything.

use crate::board::{MoveCode, Position, Visited, MOVE_COUNT};
use crate::genetic::genome::Genome;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Order in which alternate moves are scanned during repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairBias {
    /// Try `code + 1, code + 2, ...` (mod 8)
    Forward,
    /// Try `code - 1, code - 2, ...` (mod 8)
    Backward,
}

impl RepairBias {
    /// Fair coin flip between the two directions
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            RepairBias::Forward
        } else {
            RepairBias::Backward
        }
    }

    /// `+1` or `-1`
    pub fn step(self) -> i8 {
        match self {
            RepairBias::Forward => 1,
            RepairBias::Backward => -1,
        }
    }

    /// Alternate move code tried at `offset` (1..=7) away from `code`.
    pub fn alternate(self, code: MoveCode, offset: u8) -> MoveCode {
        match self {
            RepairBias::Forward => (code + offset) % MOVE_COUNT,
            RepairBias::Backward => (code + MOVE_COUNT - offset) % MOVE_COUNT,
        }
    }
}

/// Output of a repair decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    /// Input genome with every substituted move written back
    pub genome: Genome,
    /// Origin followed by one entry per gene
    pub path: Vec<Position>,
    /// Genes replaced by an alternate move
    pub rewrites: usize,
    /// Genes for which no legal move existed; the position repeats in `path`
    pub stalls: usize,
}

impl Repair {
    /// Last square of the path
    pub fn position(&self) -> Position {
        self.path.last().copied().unwrap_or(Position::ORIGIN)
    }
}

/// Decode `genome` from the origin, repairing illegal moves.
///
/// A stalled step appends the current square again, so the path always holds
/// `genome.len() + 1` positions.
pub fn repair(genome: &Genome, bias: RepairBias) -> Repair {
    let mut repaired = genome.clone();
    let mut position = Position::ORIGIN;
    let mut visited = Visited::starting_at(position);
    let mut path = Vec::with_capacity(genome.len() + 1);
    path.push(position);

    let mut rewrites = 0;
    let mut stalls = 0;

    for (i, &code) in genome.genes().iter().enumerate() {
        let candidate = position.jump(code);
        if visited.is_free(candidate) {
            position = candidate;
            visited.insert(position);
            path.push(position);
            continue;
        }

        let alternate = (1..MOVE_COUNT)
            .map(|offset| bias.alternate(code, offset))
            .find(|&alt| visited.is_free(position.jump(alt)));

        match alternate {
            Some(alt) => {
                repaired.set(i, alt);
                position = position.jump(alt);
                visited.insert(position);
                rewrites += 1;
            }
            None => stalls += 1,
        }
        path.push(position);
    }

    Repair {
        genome: repaired,
        path,
        rewrites,
        stalls,
    }
}

/// Outcome of replaying a genome without repair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walk {
    /// Distinct squares reached, origin included
    pub visited: usize,
    /// Square on which the walk stopped
    pub position: Position,
}

/// Replay `genome` from the origin, stopping at the first move that leaves
/// the board or revisits a square.
pub fn walk(genome: &Genome) -> Walk {
    let mut position = Position::ORIGIN;
    let mut visited = Visited::starting_at(position);

    for &code in genome.genes() {
        let candidate = position.jump(code);
        if !visited.is_free(candidate) {
            break;
        }
        position = candidate;
        visited.insert(position);
    }

    Walk {
        visited: visited.len(),
        position,
    }
}

/// Number of distinct squares visited before the first illegal move, in `1..=64`
pub fn fitness(genome: &Genome) -> usize {
    walk(genome).visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GENOME_LENGTH, SQUARES};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    /// A complete tour from the origin (Warnsdorff order)
    const FULL_TOUR: [MoveCode; GENOME_LENGTH] = [
        4, 3, 4, 5, 6, 5, 0, 3, 6, 0, 7, 0, 2, 1, 2, 4, 3, 4, 6, 0, 1, 7, 6, 3, 0, 3, 6, 6, 3, 6,
        6, 3, 0, 5, 2, 1, 4, 3, 0, 5, 2, 2, 5, 0, 3, 6, 0, 6, 4, 5, 2, 7, 6, 1, 2, 4, 5, 7, 0, 1,
        4, 6, 0,
    ];

    fn zeros() -> Genome {
        Genome::from_genes(vec![0; GENOME_LENGTH]).unwrap()
    }

    #[test]
    fn test_alternate_order() {
        let forward: Vec<_> = (1..8).map(|j| RepairBias::Forward.alternate(6, j)).collect();
        assert_eq!(forward, vec![7, 0, 1, 2, 3, 4, 5]);

        let backward: Vec<_> = (1..8).map(|j| RepairBias::Backward.alternate(1, j)).collect();
        assert_eq!(backward, vec![0, 7, 6, 5, 4, 3, 2]);
    }

    #[test]
    fn test_all_zero_genome_fitness() {
        // (0,0) + (-1,-2) leaves the board immediately
        let genome = zeros();
        assert_eq!(fitness(&genome), 1);
        assert_eq!(walk(&genome).position, Position::ORIGIN);
    }

    #[test]
    fn test_all_zero_genome_forward_repair() {
        let repair = repair(&zeros(), RepairBias::Forward);
        assert_eq!(repair.path.len(), SQUARES);
        assert_eq!(
            &repair.path[..6],
            &[
                Position::new(0, 0),
                Position::new(1, 2),
                Position::new(0, 4),
                Position::new(1, 6),
                Position::new(3, 7),
                Position::new(2, 5),
            ]
        );
        assert_eq!(&repair.genome.genes()[..5], &[4, 3, 4, 5, 0]);
        let distinct: HashSet<_> = repair.path.iter().collect();
        assert_eq!(distinct.len(), 32);
        assert_eq!(fitness(&repair.genome), 32);
    }

    #[test]
    fn test_all_zero_genome_backward_repair() {
        let repair = repair(&zeros(), RepairBias::Backward);
        assert_eq!(
            &repair.path[..6],
            &[
                Position::new(0, 0),
                Position::new(2, 1),
                Position::new(4, 0),
                Position::new(6, 1),
                Position::new(7, 3),
                Position::new(6, 5),
            ]
        );
        assert_eq!(&repair.genome.genes()[..5], &[5, 6, 5, 4, 3]);
        let distinct: HashSet<_> = repair.path.iter().collect();
        assert_eq!(distinct.len(), 44);
        assert_eq!(fitness(&repair.genome), 44);
    }

    #[test]
    fn test_full_tour_scores_64() {
        let genome = Genome::from_genes(FULL_TOUR.to_vec()).unwrap();
        assert_eq!(fitness(&genome), SQUARES);

        let repair = repair(&genome, RepairBias::Backward);
        assert_eq!(repair.genome, genome);
        assert_eq!(repair.rewrites, 0);
        assert_eq!(repair.stalls, 0);
        let distinct: HashSet<_> = repair.path.iter().collect();
        assert_eq!(distinct.len(), SQUARES);
    }

    #[test]
    fn test_repair_path_invariants() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..300 {
            let genome = Genome::random(&mut rng);
            let bias = RepairBias::random(&mut rng);
            let repair = repair(&genome, bias);

            assert_eq!(repair.path.len(), SQUARES);
            assert_eq!(repair.path[0], Position::ORIGIN);
            assert!(repair.path.iter().all(|p| p.is_on_board()));

            // only consecutive repeats (stalls) are allowed
            let mut seen = HashSet::new();
            for (i, p) in repair.path.iter().enumerate() {
                if !seen.insert(*p) {
                    assert_eq!(repair.path[i - 1], *p);
                }
            }
            assert_eq!(seen.len(), SQUARES - repair.stalls);
        }
    }

    #[test]
    fn test_repair_is_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..200 {
            let genome = Genome::random(&mut rng);
            let bias = RepairBias::random(&mut rng);
            let first = repair(&genome, bias);
            let second = repair(&first.genome, bias);

            assert_eq!(second.path, first.path);
            assert_eq!(second.genome, first.genome);
            assert_eq!(second.rewrites, 0);
        }
    }

    #[test]
    fn test_fitness_is_pure_and_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..300 {
            let genome = Genome::random(&mut rng);
            let before = genome.clone();
            let score = fitness(&genome);
            assert_eq!(genome, before);
            assert!((1..=SQUARES).contains(&score));
        }
    }

    #[test]
    fn test_repaired_genome_scores_until_first_stall() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..200 {
            let genome = Genome::random(&mut rng);
            let repair = repair(&genome, RepairBias::random(&mut rng));
            let walk = walk(&repair.genome);

            if repair.stalls == 0 {
                assert_eq!(walk.visited, SQUARES);
                assert_eq!(walk.position, repair.position());
            } else {
                let first_stall = repair
                    .path
                    .windows(2)
                    .position(|w| w[0] == w[1])
                    .unwrap();
                assert_eq!(walk.visited, first_stall + 1);
                assert_eq!(walk.position, repair.path[first_stall]);
            }
        }
    }
}
