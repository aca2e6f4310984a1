//! Population bookkeeping: repair, evaluation, tournament selection and
//! generational replacement.

use crate::genetic::genome::Genome;
use crate::genetic::individual::Individual;
use rand::seq::index;
use rand::Rng;
use std::cmp::Reverse;

/// Result of scoring a whole population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Highest fitness in the population
    pub best_fitness: usize,
    /// Index of the first individual reaching `best_fitness`
    pub best_index: usize,
    /// Average fitness
    pub mean_fitness: f64,
}

/// Fixed-size set of individuals plus the generation counter
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    size: usize,
    generation: usize,
}

impl Population {
    /// Random population at generation 1
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let individuals = (0..size).map(|_| Individual::random(rng)).collect();
        Population {
            individuals,
            size,
            generation: 1,
        }
    }

    /// Population at generation 1 made of the given individuals
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        let size = individuals.len();
        Population {
            individuals,
            size,
            generation: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Repair-decode every individual. Returns the total number of stalls.
    pub fn repair_all(&mut self) -> usize {
        self.individuals.iter_mut().map(Individual::repair).sum()
    }

    /// Score every individual in creation order. Ties keep the first one seen.
    /// `None` for an empty population.
    pub fn evaluate(&mut self) -> Option<Evaluation> {
        let mut best: Option<(usize, usize)> = None;
        let mut total = 0;

        for (i, individual) in self.individuals.iter_mut().enumerate() {
            let fitness = individual.score();
            total += fitness;
            if best.map_or(true, |(_, f)| fitness > f) {
                best = Some((i, fitness));
            }
        }

        best.map(|(best_index, best_fitness)| Evaluation {
            best_fitness,
            best_index,
            mean_fitness: total as f64 / self.individuals.len() as f64,
        })
    }

    /// Sample `k` distinct individuals and return the two fittest, fittest first.
    ///
    /// # Panics
    ///
    /// Panics unless `2 <= k <= self.len()`.
    pub fn tournament_select<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        k: usize,
    ) -> (&Individual, &Individual) {
        assert!(
            k >= 2 && k <= self.len(),
            "tournament of {} drawn from a population of {}",
            k,
            self.len()
        );

        let mut contenders = index::sample(rng, self.len(), k).into_vec();
        contenders.sort_by_key(|&i| Reverse(self.individuals[i].fitness()));

        (&self.individuals[contenders[0]], &self.individuals[contenders[1]])
    }

    /// Replace the whole population with offspring of tournament-selected
    /// parents and advance the generation counter.
    ///
    /// Each parent pair yields two children from independent crossovers; the
    /// second child of the final pair is dropped when the size is odd.
    pub fn reproduce<R: Rng + ?Sized>(&mut self, rng: &mut R, tournament_size: usize, mutation_rate: f64) {
        let mut next = Vec::with_capacity(self.size);

        while next.len() < self.size {
            let (mut first, mut second) = self.offspring(rng, tournament_size);
            first.mutate(rng, mutation_rate);
            second.mutate(rng, mutation_rate);

            next.push(Individual::new(first, rng));
            if next.len() < self.size {
                next.push(Individual::new(second, rng));
            }
        }

        self.individuals = next;
        self.generation += 1;
    }

    fn offspring<R: Rng + ?Sized>(&self, rng: &mut R, tournament_size: usize) -> (Genome, Genome) {
        let (a, b) = self.tournament_select(rng, tournament_size);
        let first = a.genome().crossover(b.genome(), rng);
        let second = b.genome().crossover(a.genome(), rng);
        (first, second)
    }
}
