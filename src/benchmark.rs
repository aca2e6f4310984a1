//! Benchmarking module for the knight's tour search.
//!
//! Runs the genetic algorithm over a range of seeds, collects per-run
//! results and aggregates them into statistics and a text report.

use crate::error::GaError;
use crate::genetic::{Evolution, GAConfig};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

/// Result of a single seeded run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Seed of the run
    pub seed: u64,
    /// Whether a complete tour was found
    pub solved: bool,
    /// Best fitness reached
    pub fitness: usize,
    /// Generations executed (the solving generation when solved)
    pub generations: usize,
    /// Wall-clock time in seconds
    pub time: f64,
}

/// Aggregated statistics over all runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Number of runs
    pub num_runs: usize,
    /// Number of runs that found a complete tour
    pub num_solved: usize,
    /// Fraction of solved runs
    pub success_rate: f64,
    /// Average generations to solution (solved runs only)
    pub avg_generations: Option<f64>,
    /// Standard deviation of generations to solution
    pub std_generations: Option<f64>,
    /// Fewest generations to solution
    pub min_generations: Option<f64>,
    /// Most generations to solution
    pub max_generations: Option<f64>,
    /// Average best fitness over all runs
    pub avg_fitness: f64,
    /// Average time per run
    pub avg_time: f64,
    /// Total time
    pub total_time: f64,
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of seeded runs
    pub num_runs: usize,
    /// Seed of the first run; run `i` uses `first_seed + i`
    pub first_seed: u64,
    /// Run seeds in parallel
    pub parallel: bool,
    /// Parameters shared by every run (its seed is ignored)
    pub ga: GAConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            num_runs: 10,
            first_seed: 0,
            parallel: true,
            ga: GAConfig {
                max_generations: Some(100_000),
                ..Default::default()
            },
        }
    }
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
    records: Vec<RunRecord>,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark {
            config,
            records: Vec::new(),
        }
    }

    /// Execute every configured run and record the results.
    pub fn run(&mut self) -> Result<&[RunRecord], GaError> {
        self.config.ga.validate()?;

        let seeds: Vec<u64> = (0..self.config.num_runs as u64)
            .map(|i| self.config.first_seed + i)
            .collect();
        let ga = &self.config.ga;

        let records: Vec<RunRecord> = if self.config.parallel {
            seeds
                .par_iter()
                .map(|&seed| run_seed(ga, seed))
                .collect::<Result<Vec<_>, GaError>>()?
        } else {
            seeds
                .iter()
                .map(|&seed| run_seed(ga, seed))
                .collect::<Result<Vec<_>, GaError>>()?
        };

        self.records.extend(records);
        Ok(&self.records)
    }

    /// Aggregate the recorded runs. `None` before any run.
    pub fn compute_statistics(&self) -> Option<RunStatistics> {
        if self.records.is_empty() {
            return None;
        }

        let num_runs = self.records.len();
        let generations: Vec<f64> = self.records.iter()
            .filter(|r| r.solved)
            .map(|r| r.generations as f64)
            .collect();
        let fitnesses: Vec<f64> = self.records.iter().map(|r| r.fitness as f64).collect();
        let times: Vec<f64> = self.records.iter().map(|r| r.time).collect();

        let num_solved = generations.len();
        let solved = generations.as_slice();

        let (avg_generations, std_generations, min_generations, max_generations) = if num_solved > 0 {
            let std = if num_solved > 1 { solved.std_dev() } else { 0.0 };
            (
                Some(solved.mean()),
                Some(std),
                Some(solved.iter().cloned().fold(f64::INFINITY, f64::min)),
                Some(solved.iter().cloned().fold(0.0, f64::max)),
            )
        } else {
            (None, None, None, None)
        };

        Some(RunStatistics {
            num_runs,
            num_solved,
            success_rate: num_solved as f64 / num_runs as f64,
            avg_generations,
            std_generations,
            min_generations,
            max_generations,
            avg_fitness: fitnesses.as_slice().mean(),
            avg_time: times.as_slice().mean(),
            total_time: times.iter().sum(),
        })
    }

    /// Export results to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for record in &self.records {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Export statistics to CSV
    pub fn export_statistics_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        if let Some(stats) = self.compute_statistics() {
            writer.serialize(stats)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("     Knight's Tour GA Benchmark Report\n");
        report.push_str("========================================\n\n");
        report.push_str(&format!(
            "Generated: {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        report.push_str(&format!(
            "Population: {}  Tournament: {}  Mutation rate: {}  Generation limit: {}\n\n",
            self.config.ga.population_size,
            self.config.ga.tournament_size,
            self.config.ga.mutation_rate,
            self.config.ga.max_generations
                .map(|g| g.to_string())
                .unwrap_or_else(|| "none".to_string())
        ));

        let fmt = |v: Option<f64>| v.map(|x| format!("{:.1}", x)).unwrap_or_else(|| "-".to_string());

        if let Some(stats) = self.compute_statistics() {
            report.push_str(&format!(
                "Solved: {}/{} ({:.1}%)\n",
                stats.num_solved, stats.num_runs, stats.success_rate * 100.0
            ));
            report.push_str(&format!(
                "Generations to solution: avg {}  std {}  min {}  max {}\n",
                fmt(stats.avg_generations),
                fmt(stats.std_generations),
                fmt(stats.min_generations),
                fmt(stats.max_generations)
            ));
            report.push_str(&format!("Average best fitness: {:.2}\n", stats.avg_fitness));
            report.push_str(&format!(
                "Average time: {:.4}s  Total time: {:.4}s\n",
                stats.avg_time, stats.total_time
            ));
        } else {
            report.push_str("No runs recorded.\n");
        }

        report.push('\n');
        report.push_str(&format!("{:<10} {:>8} {:>8} {:>12} {:>10}\n",
            "Seed", "Solved", "Fitness", "Generations", "Time"));
        report.push_str("-".repeat(52).as_str());
        report.push('\n');
        for record in &self.records {
            report.push_str(&format!("{:<10} {:>8} {:>8} {:>12} {:>10.4}\n",
                record.seed, record.solved, record.fitness, record.generations, record.time));
        }

        report
    }

    /// Get all results
    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }
}

fn run_seed(ga: &GAConfig, seed: u64) -> Result<RunRecord, GaError> {
    let config = GAConfig { seed, ..ga.clone() };
    let start = Instant::now();

    let mut evolution = Evolution::new(config)?;
    let generations = evolution.by_ref().count();
    let solved = evolution.is_solved();
    let tour = evolution.into_best();

    let record = RunRecord {
        seed,
        solved,
        fitness: tour.fitness,
        generations,
        time: start.elapsed().as_secs_f64(),
    };
    log::info!(
        "Run seed {}: solved {} fitness {} after {} generations",
        seed, record.solved, record.fitness, record.generations
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(parallel: bool) -> BenchmarkConfig {
        BenchmarkConfig {
            num_runs: 3,
            first_seed: 100,
            parallel,
            ga: GAConfig {
                population_size: 20,
                max_generations: Some(30),
                ..Default::default()
            },
        }
    }

    fn record(seed: u64, solved: bool, generations: usize) -> RunRecord {
        RunRecord {
            seed,
            solved,
            fitness: if solved { 64 } else { 40 },
            generations,
            time: 0.5,
        }
    }

    #[test]
    fn test_benchmark_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.num_runs, 10);
        assert_eq!(config.ga.max_generations, Some(100_000));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut parallel = Benchmark::new(small_config(true));
        let mut sequential = Benchmark::new(small_config(false));
        parallel.run().unwrap();
        sequential.run().unwrap();

        assert_eq!(parallel.records().len(), 3);
        for (a, b) in parallel.records().iter().zip(sequential.records()) {
            assert_eq!((a.seed, a.solved, a.fitness, a.generations), (b.seed, b.solved, b.fitness, b.generations));
            assert!(a.generations >= 1 && a.generations <= 30);
        }
        let seeds: Vec<_> = parallel.records().iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![100, 101, 102]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = small_config(false);
        config.ga.tournament_size = 50;
        assert!(Benchmark::new(config).run().is_err());
    }

    #[test]
    fn test_statistics() {
        let mut benchmark = Benchmark::new(small_config(false));
        assert!(benchmark.compute_statistics().is_none());

        benchmark.records = vec![
            record(0, true, 10),
            record(1, true, 20),
            record(2, true, 30),
            record(3, false, 30),
        ];
        let stats = benchmark.compute_statistics().unwrap();
        assert_eq!(stats.num_runs, 4);
        assert_eq!(stats.num_solved, 3);
        assert!((stats.success_rate - 0.75).abs() < 1e-12);
        assert!((stats.avg_generations.unwrap() - 20.0).abs() < 1e-9);
        assert!((stats.std_generations.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(stats.min_generations, Some(10.0));
        assert_eq!(stats.max_generations, Some(30.0));
        assert!((stats.avg_fitness - 58.0).abs() < 1e-9);
        assert!((stats.total_time - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_statistics_without_solutions() {
        let mut benchmark = Benchmark::new(small_config(false));
        benchmark.records = vec![record(0, false, 30)];
        let stats = benchmark.compute_statistics().unwrap();
        assert_eq!(stats.num_solved, 0);
        assert!(stats.avg_generations.is_none());
        assert!(benchmark.generate_report().contains("Solved: 0/1"));
    }

    #[test]
    fn test_csv_export() {
        let mut benchmark = Benchmark::new(small_config(false));
        benchmark.records = vec![record(0, true, 12), record(1, false, 30)];

        let dir = std::env::temp_dir().join("knight_tour_ga_benchmark_test");
        std::fs::create_dir_all(&dir).unwrap();
        let results = dir.join("results.csv");
        let stats = dir.join("statistics.csv");

        benchmark.export_to_csv(&results).unwrap();
        benchmark.export_statistics_csv(&stats).unwrap();

        let mut reader = csv::Reader::from_path(&results).unwrap();
        let back: Vec<RunRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(back, benchmark.records);

        let content = std::fs::read_to_string(&stats).unwrap();
        assert!(content.starts_with("num_runs,num_solved,success_rate"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
