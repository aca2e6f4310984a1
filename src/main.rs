//! Knight's Tour GA - Command Line Interface
//!
//! Searches for a knight's tour with a genetic algorithm, or benchmarks the
//! search over many seeds.

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use knight_tour_ga::benchmark::{Benchmark, BenchmarkConfig};
use knight_tour_ga::board::SQUARES;
use knight_tour_ga::genetic::{Evolution, GAConfig};

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "knight-tour-ga")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "Searches for a knight's tour with a genetic algorithm")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the tour
    Solve {
        #[command(flatten)]
        params: GaParams,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output tour to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print every square of the tour
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run many seeded searches and collect statistics
    Benchmark {
        #[command(flatten)]
        params: GaParams,

        /// Number of runs
        #[arg(short, long, default_value = "10")]
        runs: usize,

        /// Seed of the first run
        #[arg(long, default_value = "0")]
        first_seed: u64,

        /// Run seeds one after another instead of in parallel
        #[arg(long)]
        sequential: bool,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,
    },
}

/// GA parameters shared by both commands. Flags override the config file,
/// which overrides the defaults.
#[derive(Args)]
struct GaParams {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Population size
    #[arg(short, long)]
    population_size: Option<usize>,

    /// Tournament size for selection
    #[arg(short, long)]
    tournament_size: Option<usize>,

    /// Per-gene mutation probability
    #[arg(short, long)]
    mutation_rate: Option<f64>,

    /// Stop after this many generations and report the best tour found
    #[arg(short = 'g', long)]
    max_generations: Option<usize>,
}

impl GaParams {
    fn resolve(&self, base: GAConfig) -> GAConfig {
        let mut config = match &self.config {
            Some(path) => match GAConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error loading configuration: {}", e);
                    std::process::exit(1);
                }
            },
            None => base,
        };

        if let Some(size) = self.population_size {
            config.population_size = size;
        }
        if let Some(size) = self.tournament_size {
            config.tournament_size = size;
        }
        if let Some(rate) = self.mutation_rate {
            config.mutation_rate = rate;
        }
        if self.max_generations.is_some() {
            config.max_generations = self.max_generations;
        }
        config
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { params, seed, output, verbose } => {
            let mut config = params.resolve(GAConfig::default());
            if let Some(seed) = seed {
                config.seed = seed;
            }
            solve(config, output, verbose);
        }

        Commands::Benchmark { params, runs, first_seed, sequential, output } => {
            let ga = params.resolve(BenchmarkConfig::default().ga);
            let config = BenchmarkConfig {
                num_runs: runs,
                first_seed,
                parallel: !sequential,
                ga,
            };
            run_benchmark(config, &output);
        }
    }
}

fn solve(config: GAConfig, output: Option<PathBuf>, verbose: bool) {
    let mut evolution = match Evolution::new(config) {
        Ok(evolution) => evolution,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if verbose {
        println!("Configuration: {:?}", evolution.config());
    }
    println!("Searching for a knight's tour...");
    let start = Instant::now();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    while let Some(report) = evolution.step() {
        spinner.set_message(format!(
            "generation {}  best {}/{}  mean {:.1}",
            report.generation, report.best_fitness, SQUARES, report.mean_fitness
        ));
    }
    spinner.finish_and_clear();

    let elapsed = start.elapsed();
    let solved = evolution.is_solved();
    let generations = evolution.generation();
    let tour = evolution.into_best();

    println!("\n========== Results ==========");
    println!("Complete tour: {}", solved);
    println!("Fitness: {}/{}", tour.fitness, SQUARES);
    println!("Found in generation: {}", tour.generation);
    println!("Generations run: {}", generations);
    println!("Distinct squares on path: {}", tour.distinct_squares());
    println!("Time: {:.4}s", elapsed.as_secs_f64());

    if verbose {
        println!("\nPath:");
        for (i, square) in tour.path.iter().enumerate() {
            println!("  {:>2}: {}", i, square);
        }
        println!("Genome: {:?}", tour.genome);
    }

    if let Some(out_path) = output {
        let written = serde_json::to_string_pretty(&tour)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&out_path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("\nTour saved to {:?}", out_path),
            Err(e) => {
                eprintln!("Failed to write {:?}: {}", out_path, e);
                std::process::exit(1);
            }
        }
    }
}

fn run_benchmark(config: BenchmarkConfig, output: &Path) {
    println!(
        "Running {} searches (population {}, seeds {}..{})...",
        config.num_runs,
        config.ga.population_size,
        config.first_seed,
        config.first_seed + config.num_runs as u64
    );

    let mut benchmark = Benchmark::new(config);
    if let Err(e) = benchmark.run() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = std::fs::create_dir_all(output) {
        eprintln!("Failed to create output directory {:?}: {}", output, e);
        std::process::exit(1);
    }

    let results_path = output.join("results.csv");
    match benchmark.export_to_csv(&results_path) {
        Ok(()) => println!("\nResults exported to {:?}", results_path),
        Err(e) => eprintln!("Failed to export results: {}", e),
    }

    let stats_path = output.join("statistics.csv");
    match benchmark.export_statistics_csv(&stats_path) {
        Ok(()) => println!("Statistics exported to {:?}", stats_path),
        Err(e) => eprintln!("Failed to export statistics: {}", e),
    }

    let report = benchmark.generate_report();
    println!("\n{}", report);

    let report_path = output.join("report.txt");
    match std::fs::write(&report_path, &report) {
        Ok(()) => println!("Report saved to {:?}", report_path),
        Err(e) => eprintln!("Failed to save report: {}", e),
    }
}
