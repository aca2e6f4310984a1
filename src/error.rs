//! Error type shared by the engine, its configuration and the tooling around it.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised before a search starts. Once an [`Evolution`](crate::genetic::Evolution)
/// exists, the search itself cannot fail.
#[derive(Debug, Error)]
pub enum GaError {
    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("tournament size must be at least 2, got {0}")]
    TournamentTooSmall(usize),

    #[error("tournament size {tournament} exceeds population size {population}")]
    TournamentTooLarge { tournament: usize, population: usize },

    #[error("mutation rate must lie in [0, 1], got {0}")]
    InvalidMutationRate(f64),

    #[error("generation limit must be positive")]
    ZeroGenerationLimit,

    #[error("log interval must be positive")]
    ZeroLogInterval,

    #[error("genome must contain {expected} genes, got {actual}")]
    GenomeLength { expected: usize, actual: usize },

    #[error("gene {index} has move code {code}, expected 0..=7")]
    InvalidMoveCode { index: usize, code: u8 },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
