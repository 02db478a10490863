use thiserror::Error;

/// Errors raised before mining starts: loading a dataset or configuring a miner.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid dataset: line {line}: `{token}` is not an integer item")]
    InvalidDataset { line: usize, token: String },

    #[error("complexity weight must be finite and non-negative, got {0}")]
    InvalidComplexityWeight(f64),

    #[error("noise tolerance must be within [0, 1], got {0}")]
    InvalidNoiseTolerance(f64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
