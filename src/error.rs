//! Error types
//!
//! Configuration conflicts are detected before any filtering starts. Everything
//! the library can fail with is collected in [`Error`].

use thiserror::Error;

/// Which length option another option was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthOption {
    Exact,
    Max,
}

impl std::fmt::Display for LengthOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => f.write_str("length"),
            Self::Max => f.write_str("max-length"),
        }
    }
}

/// Two or more policy options contradict each other
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    #[error("if 'length' is specified, neither 'min-length' nor 'max-length' should be supplied")]
    ExactWithBounds,

    #[error("'min-length' ({min}) cannot be larger than 'max-length' ({max})")]
    InvertedBounds { min: usize, max: usize },

    #[error("'uppercase' ({uppercase}) cannot be larger than '{bound}' ({length})")]
    UppercaseExceedsLength {
        uppercase: usize,
        bound: LengthOption,
        length: usize,
    },

    #[error("'{option}' string cannot be longer than '{bound}' ({length})")]
    AffixExceedsLength {
        option: &'static str,
        bound: LengthOption,
        length: usize,
    },

    #[error("options 'include' and 'include-exclusive' are mutually exclusive")]
    IncludeWithIncludeExclusive,

    #[error("character {ch:?} is excluded but also required by '{option}'")]
    ExcludedCharRequired { ch: char, option: &'static str },

    #[error("'threads' must be 1 or more")]
    NoWorkers,
}

/// Library error
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration conflict: {0}")]
    Conflict(#[from] ConflictError),

    #[error("failed to start worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
