//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while constructing a response cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// TTL must be a positive duration
    #[error("Invalid TTL: cache entries need a positive time-to-live")]
    InvalidTtl,

    /// The reaper needs a tokio runtime to run on
    #[error("No tokio runtime available to run the cache reaper")]
    NoRuntime,
}

// == Pokedex Error Enum ==
/// Unified error type for REPL commands and PokeAPI lookups.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Transport-level HTTP failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// PokeAPI answered with a non-success status
    #[error("response failed with status code {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body did not match the expected shape
    #[error("failed to parse JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A command was invoked without its required argument
    #[error("missing {0} parameter")]
    MissingArgument(&'static str),

    /// `inspect` was asked about a Pokemon that is not in the Pokedex
    #[error("you have not caught {0}")]
    NotCaught(String),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache construction failed
    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
