//! Pokedex - A command-line Pokedex backed by PokeAPI
//!
//! Browses location areas, explores encounters and catches Pokemon, with
//! PokeAPI responses memoized in TTL caches reclaimed by background reapers.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pokedex;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::Cache;
pub use config::Config;
pub use repl::{CommandRegistry, Session};
