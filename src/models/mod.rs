//! PokeAPI response models
//!
//! This module defines the subset of PokeAPI's JSON schema the REPL reads.
//! The cache stores raw response bytes; these types are only used once a
//! body is decoded.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationArea, LocationPage, NamedResource, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
