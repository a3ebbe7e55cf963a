//! API Module
//!
//! PokeAPI access for the REPL commands.
//!
//! # Endpoints used
//! - `GET /location-area/?offset=..&limit=..` - Paged location areas
//! - `GET /location-area/{name}` - Encounters in one area
//! - `GET /pokemon/{name}` - Pokemon stats

pub mod client;

pub use client::PokeApiClient;
