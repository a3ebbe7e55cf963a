//! Location DTOs
//!
//! Paged location-area listings and per-area encounter tables.

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another PokeAPI resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of `GET /location-area/?offset=..&limit=..`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPage {
    /// Total number of location areas
    pub count: u32,
    /// URL of the following page, None on the last page
    pub next: Option<String>,
    /// URL of the preceding page, None on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// Response body of `GET /location-area/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArea {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

impl LocationArea {
    /// Names of every Pokemon that can be encountered here, in API order.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}
