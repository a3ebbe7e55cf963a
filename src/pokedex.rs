//! Pokedex Module
//!
//! The in-memory collection of caught Pokemon and the catch roll.

use std::collections::BTreeMap;

use crate::models::Pokemon;

/// Catch chance never drops below this percentage.
pub const MIN_CATCH_CHANCE: f64 = 10.0;

/// Catch chance for a Pokemon with zero base experience.
pub const BASE_CATCH_CHANCE: f64 = 80.0;

/// Percentage points lost per point of base experience.
const EXPERIENCE_PENALTY: f64 = 0.3;

/// Chance, in percent, of catching a Pokemon with the given base experience.
pub fn catch_chance(base_experience: u32) -> f64 {
    (BASE_CATCH_CHANCE - f64::from(base_experience) * EXPERIENCE_PENALTY).max(MIN_CATCH_CHANCE)
}

/// Whether a roll in `[0, 100)` catches a Pokemon with the given base experience.
pub fn is_caught(base_experience: u32, roll: f64) -> bool {
    roll <= catch_chance(base_experience)
}

/// Caught Pokemon keyed by name, iterated in name order.
#[derive(Debug, Default)]
pub struct Pokedex {
    entries: BTreeMap<String, Pokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch, replacing any earlier record under the same name.
    pub fn insert(&mut self, name: impl Into<String>, pokemon: Pokemon) {
        self.entries.insert(name.into(), pokemon);
    }

    pub fn get(&self, name: &str) -> Option<&Pokemon> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
