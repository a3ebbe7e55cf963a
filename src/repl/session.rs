//! REPL session state threaded through every command.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::api::PokeApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::pokedex::Pokedex;

/// Everything a command may read or change.
#[derive(Debug)]
pub struct Session {
    pub client: PokeApiClient,
    /// Page `map` shows next; None once the last page was shown
    pub next_page: Option<String>,
    /// Page `mapb` shows next; None while on the first page
    pub previous_page: Option<String>,
    pub pokedex: Pokedex,
    rng: StdRng,
}

impl Session {
    /// Creates a session positioned before the first location page.
    pub fn new(client: PokeApiClient, first_page: String, rng: StdRng) -> Self {
        Self {
            client,
            next_page: Some(first_page),
            previous_page: None,
            pokedex: Pokedex::new(),
            rng,
        }
    }

    /// Creates the client and session described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = PokeApiClient::from_config(config)?;
        let rng = match config.catch_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::new(client, config.first_page_url(), rng))
    }

    /// Uniform roll in `[0, 100)`.
    pub fn roll(&mut self) -> f64 {
        self.rng.random::<f64>() * 100.0
    }
}
