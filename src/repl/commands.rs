//! REPL commands and the registry that dispatches them.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{PokedexError, Result};
use crate::models::LocationPage;
use crate::pokedex::{catch_chance, is_caught};
use crate::repl::Session;

/// Output of one command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Lines to print, in order
    pub lines: Vec<String>,
    /// Whether the input loop should end after printing
    pub quit: bool,
}

impl Reply {
    pub fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    pub fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }

    pub fn quit(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            quit: true,
        }
    }
}

/// A named REPL command.
#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    async fn run(&self, session: &mut Session, args: &[String]) -> Result<Reply>;
}

/// Command table built once at startup.
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Registry holding every built-in command, `help` included.
    pub fn new() -> Self {
        let mut registry = Self {
            commands: BTreeMap::new(),
        };
        registry.register(Box::new(Exit));
        registry.register(Box::new(Map));
        registry.register(Box::new(MapBack));
        registry.register(Box::new(Explore));
        registry.register(Box::new(Catch));
        registry.register(Box::new(Inspect));
        registry.register(Box::new(PokedexList));

        // help lists itself too, so its text is rendered last
        let mut usage: Vec<(&'static str, &'static str)> = registry
            .commands
            .values()
            .map(|cmd| (cmd.name(), cmd.description()))
            .collect();
        usage.push((HELP_NAME, HELP_DESCRIPTION));
        usage.sort_unstable_by_key(|(name, _)| *name);
        registry.register(Box::new(Help { usage }));

        registry
    }

    /// Adds or replaces a command under its own name. `help` is built from
    /// the commands registered before it, so the table is closed after `new`.
    fn register(&mut self, command: Box<dyn Command>) {
        self.commands.insert(command.name(), command);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|cmd| cmd.as_ref())
    }

    /// Command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn first_arg<'a>(args: &'a [String], what: &'static str) -> Result<&'a str> {
    args.first()
        .map(String::as_str)
        .ok_or(PokedexError::MissingArgument(what))
}

/// Prints a page of area names and moves the session's paging cursors.
fn show_page(session: &mut Session, page: LocationPage) -> Reply {
    session.next_page = page.next;
    session.previous_page = page.previous;
    Reply::lines(page.results.into_iter().map(|area| area.name).collect())
}

// == help ==
const HELP_NAME: &str = "help";
const HELP_DESCRIPTION: &str = "Displays a help message";

struct Help {
    usage: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl Command for Help {
    fn name(&self) -> &'static str {
        HELP_NAME
    }

    fn description(&self) -> &'static str {
        HELP_DESCRIPTION
    }

    async fn run(&self, _session: &mut Session, _args: &[String]) -> Result<Reply> {
        let mut lines = vec![
            "Welcome to the Pokedex!".to_string(),
            "Usage:".to_string(),
            String::new(),
        ];
        lines.extend(
            self.usage
                .iter()
                .map(|(name, description)| format!("{}: {}", name, description)),
        );
        Ok(Reply::lines(lines))
    }
}

// == exit ==
struct Exit;

#[async_trait]
impl Command for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exit the Pokedex"
    }

    async fn run(&self, _session: &mut Session, _args: &[String]) -> Result<Reply> {
        Ok(Reply::quit("Closing the Pokedex... Goodbye!"))
    }
}

// == map ==
struct Map;

#[async_trait]
impl Command for Map {
    fn name(&self) -> &'static str {
        "map"
    }

    fn description(&self) -> &'static str {
        "Displays the next page of location areas in the Pokemon world"
    }

    async fn run(&self, session: &mut Session, _args: &[String]) -> Result<Reply> {
        let Some(url) = session.next_page.clone() else {
            return Ok(Reply::line("you're on the last page"));
        };
        let page = session.client.location_page(&url).await?;
        Ok(show_page(session, page))
    }
}

// == mapb ==
struct MapBack;

#[async_trait]
impl Command for MapBack {
    fn name(&self) -> &'static str {
        "mapb"
    }

    fn description(&self) -> &'static str {
        "Displays the previous page of location areas in the Pokemon world"
    }

    async fn run(&self, session: &mut Session, _args: &[String]) -> Result<Reply> {
        let Some(url) = session.previous_page.clone() else {
            return Ok(Reply::line("you're on the first page"));
        };
        let page = session.client.location_page(&url).await?;
        Ok(show_page(session, page))
    }
}

// == explore ==
struct Explore;

#[async_trait]
impl Command for Explore {
    fn name(&self) -> &'static str {
        "explore"
    }

    fn description(&self) -> &'static str {
        "Displays the Pokemon that may be encountered in a given area"
    }

    async fn run(&self, session: &mut Session, args: &[String]) -> Result<Reply> {
        let area_name = first_arg(args, "location")?;
        let area = session.client.location_area(area_name).await?;

        let mut lines = vec![
            format!("Exploring {}...", area_name),
            "Found Pokemon:".to_string(),
        ];
        lines.extend(area.pokemon_names().map(|name| format!(" - {}", name)));
        Ok(Reply::lines(lines))
    }
}

// == catch ==
struct Catch;

#[async_trait]
impl Command for Catch {
    fn name(&self) -> &'static str {
        "catch"
    }

    fn description(&self) -> &'static str {
        "Throws a Pokeball at a Pokemon and adds it to the Pokedex when caught"
    }

    async fn run(&self, session: &mut Session, args: &[String]) -> Result<Reply> {
        let name = first_arg(args, "pokemon")?;
        let pokemon = session.client.pokemon(name).await?;

        let base_experience = pokemon.base_experience.unwrap_or_default();
        let roll = session.roll();
        debug!(
            pokemon = %name,
            chance = catch_chance(base_experience),
            roll,
            "catch roll"
        );

        let mut lines = vec![format!("Throwing a Pokeball at {}...", name)];
        if is_caught(base_experience, roll) {
            lines.push(format!("{} was caught!", name));
            session.pokedex.insert(name, pokemon);
        } else {
            lines.push(format!("{} escaped!", name));
        }
        Ok(Reply::lines(lines))
    }
}

// == inspect ==
struct Inspect;

#[async_trait]
impl Command for Inspect {
    fn name(&self) -> &'static str {
        "inspect"
    }

    fn description(&self) -> &'static str {
        "Prints the name, height, weight, stats and types of a caught Pokemon"
    }

    async fn run(&self, session: &mut Session, args: &[String]) -> Result<Reply> {
        let name = first_arg(args, "pokemon")?;
        let pokemon = session
            .pokedex
            .get(name)
            .ok_or_else(|| PokedexError::NotCaught(name.to_string()))?;

        let mut lines = vec![
            format!("Name: {}", name),
            format!("Height: {}", pokemon.height),
            format!("Weight: {}", pokemon.weight),
            "Stats:".to_string(),
        ];
        lines.extend(
            pokemon
                .stats
                .iter()
                .map(|stat| format!("  -{}: {}", stat.stat.name, stat.base_stat)),
        );
        lines.push("Types:".to_string());
        lines.extend(
            pokemon
                .types
                .iter()
                .map(|slot| format!("  - {}", slot.kind.name)),
        );
        Ok(Reply::lines(lines))
    }
}

// == pokedex ==
struct PokedexList;

#[async_trait]
impl Command for PokedexList {
    fn name(&self) -> &'static str {
        "pokedex"
    }

    fn description(&self) -> &'static str {
        "Lists the names of every Pokemon caught so far"
    }

    async fn run(&self, session: &mut Session, _args: &[String]) -> Result<Reply> {
        if session.pokedex.is_empty() {
            return Ok(Reply::line("Your pokedex is empty. Catch some pokemons!"));
        }

        let mut lines = vec!["Your Pokedex:".to_string()];
        lines.extend(session.pokedex.names().map(|name| format!(" - {}", name)));
        Ok(Reply::lines(lines))
    }
}
