//! REPL Module
//!
//! The interactive layer: input normalisation, the command registry, the
//! per-session state and the input loop.

mod commands;
mod input;
mod session;

pub use commands::{Command, CommandRegistry, Reply};
pub use input::{clean_input, run, PROMPT};
pub use session::Session;
