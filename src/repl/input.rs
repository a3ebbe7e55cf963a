//! Input loop
//!
//! Reads commands line by line, dispatches them through the registry and
//! prints their replies.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::error::Result;
use crate::repl::{CommandRegistry, Session};

/// Prompt printed before each line of input
pub const PROMPT: &str = "Pokedex > ";

/// Lowercases `text` and splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Runs the REPL until `exit` or end of input.
///
/// Command failures are printed as `Error: ...` and the loop continues;
/// only I/O failures on `input` or `output` end it with an error.
pub async fn run<R, W>(
    registry: &CommandRegistry,
    session: &mut Session,
    input: R,
    output: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let Some(command) = registry.get(name) else {
            writeln!(output, "Unknown command")?;
            continue;
        };

        debug!(command = %name, args = ?args, "dispatching command");
        match command.run(session, args).await {
            Ok(reply) => {
                for line in &reply.lines {
                    writeln!(output, "{}", line)?;
                }
                if reply.quit {
                    break;
                }
            }
            Err(err) => {
                warn!(command = %name, error = %err, "command failed");
                writeln!(output, "Error: {}", err)?;
            }
        }
    }

    Ok(())
}
