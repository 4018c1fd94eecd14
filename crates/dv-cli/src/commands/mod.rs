pub mod display;
pub mod fight;
pub mod play;

use std::io::{self, BufRead, StdinLock, Write};

use dv_fiction::GameError;

/// Whether the shell keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Why a command did not finish.
#[derive(Debug)]
pub enum Failure {
    /// The game refused. Reported, then play goes on.
    Game(GameError),
    /// The terminal went away.
    Io(io::Error),
}

impl From<GameError> for Failure {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Line reader over stdin.
pub struct Prompt {
    reader: StdinLock<'static>,
    line: String,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            reader: io::stdin().lock(),
            line: String::new(),
        }
    }

    /// Print `prompt` and read a trimmed line. `None` at end of input.
    pub fn read(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{prompt} ");
        io::stdout().flush()?;

        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.trim().to_string()))
    }
}
