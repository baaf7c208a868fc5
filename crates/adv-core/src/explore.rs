//! Walking a generated map
//!
//! A cursor over an adventure's rooms that understands a handful of typed
//! commands. Movement tokens go through the same alias table as exit
//! normalization, so `north`, `North` and `n` all work.

use crate::direction::canon_dir;
use crate::model::{Adventure, Room};

/// A parsed player command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Look,
    Where,
    Exits,
    /// Move along an exit; holds the canonical direction code
    Go(String),
    Empty,
}

impl Command {
    /// Parse one line of input.
    ///
    /// `quit` and `exit` end the session; use `go exit` to take an exit
    /// labeled `exit`.
    pub fn parse(line: &str) -> Command {
        let cmd = line.trim().to_lowercase();
        match cmd.as_str() {
            "" => Command::Empty,
            "quit" | "exit" => Command::Quit,
            "look" | "l" => Command::Look,
            "where" | "wut" => Command::Where,
            "exits" => Command::Exits,
            _ => {
                let token = cmd.strip_prefix("go ").unwrap_or(&cmd);
                Command::Go(canon_dir(token))
            }
        }
    }
}

/// What happened after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Moved into a new room
    Moved { to: String },
    /// No exit that way
    Blocked,
    /// Show the current room again
    Describe,
    /// Report the current room id
    Location(String),
    /// List the current room's exits
    ListExits(Vec<String>),
    Quit,
    Nothing,
}

/// Cursor over a repaired adventure
#[derive(Debug, Clone)]
pub struct Explorer<'a> {
    adventure: &'a Adventure,
    here: String,
}

impl<'a> Explorer<'a> {
    /// Start at the adventure's start room.
    ///
    /// Returns `None` when the start room does not exist.
    pub fn new(adventure: &'a Adventure) -> Option<Self> {
        adventure.room(&adventure.start_room)?;
        Some(Self {
            adventure,
            here: adventure.start_room.clone(),
        })
    }

    pub fn here(&self) -> &str {
        &self.here
    }

    pub fn current_room(&self) -> Option<&'a Room> {
        self.adventure.room(&self.here)
    }

    /// Human-readable exit summary for the current room
    pub fn exits_line(&self) -> String {
        match self.current_room() {
            Some(room) if !room.exits.is_empty() => room.exit_directions().join(", "),
            _ => "no exits".to_string(),
        }
    }

    /// Follow the first exit labeled `dir`, if any
    pub fn go(&mut self, dir: &str) -> Outcome {
        let target = self
            .current_room()
            .and_then(|room| room.exit_towards(dir))
            .map(|exit| exit.to.clone())
            .filter(|to| self.adventure.contains_room(to));

        match target {
            Some(to) => {
                tracing::trace!(from = %self.here, %to, dir, "moved");
                self.here = to.clone();
                Outcome::Moved { to }
            }
            None => Outcome::Blocked,
        }
    }

    /// Apply a parsed command
    pub fn apply(&mut self, command: &Command) -> Outcome {
        match command {
            Command::Quit => Outcome::Quit,
            Command::Look => Outcome::Describe,
            Command::Where => Outcome::Location(self.here.clone()),
            Command::Exits => Outcome::ListExits(
                self.current_room()
                    .map(|r| r.exit_directions().into_iter().map(str::to_string).collect())
                    .unwrap_or_default(),
            ),
            Command::Go(dir) => self.go(dir),
            Command::Empty => Outcome::Nothing,
        }
    }
}
