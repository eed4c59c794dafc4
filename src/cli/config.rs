//! Shared configuration types for CLI commands

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::tictactoe::Mark;

/// Common configuration shared across commands
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonConfig {
    /// Verbose output (debug logging for this crate)
    pub verbose: bool,
}

impl CommonConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "noughts=debug" } else { "warn" }
    }
}

/// Which mark a participant controls on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Side {
    X,
    O,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Mark::X,
            Side::O => Mark::O,
        }
    }
}

/// Interactive play configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Mark controlled by the human; the computer takes the other one
    pub human: Mark,

    /// Print the optimal moves before each human turn
    pub hints: bool,
}

impl PlayConfig {
    pub fn computer(&self) -> Mark {
        self.human.opponent()
    }
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            human: Mark::X,
            hints: false,
        }
    }
}
