//! Tic-Tac-Toe rules: board, lines, moves and game sessions

pub mod board;
pub mod game;
pub mod lines;
pub mod validation;

pub use board::{Board, Cell, Mark};
pub use game::{Game, GameStatus, Move, Outcome};
pub use lines::{LineAnalyzer, WINNING_LINES};
