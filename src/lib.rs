//! Tic-Tac-Toe with a perfect-play opponent
//!
//! This crate provides:
//! - An immutable board with the full rule set (turns, legal moves, wins, draws)
//! - Game sessions that record history and stop at the end of a game
//! - Exhaustive minimax move selection
//! - A terminal front end (`noughts` binary)
//!
//! ```
//! use noughts::{Board, Mark, Move, minimax};
//!
//! let board = Board::new()
//!     .apply_move(Move::new(0, 0))?
//!     .apply_move(Move::new(1, 0))?
//!     .apply_move(Move::new(0, 1))?
//!     .apply_move(Move::new(1, 1))?;
//!
//! assert_eq!(board.to_move(), Mark::X);
//! let mv = minimax::best_move(&board).expect("board is not terminal");
//! assert_eq!(mv, Move::new(0, 2));
//! assert_eq!(board.apply_move(mv)?.winner(), Some(Mark::X));
//! # Ok::<(), noughts::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod minimax;
pub mod tictactoe;

pub use error::{Error, Result};
pub use tictactoe::{Board, Cell, Game, GameStatus, Mark, Move, Outcome};
