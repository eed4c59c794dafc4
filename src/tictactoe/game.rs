//! Moves, outcomes and the per-game session

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::board::{Board, Mark};
use crate::minimax;

/// A move: the (row, col) of the cell to fill with the mover's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }

    /// Move for a row-major cell index (0-8).
    ///
    /// Indices past 8 produce an off-board move, which the board rejects.
    pub fn from_index(index: usize) -> Self {
        Move {
            row: index / 3,
            col: index % 3,
        }
    }

    /// Row-major cell index, or `None` for an off-board move
    pub fn index(self) -> Option<usize> {
        (self.row < 3 && self.col < 3).then(|| self.row * 3 + self.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parse `"row col"`, `"row,col"`, `"(row, col)"` or a single cell index.
impl FromStr for Move {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidMoveFormat {
            input: s.to_string(),
        };

        let parts: Vec<usize> = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<usize>().map_err(|_| invalid()))
            .collect::<Result<_, _>>()?;

        match parts.as_slice() {
            [index] if *index < 9 => Ok(Move::from_index(*index)),
            [row, col] => Ok(Move::new(*row, *col)),
            _ => Err(invalid()),
        }
    }
}

/// Outcome of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Mark),
    Draw,
    InProgress,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(mark) => write!(f, "{mark} wins!"),
            Outcome::Draw => write!(f, "It's a tie!"),
            Outcome::InProgress => write!(f, "game in progress"),
        }
    }
}

/// Lifecycle of a single game. Nothing leaves a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won(Mark),
    Drawn,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won(_) | GameStatus::Drawn)
    }
}

/// A game in progress with its move history.
///
/// Unlike the bare [`Board`] rules, a `Game` refuses every move once the
/// game has been decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    moves: Vec<Move>,
}

impl Game {
    /// Create a new game from the empty board
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            moves: Vec::new(),
        }
    }

    /// Play a sequence of moves from the empty board
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Game::play`].
    pub fn replay(moves: impl IntoIterator<Item = Move>) -> Result<Self, crate::Error> {
        let mut game = Game::new();
        for mv in moves {
            game.play(mv)?;
        }
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn to_move(&self) -> Mark {
        self.board.to_move()
    }

    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    pub fn status(&self) -> GameStatus {
        match self.board.outcome() {
            Outcome::Win(mark) => GameStatus::Won(mark),
            Outcome::Draw => GameStatus::Drawn,
            Outcome::InProgress if self.moves.is_empty() => GameStatus::NotStarted,
            Outcome::InProgress => GameStatus::InProgress,
        }
    }

    /// Play a move for the side to move
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`](crate::Error::GameOver) once the game is
    /// decided, and [`Error::InvalidMove`](crate::Error::InvalidMove) for an
    /// occupied or off-board cell. The game is unchanged on error.
    pub fn play(&mut self, mv: Move) -> Result<Outcome, crate::Error> {
        if self.board.is_terminal() {
            warn!(%mv, "move rejected: game already over");
            return Err(crate::Error::GameOver);
        }

        let mark = self.board.to_move();
        self.board = self.board.apply_move(mv).inspect_err(|e| {
            warn!(%mv, error = %e, "move rejected");
        })?;
        self.moves.push(mv);
        debug!(%mv, %mark, ply = self.moves.len(), "move played");

        let outcome = self.board.outcome();
        if outcome.is_terminal() {
            info!(%outcome, plies = self.moves.len(), "game finished");
        }
        Ok(outcome)
    }

    /// Let the search choose and play the move for the side to move.
    ///
    /// Returns `Ok(None)` when the game is already over.
    pub fn play_best(&mut self) -> Result<Option<Move>, crate::Error> {
        let Some(mv) = minimax::best_move(&self.board) else {
            return Ok(None);
        };
        self.play(mv)?;
        Ok(Some(mv))
    }

    /// Start over from the empty board
    pub fn reset(&mut self) {
        debug!(plies = self.moves.len(), "game reset");
        *self = Game::new();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(indices: &[usize]) -> Vec<Move> {
        indices.iter().copied().map(Move::from_index).collect()
    }

    #[test]
    fn test_move_index_roundtrip() {
        for idx in 0..9 {
            assert_eq!(Move::from_index(idx).index(), Some(idx));
        }
        assert_eq!(Move::from_index(5), Move::new(1, 2));
    }

    #[test]
    fn test_off_board_move_has_no_index() {
        assert_eq!(Move::new(3, 0).index(), None);
        assert_eq!(Move::new(0, 3).index(), None);
        assert_eq!(Move::from_index(9).index(), None);

        let huge: Move = "6148914691236517206 0".parse().unwrap();
        assert_eq!(huge.index(), None);
        assert!(matches!(
            Board::new().apply_move(huge),
            Err(crate::Error::InvalidMove { .. })
        ));
    }

    #[test]
    fn test_move_from_str() {
        assert_eq!("1 2".parse::<Move>().unwrap(), Move::new(1, 2));
        assert_eq!("2,0".parse::<Move>().unwrap(), Move::new(2, 0));
        assert_eq!("(0, 1)".parse::<Move>().unwrap(), Move::new(0, 1));
        assert_eq!("4".parse::<Move>().unwrap(), Move::new(1, 1));

        for bad in ["", "9", "a b", "1 2 3", "-1 0"] {
            assert!(
                matches!(
                    bad.parse::<Move>(),
                    Err(crate::Error::InvalidMoveFormat { .. })
                ),
                "'{bad}' should not parse"
            );
        }
    }

    #[test]
    fn test_status_lifecycle() {
        let mut game = Game::new();
        assert_eq!(game.status(), GameStatus::NotStarted);

        game.play(Move::new(1, 1)).unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);

        // X takes the top row
        for mv in moves(&[3, 0, 5, 1, 7, 2]) {
            game.play(mv).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Won(Mark::X));
        assert!(game.status().is_terminal());
    }

    #[test]
    fn test_status_drawn() {
        let mut game = Game::replay(moves(&[0, 4, 1, 2, 6, 3, 5, 7])).unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);

        game.play(Move::from_index(8)).unwrap();
        assert_eq!(game.status(), GameStatus::Drawn);
        assert!(game.status().is_terminal());
        assert!(matches!(
            game.play(Move::new(0, 0)),
            Err(crate::Error::GameOver)
        ));
    }

    #[test]
    fn test_play_refuses_moves_after_win() {
        let mut game = Game::replay(moves(&[0, 3, 1, 4, 2])).unwrap();
        assert_eq!(game.outcome(), Outcome::Win(Mark::X));

        let before = game.clone();
        assert!(matches!(
            game.play(Move::new(2, 2)),
            Err(crate::Error::GameOver)
        ));
        assert_eq!(game, before);
    }

    #[test]
    fn test_invalid_move_leaves_game_unchanged() {
        let mut game = Game::replay(moves(&[4])).unwrap();
        let before = game.clone();

        assert!(matches!(
            game.play(Move::new(1, 1)),
            Err(crate::Error::InvalidMove { row: 1, col: 1 })
        ));
        assert!(matches!(
            game.play(Move::new(0, 5)),
            Err(crate::Error::InvalidMove { .. })
        ));
        assert_eq!(game, before);
    }

    #[test]
    fn test_reset() {
        let mut game = Game::replay(moves(&[0, 3, 1, 4, 2])).unwrap();
        game.reset();
        assert_eq!(game, Game::new());
        assert_eq!(game.status(), GameStatus::NotStarted);
        assert_eq!(game.to_move(), Mark::X);
    }

    #[test]
    fn test_play_best_completes_win() {
        // X X .
        // O O .
        // . . .
        let mut game = Game::replay(moves(&[0, 3, 1, 4])).unwrap();
        let mv = game.play_best().unwrap();
        assert_eq!(mv, Some(Move::new(0, 2)));
        assert_eq!(game.outcome(), Outcome::Win(Mark::X));
        assert_eq!(game.play_best().unwrap(), None);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Win(Mark::O).to_string(), "O wins!");
        assert_eq!(Outcome::Draw.to_string(), "It's a tie!");
    }
}
