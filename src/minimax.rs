//! Exhaustive minimax search
//!
//! X maximizes [`Board::utility`] and O minimizes it. The whole remaining game
//! tree is searched on every call: no pruning and no memoization. A 3x3 board
//! has at most nine plies left, so the full tree from the empty board is
//! about half a million nodes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tictactoe::{Board, Mark, Move};

/// Minimax value of one legal move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveValue {
    #[serde(rename = "move")]
    pub mv: Move,
    pub value: i32,
}

/// Result of a search from one board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// First move in row-major order achieving `value`; `None` on terminal boards
    pub best: Option<Move>,
    pub value: i32,
    /// Boards visited, the root included
    pub nodes: u64,
}

/// A single search run, counting the nodes it visits
#[derive(Debug, Default)]
pub struct Search {
    nodes: u64,
}

impl Search {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Minimax value of `board`
    pub fn value(&mut self, board: &Board) -> i32 {
        self.nodes += 1;
        if board.is_terminal() {
            return board.utility();
        }

        let maximizing = board.to_move() == Mark::X;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in board.empty_cells() {
            let value = self.value(&board.successor(mv));
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }

        best
    }

    /// Value of every legal move in row-major order; empty on terminal boards
    pub fn evaluate_moves(&mut self, board: &Board) -> Vec<MoveValue> {
        if board.is_terminal() {
            return Vec::new();
        }
        board
            .empty_cells()
            .map(|mv| MoveValue {
                mv,
                value: self.value(&board.successor(mv)),
            })
            .collect()
    }

    /// Search `board` and pick the best move for the side to move.
    ///
    /// Ties keep the first move found; a later move only replaces the current
    /// choice when strictly better for the mover.
    pub fn run(&mut self, board: &Board) -> SearchReport {
        self.nodes += 1;
        let moves = self.evaluate_moves(board);
        match choose(board.to_move(), &moves) {
            Some(choice) => self.report(board, Some(choice.mv), choice.value),
            None => self.report(board, None, board.utility()),
        }
    }

    fn report(&self, board: &Board, best: Option<Move>, value: i32) -> SearchReport {
        debug!(
            board = %board.encode(),
            best = ?best,
            value,
            nodes = self.nodes,
            "minimax search complete"
        );
        SearchReport {
            best,
            value,
            nodes: self.nodes,
        }
    }
}

/// First move in `moves` with the best value for `mover`
pub fn choose(mover: Mark, moves: &[MoveValue]) -> Option<MoveValue> {
    let mut best: Option<MoveValue> = None;
    for &candidate in moves {
        let improves = match best {
            None => true,
            Some(current) if mover == Mark::X => candidate.value > current.value,
            Some(current) => candidate.value < current.value,
        };
        if improves {
            best = Some(candidate);
        }
    }
    best
}

/// Optimal move for the side to move, or `None` if the board is terminal
pub fn best_move(board: &Board) -> Option<Move> {
    Search::new().run(board).best
}

/// Minimax value of `board` under optimal play by both sides
pub fn value(board: &Board) -> i32 {
    Search::new().value(board)
}

/// Minimax value of every legal move
pub fn evaluate_moves(board: &Board) -> Vec<MoveValue> {
    Search::new().evaluate_moves(board)
}

/// Every move achieving the optimal value for the side to move
pub fn optimal_moves(board: &Board) -> Vec<Move> {
    let evaluations = evaluate_moves(board);
    let target = match board.to_move() {
        Mark::X => evaluations.iter().map(|e| e.value).max(),
        Mark::O => evaluations.iter().map(|e| e.value).min(),
    };
    let Some(target) = target else {
        return Vec::new();
    };
    evaluations
        .into_iter()
        .filter(|e| e.value == target)
        .map(|e| e.mv)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Cell;

    #[test]
    fn terminal_board_has_no_best_move() {
        let won: Board = "XXX OO. ...".parse().unwrap();
        let report = Search::new().run(&won);
        assert_eq!(report.best, None);
        assert_eq!(report.value, 1);
        assert_eq!(report.nodes, 1);

        let drawn: Board = "XOX XOO OXX".parse().unwrap();
        assert_eq!(best_move(&drawn), None);
        assert_eq!(value(&drawn), 0);
    }

    #[test]
    fn completes_own_row() {
        // X X .
        // . . .
        // . O O    X to move, wins at (0, 2)
        let board: Board = "XX. ... .OO".parse().unwrap();
        assert_eq!(board.to_move(), Mark::X);

        let mv = best_move(&board).unwrap();
        assert_eq!(mv, Move::new(0, 2));
        assert_eq!(board.apply_move(mv).unwrap().winner(), Some(Mark::X));
    }

    #[test]
    fn o_blocks_the_only_threat() {
        // X X .
        // . O .
        // . . .    O must block at (0, 2)
        let board: Board = "XX. .O. ...".parse().unwrap();
        assert_eq!(board.to_move(), Mark::O);
        assert_eq!(best_move(&board), Some(Move::new(0, 2)));
        assert_eq!(optimal_moves(&board), vec![Move::new(0, 2)]);
    }

    #[test]
    fn o_prefers_winning_over_blocking() {
        // X X .
        // O O .
        // X . .    O wins at (1, 2)
        let board: Board = "XX. OO. X..".parse().unwrap();
        assert_eq!(board.to_move(), Mark::O);
        let report = Search::new().run(&board);
        assert_eq!(report.best, Some(Move::new(1, 2)));
        assert_eq!(report.value, -1);
    }

    #[test]
    fn evaluate_moves_is_row_major() {
        let board: Board = "XX. .O. ...".parse().unwrap();
        let moves: Vec<Move> = evaluate_moves(&board).into_iter().map(|e| e.mv).collect();
        let expected: Vec<Move> = board.empty_cells().collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn search_counts_every_node() {
        // One empty cell left: root plus one child
        let rows = [
            [Cell::X, Cell::O, Cell::X],
            [Cell::X, Cell::O, Cell::O],
            [Cell::O, Cell::X, Cell::Empty],
        ];
        let board = Board::from_rows(rows);
        let report = Search::new().run(&board);
        assert_eq!(report.best, Some(Move::new(2, 2)));
        assert_eq!(report.nodes, 2);
    }

    #[test]
    fn optimal_moves_empty_on_terminal() {
        let board: Board = "XXX OO. ...".parse().unwrap();
        assert!(optimal_moves(&board).is_empty());
        assert!(evaluate_moves(&board).is_empty());
    }
}
