//! Winning line analysis for Tic-Tac-Toe

use super::board::{Cell, Mark};

/// A line as three (row, col) coordinates
pub type Line = [(usize, usize); 3];

/// The 8 winning lines on the 3x3 board
pub const WINNING_LINES: [Line; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)], // rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)], // columns
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a mark has three in a row
    pub fn has_won(cells: &[[Cell; 3]; 3], mark: Mark) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| Self::owns_line(cells, mark, line))
    }

    /// All lines fully occupied by `mark`
    pub fn completed_lines(cells: &[[Cell; 3]; 3], mark: Mark) -> Vec<Line> {
        WINNING_LINES
            .iter()
            .filter(|line| Self::owns_line(cells, mark, line))
            .copied()
            .collect()
    }

    fn owns_line(cells: &[[Cell; 3]; 3], mark: Mark, line: &Line) -> bool {
        let target = mark.to_cell();
        line.iter().all(|&(row, col)| cells[row][col] == target)
    }
}
