//! Board state validation logic

use super::{
    board::{Board, Mark},
    lines::LineAnalyzer,
};

impl Board {
    /// Check if the board can arise through legal play from the empty board
    pub fn is_valid(&self) -> bool {
        let x_count = self.count(Mark::X);
        let o_count = self.count(Mark::O);

        // X opens, so X is level with O or one ahead
        if !(x_count == o_count || x_count == o_count + 1) {
            return false;
        }

        let x_wins = self.has_won(Mark::X);
        let o_wins = self.has_won(Mark::O);

        if x_wins && o_wins {
            return false; // Both can't win
        }

        // The winner must have moved last
        if x_wins && x_count != o_count + 1 {
            return false;
        }
        if o_wins && o_count != x_count {
            return false;
        }

        // Multiple winning lines that don't share a cell indicate play
        // continued after a win
        if x_wins && !self.winning_lines_share_cell(Mark::X) {
            return false;
        }
        if o_wins && !self.winning_lines_share_cell(Mark::O) {
            return false;
        }

        true
    }

    /// Check if all winning lines for a mark share at least one cell.
    /// This is necessary for multiple lines to be formed in a single move.
    pub fn winning_lines_share_cell(&self, mark: Mark) -> bool {
        let lines = LineAnalyzer::completed_lines(self.rows(), mark);

        // If fewer than 2 lines, trivially true
        if lines.len() < 2 {
            return true;
        }

        lines[0]
            .iter()
            .any(|cell| lines.iter().all(|line| line.contains(cell)))
    }
}
