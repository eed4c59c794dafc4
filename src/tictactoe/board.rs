//! Board representation and rule queries

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{
    game::{Move, Outcome},
    lines::LineAnalyzer,
};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// One of the two players' marks. X always opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert mark to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// An immutable 3x3 board.
///
/// The side to move is never stored; it is derived from the mark counts, so
/// any two boards with the same cells are the same position. Every
/// transition returns a fresh `Board` and leaves the receiver untouched,
/// which is what lets the search explore hypothetical futures from a shared
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    /// The all-empty starting board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; 3]; 3],
        }
    }

    /// Build a board from raw rows without checking the count invariant.
    ///
    /// Use [`Board::is_valid`] to find out whether the arrangement can arise
    /// through legal play.
    pub fn from_rows(cells: [[Cell; 3]; 3]) -> Self {
        Board { cells }
    }

    /// The raw rows of the board
    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    /// Get the cell at (row, col), or `None` when off the board
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// All cells in row-major order together with their coordinates
    pub fn cells(&self) -> impl Iterator<Item = (Move, Cell)> + '_ {
        (0..9).map(move |idx| {
            let mv = Move::from_index(idx);
            (mv, self.cells[mv.row][mv.col])
        })
    }

    /// Number of cells holding `mark`
    pub fn count(&self, mark: Mark) -> usize {
        let target = mark.to_cell();
        self.cells.iter().flatten().filter(|&&c| c == target).count()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.count(Mark::X) + self.count(Mark::O)
    }

    /// The mark whose turn it is.
    ///
    /// X moves whenever it has no more marks than O. This is total: on a
    /// terminal board the answer is meaningless but still defined.
    pub fn to_move(&self) -> Mark {
        if self.count(Mark::X) <= self.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// Empty cells in row-major order, without allocating
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells()
            .filter(|&(_, cell)| cell == Cell::Empty)
            .map(|(mv, _)| mv)
    }

    /// The set of legal moves: every empty cell.
    ///
    /// The set is empty iff the board is full. A won board that still has
    /// empty cells reports them; callers that must stop at a win check
    /// [`Board::is_terminal`] (the [`Game`](super::Game) session does).
    pub fn legal_moves(&self) -> HashSet<Move> {
        self.empty_cells().collect()
    }

    /// Whether `mv` addresses an empty cell on the board
    pub fn is_legal(&self, mv: Move) -> bool {
        self.get(mv.row, mv.col) == Some(Cell::Empty)
    }

    /// Place the mover's mark at `mv` and return the new board
    #[must_use = "apply_move returns a new board; the receiver is unchanged"]
    pub fn apply_move(&self, mv: Move) -> Result<Board, crate::Error> {
        if !self.is_legal(mv) {
            return Err(crate::Error::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }
        let next = self.successor(mv);
        trace!(%mv, mark = %self.to_move(), "applied move");
        Ok(next)
    }

    /// Successor for a move already known to be legal
    pub(crate) fn successor(&self, mv: Move) -> Board {
        let mut next = *self;
        next.cells[mv.row][mv.col] = self.to_move().to_cell();
        next
    }

    /// Check if a mark fully occupies any line
    pub fn has_won(&self, mark: Mark) -> bool {
        LineAnalyzer::has_won(&self.cells, mark)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Mark> {
        if self.has_won(Mark::X) {
            Some(Mark::X)
        } else if self.has_won(Mark::O) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Check whether every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.iter().flatten().any(|&c| c == Cell::Empty)
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(mark) => Outcome::Win(mark),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    /// Outcome value from X's point of view: +1 X won, -1 O won, 0 otherwise
    pub fn utility(&self) -> i32 {
        match self.winner() {
            Some(Mark::X) => 1,
            Some(Mark::O) => -1,
            None => 0,
        }
    }

    /// Compact nine-character row-major encoding, e.g. `XO..X...O`
    pub fn encode(&self) -> String {
        self.cells.iter().flatten().map(|c| c.to_char()).collect()
    }

    /// Helper: Parse 9 cells from a slice of characters.
    ///
    /// # Errors
    ///
    /// Returns error if the count is not 9 or any character is invalid.
    fn parse_cells(chars: &[char], context: &str) -> Result<[[Cell; 3]; 3], crate::Error> {
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [[Cell::Empty; 3]; 3];
        for (i, &c) in chars.iter().enumerate() {
            cells[i / 3][i % 3] =
                Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                    character: c,
                    position: i,
                    context: context.to_string(),
                })?;
        }

        Ok(cells)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Parse a board from nine cell characters.
///
/// Whitespace and the separators `|` and `/` are ignored, so `"X.O/.X./..O"`
/// and the multi-line [`Display`](fmt::Display) form both parse.
///
/// # Errors
///
/// Returns error if:
/// - The board does not have exactly 9 cell characters
/// - Any character is not a valid cell representation
/// - The piece counts break the alternation invariant (X equal to O or one ahead)
impl FromStr for Board {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .collect();
        let board = Board {
            cells: Self::parse_cells(&chars, s)?,
        };

        let (x_count, o_count) = (board.count(Mark::X), board.count(Mark::O));
        if x_count != o_count && x_count != o_count + 1 {
            return Err(crate::Error::InvalidPieceCounts { x_count, o_count });
        }

        Ok(board)
    }
}
