//! Output formatting for CLI

use std::io::{self, Write};

use crate::tictactoe::Board;

/// Render a board with row and column numbers
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("   0 1 2\n");
    for (row, cells) in board.rows().iter().enumerate() {
        out.push_str(&format!("{row} "));
        for cell in cells {
            out.push(' ');
            out.push(cell.to_char());
        }
        out.push('\n');
    }
    out
}

/// Print a section header
pub fn print_section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(40))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(40))
}

/// Print a key-value pair
pub fn print_kv<W: Write>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:14} {}", format!("{key}:"), value)
}

/// Describe a minimax value from the point of view of X
pub fn describe_value(value: i32) -> &'static str {
    match value.signum() {
        1 => "X wins",
        -1 => "O wins",
        _ => "draw",
    }
}
