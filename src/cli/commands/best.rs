//! Best command - the move the engine would play

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;

use super::parse_board;
use crate::{
    cli::output::{describe_value, print_kv, render_board},
    minimax::{Search, SearchReport},
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Print the optimal move for the side to move")]
pub struct BestArgs {
    /// Board as nine cells in row-major order, e.g. "X.O/.X./..." (. for empty)
    pub board: String,

    /// Emit the search report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: BestArgs) -> Result<()> {
    let board = parse_board(&args.board).context("invalid board argument")?;
    let report = Search::new().run(&board);

    let stdout = io::stdout();
    write_report(&board, &report, args.json, stdout.lock())?;
    Ok(())
}

/// Write a search report as a table or as pretty-printed JSON
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) or
/// [`Error::Serialization`](crate::Error::Serialization) when writing fails.
pub fn write_report<W: Write>(
    board: &Board,
    report: &SearchReport,
    json: bool,
    mut out: W,
) -> crate::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut out, report)?;
        writeln!(out)?;
        return Ok(());
    }

    write!(out, "{}", render_board(board))?;
    match report.best {
        Some(mv) => {
            let cell = mv.index().map_or_else(String::new, |i| format!(" (cell {i})"));
            print_kv(&mut out, "To move", &board.to_move().to_string())?;
            print_kv(&mut out, "Best move", &format!("{mv}{cell}"))?;
            print_kv(
                &mut out,
                "Value",
                &format!("{} ({})", report.value, describe_value(report.value)),
            )?;
        }
        None => print_kv(&mut out, "Result", &board.outcome().to_string())?,
    }
    print_kv(&mut out, "Nodes", &report.nodes.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_for(board: &str, json: bool) -> String {
        let board = parse_board(board).unwrap();
        let report = Search::new().run(&board);
        let mut out = Vec::new();
        write_report(&board, &report, json, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn table_shows_the_winning_move() {
        // X X .
        // O O .
        // . . .    X to move
        let out = report_for("XX. OO. ...", false);
        assert!(out.starts_with("   0 1 2\n0  X X .\n"));
        assert!(out.contains("  To move:       X\n"));
        assert!(out.contains("  Best move:     (0, 2) (cell 2)\n"));
        assert!(out.contains("  Value:         1 (X wins)\n"));
        assert!(out.contains("  Nodes:"));
    }

    #[test]
    fn table_reports_result_on_terminal_board() {
        let out = report_for("XXX OO. ...", false);
        assert!(out.contains("  Result:        X wins!\n"));
        assert!(out.contains("  Nodes:         1\n"));
        assert!(!out.contains("Best move"));
    }

    #[test]
    fn json_carries_the_search_report() {
        let out = report_for("XX. OO. ...", true);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["best"]["row"], 0);
        assert_eq!(json["best"]["col"], 2);
        assert_eq!(json["value"], 1);
        assert!(json["nodes"].as_u64().unwrap() > 1);
    }

    #[test]
    fn json_terminal_board_has_null_best() {
        let out = report_for("XXX OO. ...", true);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(json["best"].is_null());
        assert_eq!(json["value"], 1);
        assert_eq!(json["nodes"], 1);
    }
}
