//! Analyze command - minimax value of every legal move

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use super::parse_board;
use crate::{
    cli::output::{describe_value, print_kv, print_section, render_board},
    minimax::{self, MoveValue, Search},
    tictactoe::{Board, Mark, Move, Outcome},
};

#[derive(Parser, Debug)]
#[command(about = "Show the minimax value of every legal move")]
pub struct AnalyzeArgs {
    /// Board as nine cells in row-major order, e.g. "X.O/.X./..." (. for empty)
    pub board: String,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub board: String,
    pub to_move: Mark,
    pub outcome: Outcome,
    pub value: i32,
    pub best: Option<Move>,
    pub optimal: Vec<Move>,
    pub moves: Vec<MoveValue>,
    pub nodes: u64,
}

/// Search `board` and collect the value of each move
pub fn analyze(board: &Board) -> Analysis {
    let mut search = Search::new();
    let moves = search.evaluate_moves(board);
    let choice = minimax::choose(board.to_move(), &moves);
    let value = choice.map_or(board.utility(), |c| c.value);

    let optimal = moves
        .iter()
        .filter(|m| m.value == value)
        .map(|m| m.mv)
        .collect();

    Analysis {
        board: board.encode(),
        to_move: board.to_move(),
        outcome: board.outcome(),
        value,
        best: choice.map(|c| c.mv),
        optimal,
        moves,
        nodes: search.nodes(),
    }
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let board = parse_board(&args.board).context("invalid board argument")?;
    let analysis = analyze(&board);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, &analysis)?;
        writeln!(out)?;
        return Ok(());
    }

    print_section(&mut out, "Position")?;
    write!(out, "{}", render_board(&board))?;

    if analysis.outcome.is_terminal() {
        print_kv(&mut out, "Result", &analysis.outcome.to_string())?;
        return Ok(());
    }

    print_kv(&mut out, "To move", &analysis.to_move.to_string())?;
    print_kv(
        &mut out,
        "Value",
        &format!("{} ({})", analysis.value, describe_value(analysis.value)),
    )?;
    print_kv(&mut out, "Nodes", &analysis.nodes.to_string())?;

    print_section(&mut out, "Moves")?;
    for MoveValue { mv, value } in &analysis.moves {
        let marker = if analysis.optimal.contains(mv) { "*" } else { " " };
        writeln!(
            out,
            "{marker} {mv}  value {value:>2}  ({})",
            describe_value(*value)
        )?;
    }

    Ok(())
}
