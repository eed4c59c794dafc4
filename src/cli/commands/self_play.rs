//! Self-play command - the engine against itself

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{print_section, render_board},
    tictactoe::{Game, Move, Outcome},
};

#[derive(Parser, Debug)]
#[command(about = "Let the minimax player play both sides")]
pub struct SelfPlayArgs {
    /// Emit the finished game as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SelfPlayExport<'a> {
    moves: &'a [Move],
    outcome: Outcome,
    board: String,
}

/// Play optimal moves for both sides until the game ends
pub fn play_out(game: &mut Game) -> crate::Result<Outcome> {
    while game.play_best()?.is_some() {}
    Ok(game.outcome())
}

pub fn execute(args: SelfPlayArgs) -> Result<()> {
    let mut game = Game::new();
    let outcome = play_out(&mut game)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        let export = SelfPlayExport {
            moves: game.moves(),
            outcome,
            board: game.board().encode(),
        };
        serde_json::to_writer_pretty(&mut out, &export)?;
        writeln!(out)?;
        return Ok(());
    }

    // Re-walk the history so every intermediate board can be shown
    let mut replay = Game::new();
    for (ply, &mv) in game.moves().iter().enumerate() {
        let mark = replay.to_move();
        replay.play(mv)?;
        print_section(&mut out, &format!("Ply {}: {mark} plays {mv}", ply + 1))?;
        write!(out, "{}", render_board(replay.board()))?;
    }
    writeln!(out, "\n{outcome}")?;

    Ok(())
}
