//! Play command - interactive game against the minimax player

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::{
    Error,
    cli::{
        config::{PlayConfig, Side},
        output::render_board,
    },
    minimax,
    tictactoe::{Game, Move},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the computer")]
pub struct PlayArgs {
    /// Mark you play (X moves first)
    #[arg(long, value_enum, default_value_t = Side::X)]
    pub human: Side,

    /// Show the optimal moves before each of your turns
    #[arg(long)]
    pub hints: bool,
}

impl From<&PlayArgs> for PlayConfig {
    fn from(args: &PlayArgs) -> Self {
        Self {
            human: args.human.into(),
            hints: args.hints,
        }
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = PlayConfig::from(&args);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&config, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Drive a game from line-based input until `q` or end of input.
///
/// Each line is a move (`row col`, `row,col` or a cell index), `r` to start
/// over or `q` to quit. Moves sent after the game has ended are ignored.
///
/// # Errors
///
/// Returns [`Error::Io`] when reading input or writing output fails.
pub fn run_session<R: BufRead, W: Write>(
    config: &PlayConfig,
    input: R,
    mut out: W,
) -> crate::Result<()> {
    let mut game = Game::new();
    writeln!(
        out,
        "You are {}. Enter 'row col' or a cell index 0-8, 'r' to reset, 'q' to quit.",
        config.human
    )?;
    advance_computer(&mut game, config, &mut out)?;
    show(&game, config, &mut out)?;

    for line in input.lines() {
        let line = line.map_err(|source| Error::Io {
            operation: "read input".to_string(),
            source,
        })?;
        match line.trim() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "r" | "reset" => {
                game.reset();
                writeln!(out, "New game.")?;
                advance_computer(&mut game, config, &mut out)?;
                show(&game, config, &mut out)?;
            }
            _ if game.status().is_terminal() => {
                writeln!(out, "The game is over. Enter 'r' to play again or 'q' to quit.")?;
            }
            command => {
                let mv = match command.parse::<Move>() {
                    Ok(mv) => mv,
                    Err(e) => {
                        writeln!(out, "{e}")?;
                        continue;
                    }
                };
                match game.play(mv) {
                    Ok(_) => {}
                    Err(Error::InvalidMove { .. }) => {
                        writeln!(out, "Cell {mv} is not available.")?;
                        continue;
                    }
                    Err(e) => return Err(e),
                }
                advance_computer(&mut game, config, &mut out)?;
                show(&game, config, &mut out)?;
            }
        }
    }

    Ok(())
}

fn advance_computer<W: Write>(
    game: &mut Game,
    config: &PlayConfig,
    out: &mut W,
) -> crate::Result<()> {
    if game.status().is_terminal() || game.to_move() != config.computer() {
        return Ok(());
    }
    if let Some(mv) = game.play_best()? {
        writeln!(out, "Computer ({}) plays {mv}", config.computer())?;
    }
    Ok(())
}

fn show<W: Write>(game: &Game, config: &PlayConfig, out: &mut W) -> crate::Result<()> {
    write!(out, "{}", render_board(game.board()))?;

    if game.status().is_terminal() {
        writeln!(out, "{}", game.outcome())?;
        writeln!(out, "Enter 'r' to play again or 'q' to quit.")?;
        return Ok(());
    }

    if config.hints {
        let hints: Vec<String> = minimax::optimal_moves(game.board())
            .iter()
            .map(Move::to_string)
            .collect();
        writeln!(out, "Optimal: {}", hints.join(" "))?;
    }
    writeln!(out, "Your move ({}):", config.human)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor, Read};

    use super::*;
    use crate::tictactoe::Mark;

    fn session(config: &PlayConfig, input: &str) -> String {
        let mut out = Vec::new();
        run_session(config, Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn computer_opens_when_human_plays_o() {
        let config = PlayConfig {
            human: Mark::O,
            hints: false,
        };
        let out = session(&config, "q\n");
        assert!(out.contains("Computer (X) plays"));
        assert!(out.contains("Your move (O):"));
    }

    #[test]
    fn occupied_cell_is_reported() {
        let out = session(&PlayConfig::default(), "1 1\n1 1\nq\n");
        assert!(out.contains("Computer (O) plays"));
        assert!(out.contains("Cell (1, 1) is not available."));
    }

    #[test]
    fn garbage_input_is_reported() {
        let out = session(&PlayConfig::default(), "hello\nq\n");
        assert!(out.contains("invalid move 'hello'"));
    }

    #[test]
    fn careless_human_loses_and_can_reset() {
        // The computer answers the corner with the centre, blocks the top row,
        // then sets up a double threat.
        let input = "0 0\n0 1\n2 2\n1 2\n2 1\nr\nq\n";
        let out = session(&PlayConfig::default(), input);

        assert!(out.contains("Computer (O) plays (1, 1)"));
        assert!(out.contains("Computer (O) plays (0, 2)"));
        assert!(out.contains("O wins!"));
        assert!(out.contains("The game is over."));
        assert!(out.contains("New game."));
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
        }
    }

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failing_input_is_an_io_error() {
        let mut out = Vec::new();
        let err = run_session(&PlayConfig::default(), BufReader::new(BrokenPipe), &mut out)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Io { ref operation, ref source }
                if operation == "read input" && source.kind() == io::ErrorKind::BrokenPipe
        ));
        // The greeting and board were written before the read failed
        assert!(String::from_utf8(out).unwrap().contains("Your move (X):"));
    }

    #[test]
    fn failing_output_is_an_io_error() {
        let err = run_session(&PlayConfig::default(), Cursor::new("q\n"), BrokenPipe).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn hints_list_optimal_moves() {
        let config = PlayConfig {
            human: Mark::X,
            hints: true,
        };
        let out = session(&config, "q\n");
        assert!(out.contains("Optimal: (0, 0)"));
    }
}
