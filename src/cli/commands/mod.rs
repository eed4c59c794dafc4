//! Subcommands of the `noughts` binary

use crate::tictactoe::Board;

pub mod analyze;
pub mod best;
pub mod play;
pub mod self_play;

/// Parse a board argument and make sure it can occur in a real game
pub fn parse_board(input: &str) -> crate::Result<Board> {
    let board: Board = input.parse()?;
    if !board.is_valid() {
        return Err(crate::Error::UnreachableBoard {
            board: board.encode(),
        });
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_board_accepts_reachable_positions() {
        let board = parse_board("X.O/.X./...").unwrap();
        assert_eq!(board.occupied_count(), 3);
    }

    #[test]
    fn parse_board_rejects_unreachable_positions() {
        assert!(matches!(
            parse_board("XXX OO. O.."),
            Err(crate::Error::UnreachableBoard { .. })
        ));
        assert!(matches!(
            parse_board("XX. ..."),
            Err(crate::Error::InvalidBoardLength { .. })
        ));
    }
}
