//! Terminal cosmetics: ANSI escapes and the board render.
//!
//! Nothing here is part of the protocol contract — it is plain text a
//! human reads in a terminal, optionally dressed up with escape codes.

use tictacnet_game::{Board, Mark};

pub(crate) mod ansi {
    pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[3J\x1b[H";
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
}

/// Wraps `text` in bold escapes.
pub(crate) fn bold(text: &str) -> String {
    format!("{}{text}{}", ansi::BOLD, ansi::RESET)
}

/// Renders the board as three `|xo-|` rows, CRLF between them.
pub(crate) fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..3 {
        if row > 0 {
            out.push_str("\r\n");
        }
        out.push('|');
        for cell in board.row(row) {
            out.push(cell.map_or('-', Mark::as_char));
        }
        out.push('|');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictacnet_game::Square;

    #[test]
    fn test_render_empty_board() {
        assert_eq!(render_board(&Board::new()), "|---|\r\n|---|\r\n|---|");
    }

    #[test]
    fn test_render_places_marks_row_major() {
        let mut board = Board::new();
        board.place(Square::new(0).unwrap(), Mark::X);
        board.place(Square::new(4).unwrap(), Mark::O);
        board.place(Square::new(8).unwrap(), Mark::X);
        assert_eq!(render_board(&board), "|x--|\r\n|-o-|\r\n|--x|");
    }

    #[test]
    fn test_bold_wraps_and_resets() {
        assert_eq!(bold("plum4"), "\x1b[1mplum4\x1b[0m");
    }
}
