//! Parsing of the textual move tokens players type.
//!
//! Two encodings are accepted:
//!
//! - **Numeric**: exactly one digit `1`–`9`, counting cells row by row.
//! - **Coordinate**: a row letter `a`–`c` (either case) followed by a
//!   column digit `1`–`3`, e.g. `b2` for the center.
//!
//! Anything else is rejected. Rejection is a normal part of play (the
//! turn loop just asks the same player again), so [`InvalidMove`] is a
//! value to branch on, not an error to propagate.

use crate::{Board, Square};

/// Why a move token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    /// The token is not one of the two accepted encodings: wrong length,
    /// or a letter/digit outside the grid.
    #[error("unrecognized move {0:?}")]
    Malformed(String),

    /// The token named a cell that already holds a mark.
    #[error("square {0} is already taken")]
    Occupied(Square),
}

/// Parses a trimmed move token against the current board.
///
/// Validation is complete before any index is computed: a malformed
/// coordinate token never yields a square, and an occupied target is
/// reported as [`InvalidMove::Occupied`] rather than silently accepted.
pub fn parse_move(token: &str, board: &Board) -> Result<Square, InvalidMove> {
    let malformed = || InvalidMove::Malformed(token.to_string());

    let square = match token.as_bytes() {
        [digit @ b'1'..=b'9'] => Square((digit - b'1') as usize),
        [row, col] => {
            let row = match row.to_ascii_lowercase() {
                r @ b'a'..=b'c' => (r - b'a') as usize,
                _ => return Err(malformed()),
            };
            let col = match col {
                c @ b'1'..=b'3' => (c - b'1') as usize,
                _ => return Err(malformed()),
            };
            Square::from_row_col(row, col)
        }
        _ => return Err(malformed()),
    };

    if !board.is_vacant(square) {
        return Err(InvalidMove::Occupied(square));
    }
    Ok(square)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mark;

    fn parse(token: &str) -> Result<Square, InvalidMove> {
        parse_move(token, &Board::new())
    }

    #[test]
    fn test_numeric_tokens_map_to_indices() {
        for (token, index) in [("1", 0), ("5", 4), ("9", 8)] {
            assert_eq!(parse(token).unwrap().index(), index, "token {token:?}");
        }
    }

    #[test]
    fn test_coordinate_tokens_map_to_indices() {
        for (token, index) in [("a1", 0), ("b2", 4), ("c3", 8), ("c1", 6)] {
            assert_eq!(parse(token).unwrap().index(), index, "token {token:?}");
        }
    }

    #[test]
    fn test_both_encodings_agree_on_the_center() {
        assert_eq!(parse("5").unwrap(), parse("b2").unwrap());
    }

    #[test]
    fn test_row_letter_is_case_insensitive() {
        assert_eq!(parse("B2").unwrap().index(), 4);
        assert_eq!(parse("C3").unwrap().index(), 8);
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        for token in ["", "0", "10", "d1", "a4", "a0", "12", "5 ", " 5", "bb", "b22", "x"] {
            assert!(
                matches!(parse(token), Err(InvalidMove::Malformed(_))),
                "token {token:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let mut board = Board::new();
        board.place(Square::new(4).unwrap(), Mark::X);
        assert!(matches!(
            parse_move("5", &board),
            Err(InvalidMove::Occupied(sq)) if sq.index() == 4
        ));
        assert!(matches!(
            parse_move("b2", &board),
            Err(InvalidMove::Occupied(_))
        ));
    }

    #[test]
    fn test_vacant_cells_still_accepted_on_a_busy_board() {
        let mut board = Board::new();
        board.place(Square::new(4).unwrap(), Mark::X);
        assert_eq!(parse_move("a1", &board).unwrap().index(), 0);
    }
}
