//! Error types for the text formats accepted by [`Position`](crate::board::Position).
//!
//! Both FEN and move notation are external input, so every malformed field maps
//! to a variant here. Inconsistencies inside the engine itself (a move whose start
//! square is empty, a magic collision) are bugs and panic instead.

#![deny(missing_docs)]

use thiserror::Error;

use super::{Colour, ParseSquareError, Square};

/******************************************\
|==========================================|
|             Fen Parse Errors             |
|==========================================|
\******************************************/

/// Errors produced while parsing a Forsyth–Edwards Notation string.
///
/// Example: `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum FenParseError {
    /// The FEN string did not contain exactly 6 whitespace separated fields.
    #[error("FEN string must have 6 fields separated by spaces")]
    InvalidNumberOfFields,

    /// A character other than a piece letter, a digit or `/` appeared in the
    /// piece placement field.
    #[error("Invalid character in FEN piece placement: '{0}'")]
    InvalidPiecePlacementChar(char),

    /// A rank does not describe exactly 8 files, or there are not exactly 8 ranks.
    #[error("Invalid rank format in FEN piece placement: {0}")]
    InvalidRankFormat(String),

    /// The side to move was neither `w` nor `b`.
    #[error("Invalid side to move in FEN: '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),

    /// The castling field contained something other than `KQkq` or `-`.
    #[error("Invalid character in FEN castling availability: '{0}'")]
    InvalidCastlingChar(char),

    /// The en passant field is not `-` or a square on the 3rd or 6th rank.
    #[error("Invalid en passant target square in FEN: '{0}'")]
    InvalidEnPassantSquare(String),

    /// The halfmove clock is not a non-negative integer.
    #[error("Invalid halfmove clock value in FEN: '{0}'")]
    InvalidHalfmoveClock(String),

    /// The fullmove number is not a positive integer.
    #[error("Invalid fullmove number value in FEN: '{0}'")]
    InvalidFullmoveNumber(String),

    /// A pawn stands on the first or eighth rank.
    #[error("Pawn on back rank square {0} in FEN piece placement")]
    PawnOnBackRank(Square),

    /// A side does not have exactly one king.
    #[error("{0:?} has {1} kings, expected exactly 1")]
    InvalidKingCount(Colour, u32),
}

/******************************************\
|==========================================|
|            Notation Errors               |
|==========================================|
\******************************************/

/// Errors produced while decoding SAN or pure algebraic moves.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum NotationError {
    /// Pure algebraic moves are 4 or 5 characters long.
    #[error("Invalid move string length: {0}, expected 4 or 5")]
    InvalidLength(usize),

    /// A square inside the move could not be parsed.
    #[error(transparent)]
    InvalidSquare(#[from] ParseSquareError),

    /// A SAN move started with an unknown piece letter.
    #[error("Invalid piece letter in SAN: '{0}'")]
    InvalidPieceChar(char),

    /// The promotion suffix is not one of `q`, `r`, `b`, `n`.
    #[error("Invalid promotion piece: '{0}'")]
    InvalidPromotion(char),

    /// No legal move matches the notation.
    #[error("No legal move matches '{0}'")]
    NoMatchingMove(String),

    /// More than one legal move matches the notation.
    #[error("Ambiguous move '{0}'")]
    AmbiguousMove(String),

    /// The notation decodes to a move that is not legal in the position.
    #[error("Illegal move '{0}'")]
    IllegalMove(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FenParseError::InvalidCastlingChar('X').to_string(),
            "Invalid character in FEN castling availability: 'X'"
        );
        assert_eq!(
            FenParseError::InvalidKingCount(Colour::Black, 0).to_string(),
            "Black has 0 kings, expected exactly 1"
        );
        assert_eq!(
            NotationError::NoMatchingMove("Nf6".to_string()).to_string(),
            "No legal move matches 'Nf6'"
        );
    }

    #[test]
    fn test_square_error_conversion() {
        let err: NotationError = "z9".parse::<crate::core::Square>().unwrap_err().into();
        assert_eq!(err, NotationError::InvalidSquare(ParseSquareError::InvalidFileChar('z')));
    }
}
