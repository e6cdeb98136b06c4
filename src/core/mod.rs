//! Value types shared by every layer: squares, bitboards, pieces, moves and
//! the parse errors for text input.

pub mod bitboard;
pub mod errors;
pub mod moves;
pub mod piece;
pub mod square;
pub mod types;

mod macros;

pub use bitboard::Bitboard;
pub use errors::{FenParseError, NotationError};
pub use moves::{Move, MoveFlag};
pub use piece::{ParsePieceError, Piece, PieceType};
pub use square::{File, ParseSquareError, Rank, Square};
pub use types::{Castling, Colour, Direction};
