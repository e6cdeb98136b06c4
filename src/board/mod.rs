pub mod features;
pub mod fen;
pub mod movegen;
pub mod movement;
pub mod notation;
pub mod status;
pub mod zobrist;

pub use features::NUM_FEATURES;
pub use fen::{KIWIPETE_FEN, POSITION_3_FEN, POSITION_4_FEN, POSITION_5_FEN, START_FEN};
pub use movegen::{
    AnyMove, MAX_MOVES, MoveList, MoveSink, attacks, bishop_attacks, bishop_line, bishop_rays,
    check_response, init_tables, king_attack, knight_attack, pawn_attack, queen_attacks,
    rook_attacks, rook_line, rook_rays,
};
pub use status::CheckStatus;
pub use zobrist::Key;

use crate::core::*;

/******************************************\
|==========================================|
|                 Position                 |
|==========================================|
\******************************************/

/// # Position
///
/// The full state of one game position.
///
/// Kings are tracked by square. The five other piece types each get one
/// bitboard per colour, and `occupied` is the per-colour union including the
/// king. The check, mate, stalemate and material flags are kept current by
/// [`Position::make_move`], so the terminal predicates are plain reads.
///
/// A `Position` is a plain value: copying it is how a caller explores a move
/// without losing the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    kings: [Square; Colour::NUM],

    pieces: [[Bitboard; 5]; Colour::NUM],

    occupied: [Bitboard; Colour::NUM],

    stm: Colour,

    castling: Castling,

    /// File of the pawn that double-pushed on the previous ply
    ep_file: Option<File>,

    check: CheckStatus,

    stalemate: bool,

    /// The side that has been checkmated
    mated: Option<Colour>,

    insufficient_material: bool,

    halfmove: u16,

    key: Key,
}

/******************************************\
|==========================================|
|           Basic Implementation           |
|==========================================|
\******************************************/

impl Default for Position {
    fn default() -> Position {
        Position::start()
    }
}

impl Position {
    /// A blank board to fill in. The king squares are placeholders: the caller
    /// places both kings and then recomputes the derived state.
    pub(crate) fn empty() -> Position {
        Position {
            kings: [Square::E1, Square::E8],
            pieces: [[Bitboard::EMPTY; 5]; Colour::NUM],
            occupied: [Bitboard::EMPTY; Colour::NUM],
            stm: Colour::White,
            castling: Castling::NONE,
            ep_file: None,
            check: CheckStatus::NotInCheck,
            stalemate: false,
            mated: None,
            insufficient_material: false,
            halfmove: 0,
            key: 0,
        }
    }

    /// The standard starting position
    pub fn start() -> Position {
        let mut pos = Position::empty();

        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (file, pt) in File::iter().zip(back_rank) {
            for (col, back, pawns) in [
                (Colour::White, Rank::Rank1, Rank::Rank2),
                (Colour::Black, Rank::Rank8, Rank::Rank7),
            ] {
                pos.add_piece(col, pt, Square::from_parts(file, back));
                pos.add_piece(col, PieceType::Pawn, Square::from_parts(file, pawns));
            }
        }

        pos.castling = Castling::ALL;
        pos.refresh();
        pos
    }

    /// Recomputes every derived field from the placement, side, rights and ep file
    pub(crate) fn refresh(&mut self) {
        self.key = self.calc_key();
        self.insufficient_material = self.calc_insufficient_material();
        self.update_check();
        self.update_mates();
    }

    #[inline]
    pub fn stm(&self) -> Colour {
        self.stm
    }

    #[inline]
    pub fn king_sq(&self, col: Colour) -> Square {
        unsafe { *self.kings.get_unchecked(col.index()) }
    }

    /// Bitboard of `col`'s pieces of type `pt`, kings included
    #[inline]
    pub fn piece_bb(&self, col: Colour, pt: PieceType) -> Bitboard {
        match pt {
            PieceType::King => self.king_sq(col).bb(),
            _ => unsafe {
                *self
                    .pieces
                    .get_unchecked(col.index())
                    .get_unchecked(pt.index())
            },
        }
    }

    /// Both colours' pieces of type `pt`
    #[inline]
    pub fn piecetype_bb(&self, pt: PieceType) -> Bitboard {
        self.piece_bb(Colour::White, pt) | self.piece_bb(Colour::Black, pt)
    }

    #[inline]
    pub fn occupied_bb(&self, col: Colour) -> Bitboard {
        unsafe { *self.occupied.get_unchecked(col.index()) }
    }

    #[inline]
    pub fn all_occupied_bb(&self) -> Bitboard {
        self.occupied_bb(Colour::White) | self.occupied_bb(Colour::Black)
    }

    /// The non-king piece type `col` has on `sq`, if any
    #[inline]
    pub fn non_king_on(&self, col: Colour, sq: Square) -> Option<PieceType> {
        PieceType::NON_KING
            .into_iter()
            .find(|&pt| self.piece_bb(col, pt).contains(sq))
    }

    /// The piece on `sq`, if any
    pub fn on(&self, sq: Square) -> Option<Piece> {
        for col in [Colour::White, Colour::Black] {
            if !self.occupied_bb(col).contains(sq) {
                continue;
            }
            if self.king_sq(col) == sq {
                return Some(Piece::from_parts(col, PieceType::King));
            }
            return self
                .non_king_on(col, sq)
                .map(|pt| Piece::from_parts(col, pt));
        }
        None
    }

    #[inline]
    pub fn castling(&self) -> Castling {
        self.castling
    }

    #[inline]
    pub fn ep_file(&self) -> Option<File> {
        self.ep_file
    }

    /// The square a pawn capturing en passant would land on
    #[inline]
    pub fn ep_target(&self) -> Option<Square> {
        let rank = match self.stm {
            Colour::White => Rank::Rank6,
            Colour::Black => Rank::Rank3,
        };
        self.ep_file.map(|file| Square::from_parts(file, rank))
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove
    }

    /// The incrementally maintained Zobrist key
    #[inline]
    pub fn key(&self) -> Key {
        self.key
    }

    #[inline]
    pub fn check_status(&self) -> CheckStatus {
        self.check
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.check != CheckStatus::NotInCheck
    }

    /// Squares `col` attacks with the current occupancy
    pub fn attacked_by(&self, col: Colour) -> Bitboard {
        movegen::attacked_squares(self, col, self.all_occupied_bb())
    }

    pub fn has_non_pawn_material(&self, col: Colour) -> bool {
        (self.occupied_bb(col)
            & !(self.piece_bb(col, PieceType::Pawn) | self.piece_bb(col, PieceType::King)))
        .is_occupied()
    }

    /******************************************\
    |==========================================|
    |             Placement Helpers            |
    |==========================================|
    \******************************************/

    /// Puts a piece on an empty square. Each king is placed exactly once, while
    /// the board is being set up.
    ///
    /// **Note:** the Zobrist key and the derived flags are left untouched.
    #[inline]
    pub(crate) fn add_piece(&mut self, col: Colour, pt: PieceType, sq: Square) {
        debug_assert!(!self.all_occupied_bb().contains(sq), "add_piece: {sq} is occupied");

        match pt {
            PieceType::King => self.kings[col.index()] = sq,
            _ => self.pieces[col.index()][pt.index()].set(sq),
        }
        self.occupied[col.index()].set(sq);
    }

    /// Takes a non-king piece off the board.
    ///
    /// **Note:** the Zobrist key and the derived flags are left untouched.
    #[inline]
    pub(crate) fn remove_piece(&mut self, col: Colour, pt: PieceType, sq: Square) {
        debug_assert!(pt != PieceType::King, "remove_piece: kings are never removed");
        debug_assert!(
            self.piece_bb(col, pt).contains(sq),
            "remove_piece: no {pt:?} of {col:?} on {sq}"
        );

        self.pieces[col.index()][pt.index()].clear(sq);
        self.occupied[col.index()].clear(sq);
    }

    /// Moves a piece of `col` from `from` to the empty square `to`.
    ///
    /// **Note:** the Zobrist key and the derived flags are left untouched.
    #[inline]
    pub(crate) fn move_piece(&mut self, col: Colour, pt: PieceType, from: Square, to: Square) {
        match pt {
            PieceType::King => self.kings[col.index()] = to,
            _ => {
                self.pieces[col.index()][pt.index()].clear(from);
                self.pieces[col.index()][pt.index()].set(to);
            }
        }
        self.occupied[col.index()].clear(from);
        self.occupied[col.index()].set(to);
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for Position {
    /// ASCII diagram with rank 8 on top, files labelled along the bottom
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SEPARATOR: &str = "+---+---+---+---+---+---+---+---+";

        for rank in Rank::iter().rev() {
            writeln!(f, "{SEPARATOR}")?;
            write!(f, "|")?;

            for file in File::iter() {
                let cell = match self.on(Square::from_parts(file, rank)) {
                    Some(piece) => piece.to_char(),
                    None => ' ',
                };
                write!(f, " {cell} |")?;
            }

            writeln!(f, " {}", rank as u8 + 1)?;
        }

        write!(f, "+-a-+-b-+-c-+-d-+-e-+-f-+-g-+-h-+")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Square::*;

    #[test]
    fn test_start_position_layout() {
        let pos = Position::start();

        assert_eq!(pos.king_sq(Colour::White), E1);
        assert_eq!(pos.king_sq(Colour::Black), E8);
        assert_eq!(pos.occupied_bb(Colour::White), Bitboard::RANK_12);
        assert_eq!(pos.occupied_bb(Colour::Black), Bitboard::RANK_78);
        assert_eq!(pos.piece_bb(Colour::White, PieceType::Pawn).count_bits(), 8);
        assert_eq!(pos.on(D1), Some(Piece::WhiteQueen));
        assert_eq!(pos.on(G8), Some(Piece::BlackKnight));
        assert_eq!(pos.on(E4), None);
        assert_eq!(pos.castling(), Castling::ALL);
        assert_eq!(pos.ep_file(), None);
        assert_eq!(pos.stm(), Colour::White);
        assert!(!pos.in_check());
        assert_eq!(pos, Position::default());
    }

    #[test]
    fn test_colour_bitboards_are_disjoint() {
        let pos = Position::start();
        assert!((pos.occupied_bb(Colour::White) & pos.occupied_bb(Colour::Black)).is_empty());

        let mut union = Bitboard::EMPTY;
        for pt in PieceType::iter() {
            union |= pos.piecetype_bb(pt);
        }
        assert_eq!(union, pos.all_occupied_bb());
    }

    #[test]
    fn test_display_diagram() {
        let text = Position::start().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0], "+---+---+---+---+---+---+---+---+");
        assert_eq!(lines[1], "| r | n | b | q | k | b | n | r | 8");
        assert_eq!(lines[13], "| P | P | P | P | P | P | P | P | 2");
        assert_eq!(lines[7], "|   |   |   |   |   |   |   |   | 5");
        assert_eq!(lines[16], "+-a-+-b-+-c-+-d-+-e-+-f-+-g-+-h-+");
    }

    #[test]
    fn test_copy_is_independent() {
        let pos = Position::start();
        let mut copy = pos;
        copy.move_piece(Colour::White, PieceType::Knight, G1, F3);

        assert_eq!(pos.on(G1), Some(Piece::WhiteKnight));
        assert_eq!(copy.on(F3), Some(Piece::WhiteKnight));
        assert_ne!(pos, copy);
    }

    #[test]
    fn test_ep_target() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(pos.ep_file(), Some(File::FileD));
        assert_eq!(pos.ep_target(), Some(D6));
    }
}
