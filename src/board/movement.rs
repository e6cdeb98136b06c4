use super::Position;
use super::zobrist::side_key;
use crate::core::*;

/******************************************\
|==========================================|
|             Keyed Placement              |
|==========================================|
\******************************************/

impl Position {
    #[inline]
    fn put(&mut self, col: Colour, pt: PieceType, sq: Square) {
        self.add_piece(col, pt, sq);
        self.toggle_piece_key(col, pt, sq);
    }

    #[inline]
    fn take(&mut self, col: Colour, pt: PieceType, sq: Square) {
        self.remove_piece(col, pt, sq);
        self.toggle_piece_key(col, pt, sq);
    }

    #[inline]
    fn relocate(&mut self, col: Colour, pt: PieceType, from: Square, to: Square) {
        self.move_piece(col, pt, from, to);
        self.toggle_piece_key(col, pt, from);
        self.toggle_piece_key(col, pt, to);
    }
}

/// Both rights of one side
#[inline]
fn side_rights(col: Colour) -> Castling {
    match col {
        Colour::White => Castling::WHITE_CASTLING,
        Colour::Black => Castling::BLACK_CASTLING,
    }
}

/// The right lost when a move starts or ends on a rook's home corner
#[inline]
fn corner_right(sq: Square) -> Castling {
    match sq {
        Square::A1 => Castling::WQ,
        Square::H1 => Castling::WK,
        Square::A8 => Castling::BQ,
        Square::H8 => Castling::BK,
        _ => Castling::NONE,
    }
}

/******************************************\
|==========================================|
|                Make Move                 |
|==========================================|
\******************************************/

impl Position {
    /// Applies a legal move in place.
    ///
    /// The key, rights, en passant file, halfmove clock, check status and the
    /// terminal flags are all brought up to date.
    ///
    /// # Panics
    ///
    /// If the start square holds no piece of the side to move, or a capture flag
    /// names a piece that is not on the destination. Both mean the move did not
    /// come from this position.
    pub fn make_move(&mut self, move_: Move) {
        let us = self.stm;

        self.set_ep_file(None);

        if move_.is_castle() {
            self.halfmove = self.halfmove.saturating_add(1);
            self.castle(move_);
            self.revoke_castling(side_rights(us));
        } else {
            self.make_regular(move_);

            if move_.is_capture() || move_.is_promotion() {
                self.insufficient_material = self.calc_insufficient_material();
            }
        }

        self.stm = !us;
        self.key ^= side_key();

        self.update_check();
        self.update_mates();
    }

    fn castle(&mut self, move_: Move) {
        let us = self.stm;
        let king_from = move_.king_origin();
        let king_to = move_.to();
        let rank = king_to.rank();

        let (rook_from, rook_to) = match king_to.file() {
            File::FileG => (File::FileH, File::FileF),
            _ => (File::FileA, File::FileD),
        };

        self.relocate(us, PieceType::King, king_from, king_to);
        self.relocate(
            us,
            PieceType::Rook,
            Square::from_parts(rook_from, rank),
            Square::from_parts(rook_to, rank),
        );
    }

    fn make_regular(&mut self, move_: Move) {
        use PieceType::*;

        let us = self.stm;
        let them = !us;
        let from = move_.from();
        let to = move_.to();

        let pt = if self.king_sq(us) == from {
            King
        } else {
            match self.non_king_on(us, from) {
                Some(pt) => pt,
                None => panic!("make_move: no {us:?} piece on {from} for {move_}"),
            }
        };

        if pt == Pawn || self.occupied_bb(them).contains(to) {
            self.halfmove = 0;
        } else {
            self.halfmove = self.halfmove.saturating_add(1);
        }

        if move_.is_en_passant() {
            let victim = Square::from_parts(to.file(), from.rank());
            self.take(them, Pawn, victim);
            self.relocate(us, Pawn, from, to);
        } else if let Some(promoted) = move_.promotion_pt() {
            self.take(us, Pawn, from);
            if move_.is_promotion_capture() {
                match self.non_king_on(them, to) {
                    Some(victim) => self.take(them, victim, to),
                    None => panic!("make_move: {move_} captures on the empty square {to}"),
                }
            }
            self.put(us, promoted, to);
        } else {
            if let Some(victim) = move_.captured_pt() {
                if !self.piece_bb(them, victim).contains(to) {
                    panic!("make_move: {move_} expects a {victim:?} on {to}");
                }
                self.take(them, victim, to);
            }
            debug_assert!(
                !self.all_occupied_bb().contains(to),
                "make_move: {move_} lands on an occupied square without a capture flag"
            );
            self.relocate(us, pt, from, to);

            if move_.is_double_push() {
                self.set_ep_file(Some(from.file()));
            }
        }

        let mut revoked = corner_right(from) | corner_right(to);
        if pt == King {
            revoked |= side_rights(us);
        }
        self.revoke_castling(revoked);
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
