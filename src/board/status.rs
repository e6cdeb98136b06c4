//! Check detection and the terminal-state predicates.
//!
//! The flags are stored on the position and refreshed after every move, so the
//! predicates are plain reads.

use super::Position;
use super::movegen::{bishop_attacks, knight_attack, pawn_attack, rook_attacks};
use crate::core::*;

/******************************************\
|==========================================|
|               Check Status               |
|==========================================|
\******************************************/

/// Whether the side to move is in check, and by what
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckStatus {
    #[default]
    NotInCheck,
    /// Exactly one piece gives check from this square
    Single(Square),
    /// Two pieces give check, only king moves can answer it
    Double,
}

impl Position {
    /// Enemy pieces attacking the king of the side to move
    pub fn checkers(&self) -> Bitboard {
        let us = self.stm;
        let them = !us;
        let king = self.king_sq(us);
        let all = self.all_occupied_bb();
        let queens = self.piece_bb(them, PieceType::Queen);

        (pawn_attack(us, king) & self.piece_bb(them, PieceType::Pawn))
            | (knight_attack(king) & self.piece_bb(them, PieceType::Knight))
            | (bishop_attacks(king, all) & (self.piece_bb(them, PieceType::Bishop) | queens))
            | (rook_attacks(king, all) & (self.piece_bb(them, PieceType::Rook) | queens))
    }

    pub(crate) fn update_check(&mut self) {
        let checkers = self.checkers();

        self.check = if checkers.more_than_one() {
            CheckStatus::Double
        } else {
            match checkers.lsb() {
                Some(sq) => CheckStatus::Single(sq),
                None => CheckStatus::NotInCheck,
            }
        };
    }

    /// Sets the stalemate and checkmate flags. Needs a current check status.
    pub(crate) fn update_mates(&mut self) {
        let stuck = !self.has_legal_moves();

        self.stalemate = stuck && !self.in_check();
        self.mated = (stuck && self.in_check()).then_some(self.stm);
    }

    /******************************************\
    |==========================================|
    |           Insufficient Material          |
    |==========================================|
    \******************************************/

    /// Neither side can ever deliver mate.
    ///
    /// True when all remaining non-king pieces are bishops standing on one
    /// square colour (bare kings included), or when one side has a lone king
    /// and the other a king and a single knight.
    pub(crate) fn calc_insufficient_material(&self) -> bool {
        use PieceType::*;

        let white = self.occupied_bb(Colour::White) & !self.piece_bb(Colour::White, King);
        let black = self.occupied_bb(Colour::Black) & !self.piece_bb(Colour::Black, King);
        let bishops = self.piecetype_bb(Bishop);

        if (white | black) == bishops
            && ((bishops & Bitboard::DARK_SQUARES).is_empty()
                || (bishops & Bitboard::LIGHT_SQUARES).is_empty())
        {
            return true;
        }

        let lone_knight = |side: Bitboard, col: Colour| {
            side.is_singleton() && side == self.piece_bb(col, Knight)
        };

        (lone_knight(white, Colour::White) && black.is_empty())
            || (lone_knight(black, Colour::Black) && white.is_empty())
    }

    /******************************************\
    |==========================================|
    |           Terminal Predicates            |
    |==========================================|
    \******************************************/

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    #[inline]
    pub fn white_wins_by_checkmate(&self) -> bool {
        self.mated == Some(Colour::Black)
    }

    #[inline]
    pub fn black_wins_by_checkmate(&self) -> bool {
        self.mated == Some(Colour::White)
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.mated.is_some()
    }

    #[inline]
    pub fn is_draw_by_insufficient_material(&self) -> bool {
        self.insufficient_material
    }

    /// A hundred plies without a capture or pawn move, unless the last one mated
    #[inline]
    pub fn is_draw_by_fifty_move_rule(&self) -> bool {
        self.halfmove >= 100 && self.mated.is_none()
    }

    pub fn has_game_ended(&self) -> bool {
        self.is_checkmate()
            || self.is_stalemate()
            || self.is_draw_by_insufficient_material()
            || self.is_draw_by_fifty_move_rule()
    }
}
