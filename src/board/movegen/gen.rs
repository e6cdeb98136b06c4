//! # Module: `gen`
//!
//! Generates the legal moves of a position in one pass, with no make/unmake
//! verification.
//!
//! ## Core Concepts
//!
//! - **Pins**: every enemy slider on one of the king's empty-board lines with
//!   exactly one piece between them pins that piece. The squares between are
//!   collected into a diagonal or orthogonal pin mask, and a pinned piece may
//!   only move along the line it is pinned on. Enemy pieces can land in the
//!   masks too, which is harmless since the masks only filter our own pieces.
//! - **Attacked squares**: the enemy's attacks with our king lifted off the
//!   board, so the king cannot step backwards along a checking ray.
//! - **Checks**: in double check only king moves are generated. In single check
//!   every other move must land on the check-response set of the checker.
//! - **Sinks**: moves are pushed into a [`MoveSink`], which may stop generation
//!   at any point by returning `ControlFlow::Break`.
//!
//! ## Order
//!
//! King moves, en passant, castling, knights, bishops, rooks, queens, pawn
//! captures to the left, pawn captures to the right, single pushes, double
//! pushes.

use std::ops::ControlFlow;

use super::*;
use crate::board::{CheckStatus, Position};
use crate::core::*;

/******************************************\
|==========================================|
|              Generation Context          |
|==========================================|
\******************************************/

/// Everything the generator derives from the position once up front
struct Context<'a> {
    pos: &'a Position,

    us: Colour,

    king: Square,

    own: Bitboard,

    enemy: Bitboard,

    all: Bitboard,

    king_diag: Bitboard,

    king_orth: Bitboard,

    /// Enemy bishops and queens on the king's diagonals
    eff_bishops: Bitboard,

    /// Enemy rooks and queens on the king's files and ranks
    eff_rooks: Bitboard,

    diag_pin: Bitboard,

    orth_pin: Bitboard,

    attacked: Bitboard,
}

impl<'a> Context<'a> {
    fn new(pos: &'a Position) -> Self {
        let us = pos.stm();
        let them = !us;
        let king = pos.king_sq(us);

        let own = pos.occupied_bb(us);
        let enemy = pos.occupied_bb(them);
        let all = own | enemy;

        let king_diag = bishop_rays(king);
        let king_orth = rook_rays(king);

        let queens = pos.piece_bb(them, PieceType::Queen);
        let eff_bishops = king_diag & (pos.piece_bb(them, PieceType::Bishop) | queens);
        let eff_rooks = king_orth & (pos.piece_bb(them, PieceType::Rook) | queens);

        let diag_pin = pinned_lines(king, all, eff_bishops, bishop_line);
        let orth_pin = pinned_lines(king, all, eff_rooks, rook_line);

        let attacked = attacked_squares(pos, them, all & !king.bb());

        Self {
            pos,
            us,
            king,
            own,
            enemy,
            all,
            king_diag,
            king_orth,
            eff_bishops,
            eff_rooks,
            diag_pin,
            orth_pin,
            attacked,
        }
    }

    /// Flag for a move landing on `to`, named after the enemy piece found there
    #[inline]
    fn landing_flag(&self, to: Square) -> MoveFlag {
        if !self.enemy.contains(to) {
            return MoveFlag::Normal;
        }

        match self.pos.non_king_on(!self.us, to) {
            Some(victim) => MoveFlag::capture_flag(Some(victim)),
            None => panic!("Capture onto {to} found no enemy piece to take"),
        }
    }
}

/******************************************\
|==========================================|
|              Helper Functions            |
|==========================================|
\******************************************/

/// Union of the squares between the king and every slider in `sliders` that
/// has exactly one piece in the way
#[inline]
fn pinned_lines(
    king: Square,
    all: Bitboard,
    mut sliders: Bitboard,
    line: fn(Square, Square) -> Bitboard,
) -> Bitboard {
    let mut pinned = Bitboard::EMPTY;

    while let Some(pinner) = sliders.pop_lsb() {
        let interposing = line(king, pinner) & !pinner.bb();
        if (interposing & all).is_singleton() {
            pinned |= interposing;
        }
    }

    pinned
}

/// Every square attacked by `col` when the board holds `occ`
pub(crate) fn attacked_squares(pos: &Position, col: Colour, occ: Bitboard) -> Bitboard {
    let mut attacked = king_attack(pos.king_sq(col))
        | Bitboard::pawn_attacks(col, pos.piece_bb(col, PieceType::Pawn));

    pos.piece_bb(col, PieceType::Knight)
        .for_each(|sq| attacked |= knight_attack(sq));

    let queens = pos.piece_bb(col, PieceType::Queen);

    (pos.piece_bb(col, PieceType::Bishop) | queens)
        .for_each(|sq| attacked |= bishop_attacks(sq, occ));

    (pos.piece_bb(col, PieceType::Rook) | queens)
        .for_each(|sq| attacked |= rook_attacks(sq, occ));

    attacked
}

/// Pushes a pawn move, expanding it into the four promotions on the last rank
#[inline]
fn push_pawn_move<S: MoveSink>(
    sink: &mut S,
    from: Square,
    to: Square,
    flag: MoveFlag,
) -> ControlFlow<()> {
    if matches!(to.rank(), Rank::Rank1 | Rank::Rank8) {
        for pt in PieceType::PROMOTIONS {
            sink.push(Move::new_promotion(from, to, pt))?;
        }
        ControlFlow::Continue(())
    } else {
        sink.push(Move::new(from, to, flag))
    }
}

/******************************************\
|==========================================|
|            Piece Generators              |
|==========================================|
\******************************************/

fn gen_king_moves<S: MoveSink>(ctx: &Context, sink: &mut S) -> ControlFlow<()> {
    let mut dest = king_attack(ctx.king) & !ctx.attacked & !ctx.own;

    while let Some(to) = dest.pop_lsb() {
        sink.push(Move::new(ctx.king, to, ctx.landing_flag(to)))?;
    }

    ControlFlow::Continue(())
}

/// En passant, checked by replaying the capture on the occupancy: removing two
/// pawns from one rank can expose the king in a way no pin mask describes
fn gen_en_passant<S: MoveSink>(ctx: &Context, sink: &mut S) -> ControlFlow<()> {
    let Some(file) = ctx.pos.ep_file() else {
        return ControlFlow::Continue(());
    };

    let (target_rank, pawn_rank) = match ctx.us {
        Colour::White => (Rank::Rank6, Rank::Rank5),
        Colour::Black => (Rank::Rank3, Rank::Rank4),
    };

    let target = Square::from_parts(file, target_rank);
    let captured = Square::from_parts(file, pawn_rank);

    if let CheckStatus::Single(checker) = ctx.pos.check_status() {
        if checker != captured {
            return ControlFlow::Continue(());
        }
    }

    let capturers = Bitboard::adjacent_files(captured)
        & pawn_rank.bb()
        & ctx.pos.piece_bb(ctx.us, PieceType::Pawn);

    let mut remaining = capturers;
    while let Some(from) = remaining.pop_lsb() {
        let post = (ctx.all | target.bb()) & !captured.bb() & !from.bb();

        let exposed = (bishop_attacks(ctx.king, post) & ctx.eff_bishops).is_occupied()
            || (rook_attacks(ctx.king, post) & ctx.eff_rooks).is_occupied();

        if !exposed {
            sink.push(Move::new(from, target, MoveFlag::EnPassant))?;
        }
    }

    ControlFlow::Continue(())
}

fn gen_castling<S: MoveSink>(ctx: &Context, sink: &mut S) -> ControlFlow<()> {
    let rights = ctx.pos.castling();
    let rooks = ctx.pos.piece_bb(ctx.us, PieceType::Rook);

    let options = match ctx.us {
        Colour::White => [
            (Castling::WK, Square::E1, Square::H1, Bitboard::E1_F1_G1, Bitboard::E1_THROUGH_H1, Bitboard::E1_H1, Move::WHITE_SHORT_CASTLE),
            (Castling::WQ, Square::E1, Square::A1, Bitboard::E1_D1_C1, Bitboard::E1_THROUGH_A1, Bitboard::E1_A1, Move::WHITE_LONG_CASTLE),
        ],
        Colour::Black => [
            (Castling::BK, Square::E8, Square::H8, Bitboard::E8_F8_G8, Bitboard::E8_THROUGH_H8, Bitboard::E8_H8, Move::BLACK_SHORT_CASTLE),
            (Castling::BQ, Square::E8, Square::A8, Bitboard::E8_D8_C8, Bitboard::E8_THROUGH_A8, Bitboard::E8_A8, Move::BLACK_LONG_CASTLE),
        ],
    };

    for (right, king_sq, rook_sq, king_path, span, ends, castle) in options {
        let allowed = rights.has(right)
            && ctx.king == king_sq
            && rooks.contains(rook_sq)
            && (ctx.attacked & king_path).is_empty()
            && (ctx.all & span) == ends;

        if allowed {
            sink.push(castle)?;
        }
    }

    ControlFlow::Continue(())
}

/// Knights, bishops, rooks and queens
fn gen_piece_moves<S: MoveSink>(ctx: &Context, sink: &mut S, block: Bitboard) -> ControlFlow<()> {
    for pt in [
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
    ] {
        let mut pieces = ctx.pos.piece_bb(ctx.us, pt);

        while let Some(from) = pieces.pop_lsb() {
            let mut dest = attacks(ctx.us, pt, from, ctx.all) & block & !ctx.own;

            if ctx.diag_pin.contains(from) {
                dest &= ctx.king_diag & bishop_rays(from);
            } else if ctx.orth_pin.contains(from) {
                dest &= ctx.king_orth & rook_rays(from);
            }

            while let Some(to) = dest.pop_lsb() {
                sink.push(Move::new(from, to, ctx.landing_flag(to)))?;
            }
        }
    }

    ControlFlow::Continue(())
}

fn gen_pawn_moves<S: MoveSink>(ctx: &Context, sink: &mut S, block: Bitboard) -> ControlFlow<()> {
    let pawns = ctx.pos.piece_bb(ctx.us, PieceType::Pawn);
    let empty = !ctx.all;
    let targets = ctx.enemy & block;

    // An orthogonally pinned pawn can only advance along the king's file
    let push_pin = !ctx.diag_pin & (!ctx.orth_pin | ctx.king.file().bb());

    // Shifting by `left` maps a capture square back to its capturer and
    // shifting by `right` does the reverse, for both colours
    let (left, right): (u8, u8) = match ctx.us {
        Colour::White => (7, 9),
        Colour::Black => (9, 7),
    };

    let mut left_captures = pawns
        & (targets << left)
        & !ctx.orth_pin
        & (!ctx.diag_pin | (ctx.eff_bishops << left));

    while let Some(from) = left_captures.pop_lsb() {
        let to = unsafe { Square::from_unchecked(from as u8 - left) };
        push_pawn_move(sink, from, to, ctx.landing_flag(to))?;
    }

    let mut right_captures = pawns
        & (targets >> right)
        & !ctx.orth_pin
        & (!ctx.diag_pin | (ctx.eff_bishops >> right));

    while let Some(from) = right_captures.pop_lsb() {
        let to = unsafe { Square::from_unchecked(from as u8 + right) };
        push_pawn_move(sink, from, to, ctx.landing_flag(to))?;
    }

    let forward = ctx.us.forward();
    let (single, double) = match ctx.us {
        Colour::White => (
            pawns & ((empty & block) >> 1) & push_pin,
            pawns
                & Bitboard::push_rank(Colour::White)
                & (empty >> 1)
                & (empty >> 2)
                & (block >> 2)
                & push_pin,
        ),
        Colour::Black => (
            pawns & ((empty & block) << 1) & push_pin,
            pawns
                & Bitboard::push_rank(Colour::Black)
                & (empty << 1)
                & (empty << 2)
                & (block << 2)
                & push_pin,
        ),
    };

    let mut single = single;
    while let Some(from) = single.pop_lsb() {
        let to = unsafe { from.step_unchecked(forward) };
        push_pawn_move(sink, from, to, MoveFlag::Normal)?;
    }

    let mut double = double;
    while let Some(from) = double.pop_lsb() {
        let to = unsafe { from.step_unchecked(ctx.us.double_forward()) };
        sink.push(Move::new(from, to, MoveFlag::DoublePush))?;
    }

    ControlFlow::Continue(())
}

/******************************************\
|==========================================|
|               Entry Point                |
|==========================================|
\******************************************/

/// Pushes every legal move of `pos` into `sink`
pub(crate) fn generate_legal<S: MoveSink>(pos: &Position, sink: &mut S) -> ControlFlow<()> {
    let ctx = Context::new(pos);

    gen_king_moves(&ctx, sink)?;

    let block = match pos.check_status() {
        CheckStatus::Double => return ControlFlow::Continue(()),
        CheckStatus::Single(checker) => {
            gen_en_passant(&ctx, sink)?;
            check_response(ctx.king, checker)
        }
        CheckStatus::NotInCheck => {
            gen_en_passant(&ctx, sink)?;
            gen_castling(&ctx, sink)?;
            Bitboard::FULL
        }
    };

    gen_piece_moves(&ctx, sink, block)?;
    gen_pawn_moves(&ctx, sink, block)
}
