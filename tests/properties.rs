//! Seeded random playouts checking the invariants every reachable position keeps.

use chess_core::board::{KIWIPETE_FEN, POSITION_4_FEN, POSITION_5_FEN};
use chess_core::{Move, Position, START_FEN, init_tables};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PLAYOUTS: u64 = 40;
const MAX_PLIES: usize = 200;

/// Plays random legal moves from `fen`, calling `check` on the position before
/// each move with the move about to be played
fn playout(fen: &str, seed: u64, mut check: impl FnMut(&Position, Move)) -> Position {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Position::from_fen(fen).unwrap();

    for _ in 0..MAX_PLIES {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            break;
        }

        let move_ = moves.as_slice()[rng.random_range(0..moves.len())];
        check(&pos, move_);
        pos.make_move(move_);
    }

    pos
}

fn starts() -> [&'static str; 4] {
    [START_FEN, KIWIPETE_FEN, POSITION_4_FEN, POSITION_5_FEN]
}

#[test]
fn incremental_key_matches_recomputed() {
    init_tables();
    for fen in starts() {
        for seed in 0..PLAYOUTS {
            let end = playout(fen, seed, |pos, _| {
                assert_eq!(pos.key(), pos.calc_key(), "{}", pos.to_fen());
            });
            assert_eq!(end.key(), end.calc_key());
        }
    }
}

#[test]
fn fen_round_trip() {
    init_tables();
    for fen in starts() {
        for seed in 0..PLAYOUTS {
            playout(fen, seed, |pos, _| {
                let text = pos.to_fen();
                let parsed = Position::from_fen(&text).unwrap();
                assert_eq!(&parsed, pos, "{text}");
            });
        }
    }
}

#[test]
fn moves_never_leave_the_king_attacked() {
    init_tables();
    for fen in starts() {
        for seed in 0..PLAYOUTS {
            playout(fen, seed, |pos, move_| {
                let us = pos.stm();
                if !move_.is_castle() {
                    assert!(pos.occupied_bb(us).contains(move_.from()), "{move_} in {}", pos.to_fen());
                }

                let mut child = *pos;
                child.make_move(move_);
                assert!(
                    !child.attacked_by(!us).contains(child.king_sq(us)),
                    "{move_} leaves the king en prise in {}",
                    pos.to_fen()
                );
            });
        }
    }
}

#[test]
fn notation_round_trip() {
    init_tables();
    for fen in starts() {
        for seed in 0..PLAYOUTS / 4 {
            playout(fen, seed, |pos, _| {
                for &move_ in pos.legal_moves().iter() {
                    let san = pos.move_to_san(move_);
                    assert_eq!(pos.san_to_move(&san), Ok(move_), "{san} in {}", pos.to_fen());

                    let pure = pos.move_to_pure(move_);
                    assert_eq!(pos.pure_to_move(&pure), Ok(move_), "{pure} in {}", pos.to_fen());
                }
            });
        }
    }
}

#[test]
fn terminal_flags_agree_with_move_generation() {
    init_tables();
    for seed in 0..PLAYOUTS * 4 {
        let end = playout(START_FEN, seed, |pos, _| {
            assert!(!pos.is_checkmate() && !pos.is_stalemate());
        });

        if end.legal_moves().is_empty() {
            assert!(end.is_checkmate() != end.is_stalemate());
            assert_eq!(end.is_checkmate(), end.in_check());
            assert!(end.has_game_ended());
        } else {
            assert!(!end.is_checkmate() && !end.is_stalemate());
        }
    }
}

#[test]
fn san_game_to_checkmate() {
    init_tables();
    let mut pos = Position::start();
    for san in ["e4", "e5", "Qh5", "Nc6", "Bc4", "Nf6", "Qxf7#"] {
        pos.make_san(san).unwrap();
    }

    assert!(pos.is_checkmate());
    assert!(pos.white_wins_by_checkmate());
    assert!(!pos.black_wins_by_checkmate());
    assert!(pos.has_game_ended());
    assert_eq!(
        pos.to_fen(),
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1"
    );
}
