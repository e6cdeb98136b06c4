use super::Position;
use crate::core::*;
use crate::utils::PRNG;

/******************************************\
|==========================================|
|              Key Definition              |
|==========================================|
\******************************************/

/// A Zobrist key
pub type Key = u64;

/// Seed for the key table. Changing it changes every key.
pub const ZOBRIST_SEED: u64 = 0xDEADBEEFCAFEBABE;

/******************************************\
|==========================================|
|              Zobrist Table               |
|==========================================|
\******************************************/

/// The random keys XORed together to form a position key
#[derive(Debug)]
pub struct ZobristTable {
    /// `pieces[colour][piece type][square]`, kings included
    pub pieces: [[[Key; Square::NUM]; PieceType::NUM]; Colour::NUM],
    /// XORed in while white is to move
    pub white_to_move: Key,
    /// One key per right, in `WK`, `WQ`, `BK`, `BQ` order
    pub castling: [Key; 4],
    /// Files a to h, then the "no en passant" key
    pub enpassant: [Key; File::NUM + 1],
}

pub const ZOBRIST: ZobristTable = init_zobrist_table();

const fn init_zobrist_table() -> ZobristTable {
    let mut rng = PRNG::new(ZOBRIST_SEED);

    let mut pieces = [[[0; Square::NUM]; PieceType::NUM]; Colour::NUM];
    let mut castling = [0; 4];
    let mut enpassant = [0; File::NUM + 1];

    let mut c = 0;
    while c < Colour::NUM {
        let mut p = 0;
        while p < PieceType::NUM {
            let mut s = 0;
            while s < Square::NUM {
                pieces[c][p][s] = rng.random_u64();
                s += 1;
            }
            p += 1;
        }
        c += 1;
    }

    let white_to_move = rng.random_u64();

    let mut i = 0;
    while i < castling.len() {
        castling[i] = rng.random_u64();
        i += 1;
    }

    i = 0;
    while i < enpassant.len() {
        enpassant[i] = rng.random_u64();
        i += 1;
    }

    ZobristTable {
        pieces,
        white_to_move,
        castling,
        enpassant,
    }
}

/******************************************\
|==========================================|
|              Access Functions            |
|==========================================|
\******************************************/

#[inline]
pub fn piece_key(col: Colour, pt: PieceType, sq: Square) -> Key {
    unsafe {
        *ZOBRIST
            .pieces
            .get_unchecked(col.index())
            .get_unchecked(pt.index())
            .get_unchecked(sq.index())
    }
}

#[inline]
pub fn side_key() -> Key {
    ZOBRIST.white_to_move
}

/// XOR of the keys of every right in `rights`
#[inline]
pub fn castle_key(rights: Castling) -> Key {
    let mut key = 0;
    for (i, &right_key) in ZOBRIST.castling.iter().enumerate() {
        if rights.0 & (1 << i) != 0 {
            key ^= right_key;
        }
    }
    key
}

/// Key for the en passant file, or the dedicated key when there is none
#[inline]
pub fn ep_key(file: Option<File>) -> Key {
    match file {
        Some(file) => ZOBRIST.enpassant[file.index()],
        None => ZOBRIST.enpassant[File::NUM],
    }
}

/******************************************\
|==========================================|
|           Position Implementation        |
|==========================================|
\******************************************/

impl Position {
    /// The key computed from scratch. Always equal to [`Position::key`].
    pub fn calc_key(&self) -> Key {
        let mut key = 0;

        for col in [Colour::White, Colour::Black] {
            for pt in PieceType::iter() {
                self.piece_bb(col, pt).for_each(|sq| key ^= piece_key(col, pt, sq));
            }
        }

        if self.stm == Colour::White {
            key ^= side_key();
        }

        key ^ castle_key(self.castling) ^ ep_key(self.ep_file)
    }

    #[inline]
    pub(crate) fn toggle_piece_key(&mut self, col: Colour, pt: PieceType, sq: Square) {
        self.key ^= piece_key(col, pt, sq);
    }

    /// Removes the rights in `revoked` that are still held, keeping the key in step
    #[inline]
    pub(crate) fn revoke_castling(&mut self, revoked: Castling) {
        let lost = Castling(self.castling.0 & revoked.0);
        self.key ^= castle_key(lost);
        self.castling.remove(lost);
    }

    #[inline]
    pub(crate) fn set_ep_file(&mut self, file: Option<File>) {
        self.key ^= ep_key(self.ep_file) ^ ep_key(file);
        self.ep_file = file;
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::super::fen::*;
    use super::*;

    fn key_from_fen(fen: &str) -> Key {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.key(), pos.calc_key(), "stored key differs for {fen}");
        pos.key()
    }

    #[test]
    fn test_zobrist_table_init() {
        assert_ne!(piece_key(Colour::White, PieceType::Pawn, Square::E4), 0);
        assert_ne!(side_key(), 0);
        assert_ne!(ep_key(None), 0);

        assert_ne!(
            piece_key(Colour::White, PieceType::Pawn, Square::E4),
            piece_key(Colour::Black, PieceType::Pawn, Square::E4)
        );
        assert_ne!(
            piece_key(Colour::White, PieceType::King, Square::E1),
            piece_key(Colour::White, PieceType::Queen, Square::E1)
        );
        assert_ne!(ep_key(Some(File::FileA)), ep_key(Some(File::FileH)));
        assert_ne!(ep_key(Some(File::FileH)), ep_key(None));
    }

    #[test]
    fn test_castle_key_combines_rights() {
        assert_eq!(castle_key(Castling::NONE), 0);
        assert_eq!(
            castle_key(Castling::ALL),
            castle_key(Castling::WK)
                ^ castle_key(Castling::WQ)
                ^ castle_key(Castling::BK)
                ^ castle_key(Castling::BQ)
        );
        assert_ne!(castle_key(Castling::WK), castle_key(Castling::BK));
    }

    #[test]
    fn test_startpos_key() {
        let key = key_from_fen(START_FEN);
        assert_ne!(key, 0);
        assert_eq!(key, Position::start().key());
    }

    #[test]
    fn test_piece_difference() {
        let start = key_from_fen(START_FEN);
        let nc3 = key_from_fen("rnbqkbnr/pppppppp/8/8/8/2N5/PPPPPPPP/R1BQKBNR w KQkq - 0 1");

        let expected = start
            ^ piece_key(Colour::White, PieceType::Knight, Square::B1)
            ^ piece_key(Colour::White, PieceType::Knight, Square::C3);
        assert_eq!(nc3, expected);
    }

    #[test]
    fn test_side_difference() {
        let white = key_from_fen(START_FEN);
        let black = key_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
        assert_eq!(white ^ black, side_key());
    }

    #[test]
    fn test_castling_difference() {
        let all = key_from_fen(START_FEN);
        let no_bq = key_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQk - 0 1");
        let none = key_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1");

        assert_eq!(all ^ no_bq, castle_key(Castling::BQ));
        assert_eq!(all ^ none, castle_key(Castling::ALL));
    }

    #[test]
    fn test_enpassant_difference() {
        let base = key_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
        let ep = key_from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");

        assert_eq!(base ^ ep, ep_key(None) ^ ep_key(Some(File::FileE)));
    }

    #[test]
    fn test_revoke_castling_keeps_key() {
        let mut pos = Position::start();
        pos.revoke_castling(Castling::WHITE_CASTLING);
        pos.revoke_castling(Castling::WK);

        assert_eq!(pos.castling(), Castling::BLACK_CASTLING);
        assert_eq!(pos.key(), pos.calc_key());
    }

    #[test]
    fn test_reference_position_keys_differ() {
        let keys = [
            key_from_fen(START_FEN),
            key_from_fen(KIWIPETE_FEN),
            key_from_fen(POSITION_3_FEN),
            key_from_fen(POSITION_4_FEN),
            key_from_fen(POSITION_5_FEN),
        ];
        for i in 0..keys.len() {
            for j in i + 1..keys.len() {
                assert_ne!(keys[i], keys[j]);
            }
        }
    }
}
