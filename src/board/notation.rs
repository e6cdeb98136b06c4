//! Pure algebraic (`e2e4`, `e7e8q`) and SAN (`Nbd7`, `exd6`, `O-O+`) moves.
//!
//! Decoding reads the board to recover the move flag, so both directions need
//! the position the move is played from.

use super::Position;
use crate::core::*;

/******************************************\
|==========================================|
|             Pure Algebraic               |
|==========================================|
\******************************************/

impl Position {
    /// Decodes a pure algebraic move. The result is not checked for legality.
    pub fn pure_to_move(&self, pure: &str) -> Result<Move, NotationError> {
        let chars: Vec<char> = pure.chars().collect();
        if !(4..=5).contains(&chars.len()) {
            return Err(NotationError::InvalidLength(chars.len()));
        }

        let from: Square = chars[0..2].iter().collect::<String>().parse()?;
        let to: Square = chars[2..4].iter().collect::<String>().parse()?;

        let us = self.stm;
        let pawn_move = self.piece_bb(us, PieceType::Pawn).contains(from);

        if pawn_move && self.ep_target() == Some(to) {
            return Ok(Move::new(from, to, MoveFlag::EnPassant));
        }

        if from == self.king_sq(us) {
            if let Some(castle) = self.castle_by_squares(from, to) {
                return Ok(castle);
            }
        }

        if let Some(&c) = chars.get(4) {
            let promoted =
                PieceType::from_promotion_char(c).ok_or(NotationError::InvalidPromotion(c))?;
            return Ok(Move::new_promotion(from, to, promoted));
        }

        if self.all_occupied_bb().contains(to) {
            let flag = MoveFlag::capture_flag(self.non_king_on(!us, to));
            return Ok(Move::new(from, to, flag));
        }

        let start_rank = Rank::Rank2.relative(us);
        let double_rank = Rank::Rank4.relative(us);
        if pawn_move && from.rank() == start_rank && to.rank() == double_rank {
            return Ok(Move::new(from, to, MoveFlag::DoublePush));
        }

        Ok(Move::new(from, to, MoveFlag::Normal))
    }

    /// Pure algebraic text of a move. Castling is written as the king's step.
    #[inline]
    pub fn move_to_pure(&self, move_: Move) -> String {
        move_.to_string()
    }

    /// The castling sentinel for a king step from e1/e8 to g or c, if the right is held
    fn castle_by_squares(&self, from: Square, to: Square) -> Option<Move> {
        use Square::*;

        let (castle, right) = match (from, to) {
            (E1, G1) => (Move::WHITE_SHORT_CASTLE, Castling::WK),
            (E1, C1) => (Move::WHITE_LONG_CASTLE, Castling::WQ),
            (E8, G8) => (Move::BLACK_SHORT_CASTLE, Castling::BK),
            (E8, C8) => (Move::BLACK_LONG_CASTLE, Castling::BQ),
            _ => return None,
        };

        self.castling.has(right).then_some(castle)
    }

    /******************************************\
    |==========================================|
    |                   SAN                    |
    |==========================================|
    \******************************************/

    /// Standard algebraic notation of a legal move, with a `+` or `#` suffix
    pub fn move_to_san(&self, move_: Move) -> String {
        let mut san = String::new();

        if move_.is_castle() {
            san.push_str(match move_.to().file() {
                File::FileG => "O-O",
                _ => "O-O-O",
            });
        } else {
            let from = move_.from();
            let to = move_.to();
            let pt = self.on(from).map_or(PieceType::Pawn, |piece| piece.pt());

            match pt.san_char() {
                None => {
                    if move_.is_capture() {
                        san.push_str(&from.file().to_string());
                    }
                }
                Some(letter) => {
                    san.push(letter);
                    san.push_str(&self.disambiguation(move_, pt));
                }
            }

            if move_.is_capture() {
                san.push('x');
            }
            san.push_str(&to.to_string());

            if let Some(promoted) = move_.promotion_pt() {
                san.push('=');
                san.push(promoted.san_char().unwrap_or('Q'));
            }
        }

        let mut after = *self;
        after.make_move(move_);
        if after.is_checkmate() {
            san.push('#');
        } else if after.in_check() {
            san.push('+');
        }

        san
    }

    /// File and/or rank of the start square needed to tell `move_` apart from
    /// other moves of the same piece type to the same square
    fn disambiguation(&self, move_: Move, pt: PieceType) -> String {
        let from = move_.from();
        let (mut need_file, mut need_rank) = (false, false);
        let mut rivals = false;

        for rival in self.legal_moves().iter() {
            if rival.is_castle() || rival.to() != move_.to() || rival.from() == from {
                continue;
            }
            if self.on(rival.from()).map(|piece| piece.pt()) != Some(pt) {
                continue;
            }

            rivals = true;
            if rival.from().file() == from.file() {
                need_rank = true;
            }
            if rival.from().rank() == from.rank() {
                need_file = true;
            }
        }

        // A rival sharing neither file nor rank is told apart by the file
        if rivals && !need_rank {
            need_file = true;
        }

        let mut text = String::new();
        if need_file {
            text.push_str(&from.file().to_string());
        }
        if need_rank {
            text.push_str(&from.rank().to_string());
        }
        text
    }

    /// Decodes a SAN move against the legal moves of the position.
    ///
    /// Check and mate suffixes are accepted without being verified.
    pub fn san_to_move(&self, san: &str) -> Result<Move, NotationError> {
        let no_match = || NotationError::NoMatchingMove(san.to_string());
        let legal = self.legal_moves();

        let castle = match (self.stm, san.contains("O-O-O"), san.contains("O-O")) {
            (Colour::White, true, _) => Some(Move::WHITE_LONG_CASTLE),
            (Colour::White, false, true) => Some(Move::WHITE_SHORT_CASTLE),
            (Colour::Black, true, _) => Some(Move::BLACK_LONG_CASTLE),
            (Colour::Black, false, true) => Some(Move::BLACK_SHORT_CASTLE),
            _ => None,
        };

        if let Some(castle) = castle {
            return if legal.contains(castle) {
                Ok(castle)
            } else {
                Err(no_match())
            };
        }

        let mut body: Vec<char> = san.trim_end_matches(['+', '#']).chars().collect();

        let mut promotion = None;
        if body.len() >= 2 && body[body.len() - 2] == '=' {
            let c = body[body.len() - 1];
            let promoted =
                PieceType::from_promotion_char(c).ok_or(NotationError::InvalidPromotion(c))?;
            promotion = Some(promoted);
            body.truncate(body.len() - 2);
        }

        if body.len() < 2 {
            return Err(no_match());
        }
        let to: Square = body[body.len() - 2..].iter().collect::<String>().parse()?;
        body.truncate(body.len() - 2);

        let mut rest = body.as_slice();
        let pt = match rest.first() {
            Some(&c) if c.is_ascii_uppercase() => {
                rest = &rest[1..];
                PieceType::from_san_char(c).ok_or(NotationError::InvalidPieceChar(c))?
            }
            _ => PieceType::Pawn,
        };

        let (mut file, mut rank) = (None, None);
        for &c in rest {
            match c {
                'x' => {}
                'a'..='h' => file = File::from_char(c),
                '1'..='8' => rank = Rank::from_char(c),
                _ => return Err(no_match()),
            }
        }

        // Pawn captures always name their file, so a bare pawn move is a push
        if pt == PieceType::Pawn && file.is_none() {
            file = Some(to.file());
        }

        let mut candidates = legal.iter().filter(|m| {
            !m.is_castle()
                && m.to() == to
                && m.promotion_pt() == promotion
                && self.on(m.from()).map(|piece| piece.pt()) == Some(pt)
                && file.is_none_or(|f| m.from().file() == f)
                && rank.is_none_or(|r| m.from().rank() == r)
        });

        match (candidates.next(), candidates.next()) {
            (Some(&m), None) => Ok(m),
            (None, _) => Err(no_match()),
            (Some(_), Some(_)) => Err(NotationError::AmbiguousMove(san.to_string())),
        }
    }

    /******************************************\
    |==========================================|
    |            Applying Notation             |
    |==========================================|
    \******************************************/

    /// Plays a SAN move. On error the position is left untouched.
    pub fn make_san(&mut self, san: &str) -> Result<(), NotationError> {
        let move_ = self.san_to_move(san).inspect_err(|err| {
            log::trace!("rejected SAN '{san}' in {}: {err}", self.to_fen());
        })?;

        self.make_move(move_);
        Ok(())
    }

    /// Plays a pure algebraic move. On error the position is left untouched.
    pub fn make_pure(&mut self, pure: &str) -> Result<(), NotationError> {
        let move_ = self.pure_to_move(pure).inspect_err(|err| {
            log::trace!("rejected move '{pure}' in {}: {err}", self.to_fen());
        })?;

        if !self.is_legal(move_) {
            log::trace!("illegal move '{pure}' in {}", self.to_fen());
            return Err(NotationError::IllegalMove(pure.to_string()));
        }

        self.make_move(move_);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::KIWIPETE_FEN;
    use crate::core::Square::*;

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_pure_flags_from_board() {
        let p = Position::start();
        assert_eq!(p.pure_to_move("e2e4"), Ok(Move::new(E2, E4, MoveFlag::DoublePush)));
        assert_eq!(p.pure_to_move("e2e3"), Ok(Move::new(E2, E3, MoveFlag::Normal)));
        assert_eq!(p.pure_to_move("g1f3"), Ok(Move::new(G1, F3, MoveFlag::Normal)));

        let p = pos(KIWIPETE_FEN);
        assert_eq!(p.pure_to_move("e1g1"), Ok(Move::WHITE_SHORT_CASTLE));
        assert_eq!(p.pure_to_move("e1c1"), Ok(Move::WHITE_LONG_CASTLE));
        assert_eq!(p.pure_to_move("e5f7"), Ok(Move::new(E5, F7, MoveFlag::CapturePawn)));
        assert_eq!(p.pure_to_move("f3f6"), Ok(Move::new(F3, F6, MoveFlag::CaptureKnight)));

        let p = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(p.pure_to_move("e5d6"), Ok(Move::new(E5, D6, MoveFlag::EnPassant)));

        let p = pos("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(p.pure_to_move("a7b8n"), Ok(Move::new_promotion(A7, B8, PieceType::Knight)));
        assert_eq!(p.pure_to_move("a7a8q"), Ok(Move::new_promotion(A7, A8, PieceType::Queen)));
    }

    #[test]
    fn test_pure_errors() {
        let p = Position::start();
        assert_eq!(p.pure_to_move("e2e"), Err(NotationError::InvalidLength(3)));
        assert_eq!(p.pure_to_move("e2e4qq"), Err(NotationError::InvalidLength(6)));
        assert!(matches!(p.pure_to_move("z2e4"), Err(NotationError::InvalidSquare(_))));
        assert_eq!(p.pure_to_move("e7e8k"), Err(NotationError::InvalidPromotion('k')));
    }

    #[test]
    fn test_move_to_pure() {
        let p = Position::start();
        for text in ["e2e4", "b1c3", "g1h3"] {
            let mv = p.pure_to_move(text).unwrap();
            assert_eq!(p.move_to_pure(mv), text);
        }
        assert_eq!(p.move_to_pure(Move::BLACK_LONG_CASTLE), "e8c8");
    }

    #[test]
    fn test_san_basic() {
        let p = Position::start();
        assert_eq!(p.move_to_san(Move::new(E2, E4, MoveFlag::DoublePush)), "e4");
        assert_eq!(p.move_to_san(Move::new(G1, F3, MoveFlag::Normal)), "Nf3");

        let p = pos(KIWIPETE_FEN);
        assert_eq!(p.move_to_san(Move::WHITE_SHORT_CASTLE), "O-O");
        assert_eq!(p.move_to_san(Move::WHITE_LONG_CASTLE), "O-O-O");
        assert_eq!(p.move_to_san(Move::new(E5, F7, MoveFlag::CapturePawn)), "Nxf7");
        assert_eq!(p.move_to_san(Move::new(D5, E6, MoveFlag::CapturePawn)), "dxe6");
        assert_eq!(p.move_to_san(Move::new(F3, F6, MoveFlag::CaptureKnight)), "Qxf6");
    }

    #[test]
    fn test_san_promotion_and_check() {
        let p = pos("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(p.move_to_san(Move::new_promotion(A7, B8, PieceType::Queen)), "axb8=Q+");
        assert_eq!(p.move_to_san(Move::new_promotion(A7, A8, PieceType::Knight)), "a8=N");

        let p = pos("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1");
        assert_eq!(p.move_to_san(Move::new(D1, D8, MoveFlag::Normal)), "Rd8#");
    }

    #[test]
    fn test_san_disambiguation() {
        // Knights on b1 and f1 both reach d2
        let p = pos("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        let mv = Move::new(B1, D2, MoveFlag::Normal);
        assert_eq!(p.move_to_san(mv), "Nbd2");
        assert_eq!(p.san_to_move("Nbd2"), Ok(mv));

        // Rooks on a1 and a5 share the file
        let p = pos("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
        let mv = Move::new(A1, A3, MoveFlag::Normal);
        assert_eq!(p.move_to_san(mv), "R1a3");
        assert_eq!(p.san_to_move("R1a3"), Ok(mv));

        // Queens on a1, a3 and c1 all reach c3
        let p = pos("4k3/8/8/8/8/Q7/8/Q1Q1K3 w - - 0 1");
        let mv = Move::new(A1, C3, MoveFlag::Normal);
        assert_eq!(p.move_to_san(mv), "Qa1c3");
        assert_eq!(p.san_to_move("Qa1c3"), Ok(mv));
        assert_eq!(
            p.san_to_move("Qc3"),
            Err(NotationError::AmbiguousMove("Qc3".to_string()))
        );

        // Queens on a1, a3 and c3 all reach b2: the rank alone singles out a1
        let p = pos("4k3/8/8/8/8/Q1Q5/8/Q3K3 w - - 0 1");
        let mv = Move::new(A1, B2, MoveFlag::Normal);
        assert_eq!(p.move_to_san(mv), "Q1b2");
        assert_eq!(p.san_to_move("Q1b2"), Ok(mv));
        assert_eq!(p.move_to_san(Move::new(C3, B2, MoveFlag::Normal)), "Qcb2");
    }

    #[test]
    fn test_san_to_move() {
        let p = Position::start();
        assert_eq!(p.san_to_move("e4"), Ok(Move::new(E2, E4, MoveFlag::DoublePush)));
        assert_eq!(p.san_to_move("Nf3"), Ok(Move::new(G1, F3, MoveFlag::Normal)));
        assert_eq!(p.san_to_move("Nf3+"), Ok(Move::new(G1, F3, MoveFlag::Normal)));
        assert_eq!(p.san_to_move("O-O"), Err(NotationError::NoMatchingMove("O-O".to_string())));
        assert_eq!(p.san_to_move("Ke2"), Err(NotationError::NoMatchingMove("Ke2".to_string())));
        assert_eq!(p.san_to_move("Xe4"), Err(NotationError::InvalidPieceChar('X')));

        let p = pos(KIWIPETE_FEN);
        assert_eq!(p.san_to_move("O-O"), Ok(Move::WHITE_SHORT_CASTLE));
        assert_eq!(p.san_to_move("O-O-O"), Ok(Move::WHITE_LONG_CASTLE));
        assert_eq!(p.san_to_move("dxe6"), Ok(Move::new(D5, E6, MoveFlag::CapturePawn)));

        let p = pos("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            p.san_to_move("axb8=R"),
            Ok(Move::new_promotion(A7, B8, PieceType::Rook))
        );
        assert_eq!(p.san_to_move("a8=K"), Err(NotationError::InvalidPromotion('K')));
    }

    #[test]
    fn test_san_round_trip_kiwipete() {
        let p = pos(KIWIPETE_FEN);
        for &mv in p.legal_moves().iter() {
            let san = p.move_to_san(mv);
            assert_eq!(p.san_to_move(&san), Ok(mv), "{san}");
        }
    }

    #[test]
    fn test_make_notation() {
        let mut p = Position::start();
        p.make_san("e4").unwrap();
        p.make_pure("e7e5").unwrap();
        p.make_san("Nf3").unwrap();
        p.make_pure("b8c6").unwrap();
        assert_eq!(
            p.to_fen(),
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 1"
        );

        let before = p;
        assert_eq!(p.make_pure("e1g1"), Err(NotationError::IllegalMove("e1g1".to_string())));
        assert_eq!(p.make_san("Qh8"), Err(NotationError::NoMatchingMove("Qh8".to_string())));
        assert_eq!(p, before);
    }
}
