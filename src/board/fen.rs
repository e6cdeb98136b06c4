use super::Position;
use crate::core::*;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

pub const POSITION_3_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

pub const POSITION_4_FEN: &str =
    "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";

pub const POSITION_5_FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

impl Position {
    pub const FEN_SECTIONS: usize = 6;

    /// Parses a FEN string. The fullmove number is validated and discarded.
    pub fn from_fen(fen: &str) -> Result<Position, FenParseError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != Self::FEN_SECTIONS {
            return Err(FenParseError::InvalidNumberOfFields);
        }

        let mut pos = Position::empty();

        pos.parse_piece_placement(parts[0])?;
        pos.stm = parse_side_to_move(parts[1])?;
        pos.castling = parse_castling(parts[2])?;
        pos.ep_file = parse_enpassant(parts[3], pos.stm)?;
        pos.check_enpassant(parts[3])?;
        pos.halfmove = parse_halfmove(parts[4])?;
        parse_fullmove(parts[5])?;

        pos.refresh();

        Ok(pos)
    }

    /// FEN of the position. The fullmove field is always `1`.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::iter().rev() {
            let mut empty_count = 0;
            for file in File::iter() {
                match self.on(Square::from_parts(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        let stm = match self.stm {
            Colour::White => "w",
            Colour::Black => "b",
        };
        let ep = match self.ep_target() {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{fen} {stm} {} {ep} {} 1", self.castling, self.halfmove)
    }

    fn parse_piece_placement(&mut self, placement: &str) -> Result<(), FenParseError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != Rank::NUM {
            return Err(FenParseError::InvalidRankFormat(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut kings = [0u32; Colour::NUM];

        for (rank, row) in Rank::iter().rev().zip(ranks) {
            let mut file: u8 = 0;

            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) || file as u32 + skip > 8 {
                        return Err(FenParseError::InvalidRankFormat(format!(
                            "skip '{c}' overruns rank {rank}"
                        )));
                    }
                    file += skip as u8;
                    continue;
                }

                let piece = Piece::from_char(c).ok_or(FenParseError::InvalidPiecePlacementChar(c))?;

                if file >= 8 {
                    return Err(FenParseError::InvalidRankFormat(format!(
                        "'{c}' placed beyond file h on rank {rank}"
                    )));
                }

                let sq = Square::from_parts(unsafe { File::from_unchecked(file) }, rank);
                file += 1;

                if piece.pt() == PieceType::Pawn && matches!(rank, Rank::Rank1 | Rank::Rank8) {
                    return Err(FenParseError::PawnOnBackRank(sq));
                }

                if piece.pt() == PieceType::King {
                    kings[piece.colour().index()] += 1;
                    // Extra kings are counted and reported once the board is read
                    if kings[piece.colour().index()] > 1 {
                        continue;
                    }
                }
                self.add_piece(piece.colour(), piece.pt(), sq);
            }

            if file != 8 {
                return Err(FenParseError::InvalidRankFormat(format!(
                    "rank {rank} ended at file index {file} (expected 8)"
                )));
            }
        }

        for col in [Colour::White, Colour::Black] {
            if kings[col.index()] != 1 {
                return Err(FenParseError::InvalidKingCount(col, kings[col.index()]));
            }
        }

        Ok(())
    }
}

fn parse_side_to_move(token: &str) -> Result<Colour, FenParseError> {
    match token {
        "w" => Ok(Colour::White),
        "b" => Ok(Colour::Black),
        _ => Err(FenParseError::InvalidSideToMove(token.to_string())),
    }
}

fn parse_castling(token: &str) -> Result<Castling, FenParseError> {
    let mut castling = Castling::NONE;

    if token == "-" {
        return Ok(castling);
    }

    for c in token.chars() {
        let right = match c {
            'K' => Castling::WK,
            'Q' => Castling::WQ,
            'k' => Castling::BK,
            'q' => Castling::BQ,
            _ => return Err(FenParseError::InvalidCastlingChar(c)),
        };
        castling.set(right);
    }

    Ok(castling)
}

/// The target square must sit behind a pawn that just moved, so on rank 6 when
/// white is to move and rank 3 when black is
fn parse_enpassant(token: &str, stm: Colour) -> Result<Option<File>, FenParseError> {
    if token == "-" {
        return Ok(None);
    }

    let square = token
        .parse::<Square>()
        .map_err(|_| FenParseError::InvalidEnPassantSquare(token.to_string()))?;

    let expected = match stm {
        Colour::White => Rank::Rank6,
        Colour::Black => Rank::Rank3,
    };
    if square.rank() != expected {
        return Err(FenParseError::InvalidEnPassantSquare(token.to_string()));
    }

    Ok(Some(square.file()))
}

impl Position {
    /// An en passant target needs the enemy pawn that just pushed past it and
    /// must itself be empty
    fn check_enpassant(&self, token: &str) -> Result<(), FenParseError> {
        let Some(target) = self.ep_target() else {
            return Ok(());
        };

        let them = !self.stm;
        let pushed = Square::from_parts(target.file(), Rank::Rank4.relative(them));

        if !self.piece_bb(them, PieceType::Pawn).contains(pushed)
            || self.all_occupied_bb().contains(target)
        {
            return Err(FenParseError::InvalidEnPassantSquare(token.to_string()));
        }

        Ok(())
    }
}

fn parse_halfmove(token: &str) -> Result<u16, FenParseError> {
    token
        .parse::<u16>()
        .map_err(|_| FenParseError::InvalidHalfmoveClock(token.to_string()))
}

fn parse_fullmove(token: &str) -> Result<u16, FenParseError> {
    match token.parse::<u16>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(FenParseError::InvalidFullmoveNumber(token.to_string())),
    }
}

impl std::str::FromStr for Position {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}
