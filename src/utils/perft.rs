use crate::board::{MoveList, Position};
use crate::core::Move;

/// Counts the leaf nodes of the legal move tree to `depth` plies.
///
/// Each child is a copy of its parent, and the last ply is counted by list length.
pub fn perft(pos: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut move_list = MoveList::new();
    pos.generate_legal(&mut move_list);

    if depth == 1 {
        return move_list.len() as u64;
    }

    let mut nodes = 0;

    for &move_ in move_list.iter() {
        let mut child = *pos;
        child.make_move(move_);
        nodes += perft(&child, depth - 1);
    }

    nodes
}

/// Logs the node count below each root move at `info` level and returns the total
pub fn perft_divide(pos: &Position, depth: usize) -> u64 {
    use std::time::Instant;

    log::info!("perft divide, depth {depth}: {}", pos.to_fen());

    let start = Instant::now();
    let divided = pos.perft_divide(depth);

    let mut total_nodes = 0;
    for (move_, nodes) in &divided {
        log::info!("{move_}: {nodes}");
        total_nodes += nodes;
    }

    let time = start.elapsed().as_millis().max(1);
    log::info!(
        "nodes: {total_nodes}, time: {time}ms, Mnps: {:0.1}",
        total_nodes as f64 / time as f64 / 1000.0
    );

    total_nodes
}

impl Position {
    #[inline]
    pub fn perft(&self, depth: usize) -> u64 {
        perft(self, depth)
    }

    /// Node counts below each legal move, in generation order
    pub fn perft_divide(&self, depth: usize) -> Vec<(Move, u64)> {
        self.legal_moves()
            .iter()
            .map(|&move_| {
                let mut child = *self;
                child.make_move(move_);
                (move_, perft(&child, depth.saturating_sub(1)))
            })
            .collect()
    }
}

/******************************************\
|==========================================|
|             Reference Counts             |
|==========================================|
\******************************************/

#[rustfmt::skip]
pub const BENCH_LIST: &[(&str, usize, u64)] = &[
    ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 5, 4865609),
    ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 4, 4085603),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 5, 674624),
    ("r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1", 4, 422333),
    ("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8", 4, 2103487),
    ("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", 4, 422333),
    ("1k6/1b6/8/8/7R/8/8/4K2R b K - 0 1", 5, 1063513),
    ("3k4/3p4/8/K1P4r/8/8/8/8 b - - 0 1", 6, 1134888),
    ("8/8/4k3/8/2p5/8/B2P2K1/8 w - - 0 1", 6, 1015133),
    ("8/8/1k6/2b5/2pP4/8/5K2/8 b - d3 0 1", 6, 1440467),
    ("5k2/8/8/8/8/8/8/4K2R w K - 0 1", 6, 661072),
    ("3k4/8/8/8/8/8/8/R3K3 w Q - 0 1", 6, 803711),
    ("r3k2r/1b4bq/8/8/8/8/7B/R3K2R w KQkq - 0 1", 4, 1274206),
    ("r3k2r/8/3Q4/8/8/5q2/8/R3K2R b KQkq - 0 1", 4, 1720476),
    ("2K2r2/4P3/8/8/8/8/8/3k4 w - - 0 1", 6, 3821001),
    ("8/8/1P2K3/8/2n5/1q6/8/5k2 b - - 0 1", 5, 1004658),
    ("4k3/1P6/8/8/8/8/K7/8 w - - 0 1", 6, 217342),
    ("8/P1k5/K7/8/8/8/8/8 w - - 0 1", 6, 92683),
    ("K1k5/8/P7/8/8/8/8/8 w - - 0 1", 6, 2217),
    ("8/k1P5/8/1K6/8/8/8/8 w - - 0 1", 7, 567584),
    ("8/8/2k5/5q2/5n2/8/5K2/8 b - - 0 1", 4, 23527),
    ("4k3/8/8/8/8/8/8/4K2R w K - 0 1", 6, 764643),
    ("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", 6, 846648),
    ("4k2r/8/8/8/8/8/8/4K3 w k - 0 1", 6, 899442),
    ("r3k3/8/8/8/8/8/8/4K3 w q - 0 1", 6, 1001523),
];

/// Runs every reference position, logging each result. True when all match.
pub fn perft_bench() -> bool {
    use std::time::Instant;

    let mut passed = true;
    log::info!("perft bench: {} positions", BENCH_LIST.len());

    for &(fen, depth, expected_nodes) in BENCH_LIST {
        let pos = match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(err) => {
                log::error!("bad bench FEN '{fen}': {err}");
                passed = false;
                continue;
            }
        };

        let start = Instant::now();
        let nodes = perft(&pos, depth);
        let time = start.elapsed().as_millis().max(1);

        let status = if nodes == expected_nodes {
            "PASSED"
        } else {
            passed = false;
            "FAILED"
        };

        log::info!(
            "status: {status}, time: {time:4}ms, Mnps: {:0.1}, fen: {fen}",
            nodes as f64 / time as f64 / 1000.0
        );
    }

    passed
}
