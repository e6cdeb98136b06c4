use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chess_core::board::{KIWIPETE_FEN, POSITION_3_FEN, POSITION_4_FEN, POSITION_5_FEN};
use chess_core::utils::perft;
use chess_core::{Position, START_FEN, init_tables};

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    depth: usize,
    nodes: u64,
}

const CASES: &[BenchCase] = &[
    BenchCase { name: "start", fen: START_FEN, depth: 4, nodes: 197_281 },
    BenchCase { name: "kiwipete", fen: KIWIPETE_FEN, depth: 3, nodes: 97_862 },
    BenchCase { name: "position_3", fen: POSITION_3_FEN, depth: 4, nodes: 43_238 },
    BenchCase { name: "position_4", fen: POSITION_4_FEN, depth: 3, nodes: 9_467 },
    BenchCase { name: "position_5", fen: POSITION_5_FEN, depth: 3, nodes: 62_379 },
];

fn bench_perft(c: &mut Criterion) {
    init_tables();

    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let pos = Position::from_fen(case.fen).expect("benchmark FEN should parse");
        assert_eq!(perft(&pos, case.depth), case.nodes, "node mismatch for {}", case.name);

        group.throughput(Throughput::Elements(case.nodes));
        group.bench_with_input(
            BenchmarkId::new(case.name, case.depth),
            &pos,
            |b, pos| b.iter(|| perft(black_box(pos), black_box(case.depth))),
        );
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    init_tables();
    let pos = Position::from_fen(KIWIPETE_FEN).expect("benchmark FEN should parse");

    c.bench_function("legal_moves_kiwipete", |b| b.iter(|| black_box(&pos).legal_moves().len()));
    c.bench_function("features_kiwipete", |b| b.iter(|| black_box(&pos).features()));
}

criterion_group!(perft_benches, bench_perft, bench_movegen);
criterion_main!(perft_benches);
