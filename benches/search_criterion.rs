use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_core::game_state::chess_types::GameState;
use chess_core::search::board_scoring::PieceSquareScorer;
use chess_core::search::iterative_deepening::{iterative_deepening_search, SearchConfig, MATE_SCORE};

struct SearchCase {
    name: &'static str,
    fen: &'static str,
    depth: u8,
    expect_mate: bool,
}

const CASES: &[SearchCase] = &[
    SearchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depth: 4,
        expect_mate: false,
    },
    SearchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depth: 3,
        expect_mate: false,
    },
    SearchCase {
        name: "back_rank_mate",
        fen: "6k1/5ppp/8/r7/8/8/5PPP/6K1 b - - 0 1",
        depth: 4,
        expect_mate: true,
    },
];

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        let config = SearchConfig::with_depth(case.depth);

        // Correctness guard before benchmarking.
        let mut warmup_game = game.clone();
        let warmup = iterative_deepening_search(&mut warmup_game, &PieceSquareScorer, &config);
        assert!(warmup.best_move.is_some(), "no move found for {}", case.name);
        assert_eq!(warmup.best_score >= MATE_SCORE, case.expect_mate, "{}", case.name);

        let mut bench_game = game.clone();
        group.bench_function(BenchmarkId::new(case.name, case.depth), |b| {
            b.iter(|| {
                let result =
                    iterative_deepening_search(black_box(&mut bench_game), &PieceSquareScorer, &config);
                black_box(result.best_move)
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
