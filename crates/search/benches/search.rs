use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetrad_core::{Board, PieceKind, PieceState};
use tetrad_search::{SearchConfig, SearchEngine, SearchInput};

fn rough_board() -> Board {
    Board::from_ascii(&[
        "...T......",
        "..TTT..S..",
        "Z.....SS.O",
        "ZZ.L..S.OO",
        ".Z.LLLJJJO",
    ])
}

fn bench_greedy(c: &mut Criterion) {
    let engine = SearchEngine::new(SearchConfig::greedy());
    for kind in [PieceKind::I, PieceKind::T] {
        let input = SearchInput::new(rough_board(), PieceState::spawn(kind));
        c.bench_function(&format!("search_greedy_{}", kind.letter()), |b| {
            b.iter(|| engine.search(black_box(&input)))
        });
    }
}

fn bench_lookahead(c: &mut Criterion) {
    let input = SearchInput::new(rough_board(), PieceState::spawn(PieceKind::T))
        .with_next(PieceKind::S)
        .with_preview(&[PieceKind::L]);

    let two = SearchEngine::new(SearchConfig::default());
    c.bench_function("search_lookahead_2", |b| {
        b.iter(|| two.search(black_box(&input)))
    });

    let mut group = c.benchmark_group("deep");
    group.sample_size(10);
    let three = SearchEngine::new(SearchConfig::default().with_lookahead(3));
    group.bench_function("search_lookahead_3", |b| {
        b.iter(|| three.search(black_box(&input)))
    });
    group.finish();
}

fn bench_frame_limited(c: &mut Criterion) {
    let config = SearchConfig {
        frame_limited: true,
        ..SearchConfig::default()
    };
    let engine = SearchEngine::new(config);
    let input = SearchInput::new(Board::new(), PieceState::spawn(PieceKind::J))
        .with_next(PieceKind::Z)
        .with_level(19);
    c.bench_function("search_frame_limited_level_19", |b| {
        b.iter(|| engine.search(black_box(&input)))
    });
}

criterion_group!(benches, bench_greedy, bench_lookahead, bench_frame_limited);
criterion_main!(benches);
