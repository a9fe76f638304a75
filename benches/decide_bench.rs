use criterion::{criterion_group, criterion_main, Criterion, black_box};
use plybot::board::cozy::Position;
use plybot::search::scorer::score_moves;
use plybot::{Bot, EngineConfig, GameBoard, Timer};

const MIDDLEGAME: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 2 3";

fn bench_score_moves(c: &mut Criterion) {
    let mut pos = Position::from_fen(MIDDLEGAME).unwrap();
    let moves = pos.legal_moves(false);
    let cfg = EngineConfig::default();
    c.bench_function("score_moves_middlegame", |ben| {
        ben.iter(|| black_box(score_moves(&mut pos, black_box(&moves), &cfg).unwrap()))
    });
}

fn bench_decide(c: &mut Criterion) {
    let mut pos = Position::from_fen(MIDDLEGAME).unwrap();
    let mut bot = Bot::new(EngineConfig::default().with_seed(1));
    let timer = Timer::unlimited();
    c.bench_function("decide_middlegame", |ben| {
        ben.iter(|| black_box(bot.decide(&mut pos, &timer).unwrap()))
    });
}

criterion_group!(benches, bench_score_moves, bench_decide);
criterion_main!(benches);
