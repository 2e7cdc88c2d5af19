use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pgncheck::types::{Color, Coord};
use pgncheck::{attack, movetext, replay, Board};

const GAMES: [(&'static str, &'static str); 3] = [
    (
        "ruy_lopez",
        "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O Be7 6. Re1 b5 7. Bb3 d6 1-0",
    ),
    (
        "scholars_mate",
        "1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7# 1-0",
    ),
    (
        "promotion",
        "1. h4 g5 2. hxg5 Nf6 3. g6 e5 4. g7 d5 5. e3 Be7 6. gxh8=Q+ Kd7 1-0",
    ),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, text) in GAMES {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movetext::parse(text).unwrap()))
        });
    }
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    for (name, text) in GAMES {
        let moves = movetext::parse(text).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(replay::replay(&moves).unwrap()))
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let board = Board::initial();
    c.bench_function("is_attacked", |b| {
        b.iter(|| {
            for color in [Color::White, Color::Black] {
                for coord in Coord::iter() {
                    black_box(attack::is_attacked(&board, coord, color));
                }
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_replay, bench_is_attacked);
criterion_main!(benches);
