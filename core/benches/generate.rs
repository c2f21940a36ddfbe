use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tripwire_core::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in [
        ("beginner", GameConfig::beginner()),
        ("intermediate", GameConfig::intermediate()),
        ("expert", GameConfig::expert()),
    ] {
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(ShuffleGenerator::new(seed).generate(config).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // no mines, so the first uncover opens the whole board
    let config = GameConfig::new((255, 255), 0).unwrap();
    let minefield = ShuffleGenerator::new(0).generate(config).unwrap();

    c.bench_function("flood_fill_255x255", |b| {
        b.iter_batched(
            || Board::from_minefield(minefield.clone()),
            |mut board| {
                black_box(board.uncover((127, 127)).unwrap());
                board
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
