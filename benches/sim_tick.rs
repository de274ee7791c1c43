use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_panels::core::{Cursor, RiseConfig, RisingBoard, SeededRowGenerator};
use tui_panels::types::Action;

fn board(rise_speed: f64) -> RisingBoard {
    let generator = Box::new(SeededRowGenerator::new(6, 12345));
    let config = RiseConfig {
        rise_speed,
        ..RiseConfig::default()
    };
    let mut board = RisingBoard::new(6, 12, generator, config);
    board.raise_rows(4);
    board
}

fn bench_tick(c: &mut Criterion) {
    let mut b = board(RiseConfig::default().rise_speed);

    c.bench_function("board_tick", |bench| {
        bench.iter(|| {
            b.tick();
            black_box(b.rise_offset());
        })
    });
}

fn bench_tick_with_shift(c: &mut Criterion) {
    c.bench_function("board_tick_row_shift", |bench| {
        bench.iter(|| {
            let mut b = board(1.0);
            b.tick();
            black_box(b.top_row());
        })
    });
}

fn bench_row_generation(c: &mut Criterion) {
    c.bench_function("generate_rows", |bench| {
        bench.iter(|| {
            let mut b = board(0.0);
            b.raise_rows(black_box(8));
        })
    });
}

fn bench_action_phase(c: &mut Criterion) {
    let mut b = board(0.0);
    let mut cursor = Cursor::new();

    c.bench_function("cursor_action_phase", |bench| {
        bench.iter(|| {
            cursor.start_action(black_box(Action::Right));
            cursor.handle_action_phase(&mut b);
            cursor.start_action(black_box(Action::Left));
            cursor.handle_action_phase(&mut b);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_tick_with_shift,
    bench_row_generation,
    bench_action_phase
);
criterion_main!(benches);
