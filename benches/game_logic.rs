use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{clear_full_rows, get_shape, intersects, Board, Grid};
use blockfall::engine::{Session, SessionConfig};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    session.start();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if session.tick(black_box(16)) && session.game_over() {
                session.start();
            }
        })
    });
}

fn bench_intersects(c: &mut Criterion) {
    let grid = Grid::new(BOARD_WIDTH, BOARD_HEIGHT).unwrap();
    let shape = get_shape(PieceKind::T, 1);

    c.bench_function("intersects", |b| {
        b.iter(|| intersects(black_box(&grid), black_box(&shape), 3, 10))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut grid = Grid::new(BOARD_WIDTH, BOARD_HEIGHT).unwrap();
    // Fill bottom 4 rows
    for y in 18..22 {
        for x in 0..BOARD_WIDTH as i32 {
            grid.set(x, y, PieceKind::I.color_id());
        }
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| clear_full_rows(black_box(&grid)))
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut board = Board::with_seed(BOARD_WIDTH, BOARD_HEIGHT, 12345).unwrap();
    board.new_game();

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            board.spawn_next();
        })
    });
}

fn bench_ghost(c: &mut Criterion) {
    let mut board = Board::with_seed(BOARD_WIDTH, BOARD_HEIGHT, 12345).unwrap();
    board.new_game();

    c.bench_function("ghost_drop_row", |b| b.iter(|| board.ghost_drop_row()));
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut board = Board::with_seed(BOARD_WIDTH, BOARD_HEIGHT, 12345).unwrap();
    board.new_game();

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            board.move_right();
            board.rotate();
            board.move_left();
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_intersects,
    bench_line_clear,
    bench_piece_spawn,
    bench_ghost,
    bench_move_and_rotate
);
criterion_main!(benches);
