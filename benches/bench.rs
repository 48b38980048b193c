use criterion::{criterion_group, criterion_main, Criterion};
use csp_solver::csp::ac3;
use csp_solver::csp::graph::ConstraintGraph;
use csp_solver::csp::instance::Csp;
use csp_solver::csp::search::{
    Backtracking, DefaultConfig, FixedOrderConfig, LcvConfig, RandomOrderConfig, Solver,
    SolverConfig,
};
use csp_solver::sudoku::board::{Board, EXAMPLE_EASY, EXAMPLE_HARD};
use std::hint::black_box;
use std::time::Duration;

fn solve<Config: SolverConfig>(board: &Board) {
    let mut solver = Backtracking::<Config>::new(Csp::new(board.cells()));
    let _ = black_box(solver.solve());
}

fn bench_selection(c: &mut Criterion) {
    let easy: Board = EXAMPLE_EASY.parse().unwrap();

    let mut group = c.benchmark_group("selection");
    group.bench_function("mrv_easy", |b| {
        b.iter(|| solve::<DefaultConfig>(black_box(&easy)));
    });
    group.bench_function("fixed_easy", |b| {
        b.iter(|| solve::<FixedOrderConfig>(black_box(&easy)));
    });
    group.bench_function("random_easy", |b| {
        b.iter(|| solve::<RandomOrderConfig>(black_box(&easy)));
    });
    group.finish();
}

fn bench_value_order(c: &mut Criterion) {
    let easy: Board = EXAMPLE_EASY.parse().unwrap();
    let hard: Board = EXAMPLE_HARD.parse().unwrap();

    let mut group = c.benchmark_group("value_order");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("domain_easy", |b| {
        b.iter(|| solve::<DefaultConfig>(black_box(&easy)));
    });
    group.bench_function("lcv_easy", |b| {
        b.iter(|| solve::<LcvConfig>(black_box(&easy)));
    });
    group.bench_function("domain_hard", |b| {
        b.iter(|| solve::<DefaultConfig>(black_box(&hard)));
    });
    group.bench_function("lcv_hard", |b| {
        b.iter(|| solve::<LcvConfig>(black_box(&hard)));
    });
    group.finish();
}

fn bench_preprocessing(c: &mut Criterion) {
    let easy: Board = EXAMPLE_EASY.parse().unwrap();

    let mut group = c.benchmark_group("preprocessing");
    group.bench_function("constraint_graph", |b| {
        b.iter(|| black_box(ConstraintGraph::new()));
    });
    group.bench_function("ac3_easy", |b| {
        b.iter(|| {
            let mut csp = Csp::new(black_box(easy.cells()));
            black_box(ac3::enforce(&mut csp))
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_selection,
    bench_value_order,
    bench_preprocessing
);
criterion_main!(benches);
