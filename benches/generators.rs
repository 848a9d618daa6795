use criterion::{criterion_group, criterion_main, Criterion};
use dfs_mazes::{
    generators::MazeGenerator,
    grid::Grid,
    units::{ColumnsCount, RowsCount},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn grid(side: usize) -> Grid {
    Grid::new(RowsCount(side), ColumnsCount(side)).unwrap()
}

fn bench_dfs_maze_32(c: &mut Criterion) {
    let mut generator = MazeGenerator::new(grid(32));
    c.bench_function("dfs_maze_32", move |b| b.iter(|| generator.run()));
}

fn bench_dfs_maze_128(c: &mut Criterion) {
    let mut generator = MazeGenerator::new(grid(128));
    c.bench_function("dfs_maze_128", move |b| b.iter(|| generator.run()));
}

fn bench_dfs_traversal_128_seeded(c: &mut Criterion) {
    let mut generator = MazeGenerator::with_rng(grid(128), StdRng::seed_from_u64(0));
    c.bench_function("dfs_traversal_128_seeded", move |b| {
        b.iter(|| generator.traversal().count())
    });
}

criterion_group!(
    benches,
    bench_dfs_maze_32,
    bench_dfs_maze_128,
    bench_dfs_traversal_128_seeded
);
criterion_main!(benches);
