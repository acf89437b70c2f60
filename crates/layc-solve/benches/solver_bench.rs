//! Solver benchmark over linked-chain systems of increasing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use layc_solve::LinearSystem;
use layc_util::Handler;

fn build_chain(length: usize) -> LinearSystem {
    let mut system = LinearSystem::new();
    for i in 0..length {
        system
            .add_equation(&format!("x{} + w{} - x{}", i, i, i + 1))
            .expect("generated equation");
        system.assign(&format!("w{i}"), 10.0);
    }
    system.assign("x0", 0.0);
    system
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_chain");
    for length in [16, 64, 256] {
        group.bench_function(format!("len_{length}"), |b| {
            b.iter_batched(
                || build_chain(length),
                |mut system| {
                    let mut handler = Handler::new();
                    black_box(system.solve(&mut handler))
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("add_equation", |b| {
        b.iter_batched(
            LinearSystem::new,
            |mut system| {
                system
                    .add_equation(black_box("r1.min.x + r1.size.x - r1.max.x"))
                    .expect("equation");
                system
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_solve, bench_parse);
criterion_main!(benches);
