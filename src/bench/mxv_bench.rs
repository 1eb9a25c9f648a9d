use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use mxv::distributed::{LocalGroup, SingleProcess};
use mxv::harness::{Strategy, run_strategy};
use mxv::matrix::RunStorage;
use mxv::matrix::fill::fill_random;

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("mxv");

    for n in [256, 1024, 2048] {
        let mut storage = RunStorage::square(n).unwrap();
        fill_random(
            &mut storage.matrix,
            &mut storage.vector,
            &mut StdRng::seed_from_u64(n as u64),
        );
        group.throughput(Throughput::Elements((2 * n * n) as u64));

        for strategy in Strategy::ALL {
            group.bench_with_input(BenchmarkId::new(strategy.label(), n), &n, |b, _| {
                let RunStorage {
                    matrix,
                    vector,
                    result,
                } = &mut storage;
                let (matrix, vector) = (&*matrix, vector.as_slice());
                if strategy.is_distributed() {
                    // Group launch is part of the measurement here.
                    b.iter(|| {
                        LocalGroup::run(4, |comm| {
                            let mut r = vec![0.0; n];
                            run_strategy(strategy, &comm, matrix, vector, &mut r).unwrap();
                            black_box(r[0])
                        })
                    });
                } else {
                    b.iter(|| {
                        run_strategy(strategy, &SingleProcess, matrix, vector, result).unwrap();
                        black_box(result[0])
                    });
                }
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
