//! Criterion benchmarks for frame construction and bar partitioning.
//! Focus sizes: bars in {4, 16, 64, 256}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use barcut::cutting::{CuttingCfg, Session};
use barcut::sample::{draw_system, ReplayToken, SystemCfg};

fn cfg_with_bars(n: usize) -> SystemCfg {
    SystemCfg {
        bars: (n, n),
        ..SystemCfg::default()
    }
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    for &n in &[4usize, 16, 64, 256] {
        let cfg = cfg_with_bars(n);
        group.bench_with_input(BenchmarkId::new("bar_boxes", n), &n, |b, _| {
            let sys = draw_system(&cfg, ReplayToken { seed: 43, index: 0 });
            let frame = sys.frame().unwrap();
            b.iter(|| frame.bar_boxes(&sys.break_points, 0, 0))
        });

        group.bench_with_input(BenchmarkId::new("session_replay", n), &n, |b, _| {
            b.iter_batched(
                || draw_system(&cfg, ReplayToken { seed: 44, index: 0 }).events(),
                |events| {
                    let mut session = Session::new(CuttingCfg::default());
                    session.load_page(1).unwrap();
                    for ev in events {
                        let _ = session.handle(ev).unwrap();
                    }
                    session.into_document()
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_partition);
criterion_main!(benches);
