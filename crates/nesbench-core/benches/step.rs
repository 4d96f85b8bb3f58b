//! Benchmark for the per-cycle hot path

use criterion::{criterion_group, criterion_main, Criterion};
use nesbench_core::cartridge::CartridgeImage;
use nesbench_core::session::Session;
use nesbench_core::testing::{build_test_rom, PatternCore};

fn bench_step_cycle(c: &mut Criterion) {
    let image = CartridgeImage::from_rom(&build_test_rom(1, 1)).unwrap();
    let mut session = Session::new(PatternCore::new(), image);
    session.power_on();

    c.bench_function("session_step_cycle", |b| {
        b.iter(|| session.step_cycle());
    });
}

criterion_group!(benches, bench_step_cycle);
criterion_main!(benches);
