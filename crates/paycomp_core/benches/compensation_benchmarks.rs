//! Criterion benchmarks for paycomp_core
//!
//! Run with: cargo bench -p paycomp_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use paycomp_core::analysis::{SweepConfig, SweepTarget, sweep};
use paycomp_core::config::ParameterBuilder;
use paycomp_core::model::{ParameterSet, PayMode, Role};
use paycomp_core::optimization::suggest_thresholds;
use paycomp_core::{analyze_all, calculate_salary, compare};

fn create_store() -> ParameterSet {
    ParameterBuilder::new()
        .delivery(175.0)
        .packages(102.0)
        .headcount(Role::Staff, 6)
        .headcount(Role::Supervisor, 2)
        .headcount(Role::Consultant, 1)
        .baseline(58.0)
        .build_unchecked()
}

fn bench_salary(c: &mut Criterion) {
    let params = create_store();

    c.bench_function("salary_new_mid", |b| {
        b.iter(|| calculate_salary(black_box(&params), PayMode::NewMid, Role::Staff))
    });
}

fn bench_store_and_comparison(c: &mut Criterion) {
    let params = create_store();

    c.bench_function("analyze_all_modes", |b| {
        b.iter(|| analyze_all(black_box(&params)))
    });
    c.bench_function("compare_modes", |b| b.iter(|| compare(black_box(&params))));
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion_sweep");
    let params = create_store();

    for steps in [10, 100, 1000] {
        let config = SweepConfig::new(SweepTarget::ConversionRatePct, 20.0, 90.0, steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &config, |b, config| {
            b.iter(|| sweep(black_box(&params), black_box(config)))
        });
    }

    group.finish();
}

fn bench_threshold_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("threshold_search");
    let params = create_store().with_purchased_packages(400.0);

    for step in [1, 5] {
        group.bench_with_input(BenchmarkId::from_parameter(step), &step, |b, &step| {
            b.iter(|| suggest_thresholds(black_box(&params), PayMode::NewMid, step))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_salary,
    bench_store_and_comparison,
    bench_sweep,
    bench_threshold_search
);
criterion_main!(benches);
