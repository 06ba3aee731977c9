#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for description compilation and rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vfd::compile::{assemble, create_script, CompileOptions};
use vfd::description::{Cell, Colorplot, Description, Multiplot, Plot, Series, Values};

fn plot_with(points: usize, series: usize) -> Plot {
    let series = (0..series)
        .map(|s| {
            let y: Vec<f64> = (0..points).map(|i| (i as f64 * 0.01 + s as f64).sin()).collect();
            let mut series = Series::new(y);
            series.yerr = Some(Values::from(0.1));
            series.label = Some(format!("series {s}"));
            series
        })
        .collect();
    Plot::new(series)
}

fn plot_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_plot");
    let options = CompileOptions::default().formats(["pdf"]);

    for points in [100, 1_000, 10_000] {
        let description = Description::Plot(plot_with(points, 4));
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, _| {
            b.iter(|| create_script(black_box(&description), "bench", &options).expect("compiles"));
        });
    }

    group.finish();
}

fn colorplot_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_colorplot");
    let options = CompileOptions::default();

    for size in [32, 128, 512] {
        let z: Vec<Vec<f64>> = (0..size)
            .map(|i| (0..size).map(|j| (i * j) as f64).collect())
            .collect();
        let description = Description::Colorplot(Colorplot::new(z));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size}x{size}")),
            &size,
            |b, _| {
                b.iter(|| create_script(black_box(&description), "bench", &options).expect("compiles"));
            },
        );
    }

    group.finish();
}

fn multiplot_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble_multiplot");
    let options = CompileOptions::default().tight_layout(true);

    for side in [2, 4, 8] {
        let plots = (0..side)
            .map(|_| (0..side).map(|_| Cell::Plot(plot_with(200, 2))).collect())
            .collect();
        let description = Description::Multiplot(Multiplot {
            plots,
            ..Multiplot::default()
        });
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{side}x{side}")),
            &side,
            |b, _| {
                b.iter(|| assemble(black_box(&description), "bench", &options).expect("compiles"));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    plot_benchmark,
    colorplot_benchmark,
    multiplot_benchmark
);
criterion_main!(benches);
