//! Benchmarks for catalog loading and key resolution.
//!
//! Run with: cargo bench --package cog-catalog
//! Or: cargo bench --package cog-catalog --bench resolve_benchmarks

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use cog_catalog::{catalog, CoordinateContext, Template, BUILTIN_CATALOG};

// =============================================================================
// CATALOG LOADING BENCHMARKS
// =============================================================================

fn bench_catalog_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_loading");

    group.bench_function("parse_entries", |b| {
        b.iter(|| catalog::parse_entries(black_box(BUILTIN_CATALOG)))
    });

    group.bench_function("load_builtin", |b| b.iter(catalog::builtin));

    group.bench_function("parse_template", |b| {
        b.iter(|| {
            Template::parse(black_box(
                "x_{x}/y_{y}/{time:%Y}/{time:%m}/{time:%d}/LS8_OLI_FC_3577_{x}_{y}_{time:%Y%m%d%H%M%S}",
            ))
        })
    });

    group.finish();
}

// =============================================================================
// RESOLUTION BENCHMARKS
// =============================================================================

fn bench_resolution(c: &mut Criterion) {
    let registry = catalog::builtin().expect("builtin catalog");
    let date = NaiveDate::from_ymd_opt(2019, 3, 21).expect("valid date");
    let tile = CoordinateContext::tile(15, -40).with_time(date);
    let cell = CoordinateContext::geo(149i64, -35i64);

    let mut group = c.benchmark_group("resolution");

    group.bench_function("resolve_wofs_albers", |b| {
        b.iter(|| registry.resolve(black_box("wofs_albers"), black_box(&tile)))
    });

    group.bench_function("resolve_item_v2", |b| {
        b.iter(|| registry.resolve(black_box("item_v2"), black_box(&cell)))
    });

    // One key per tile across a 10x10 block
    let contexts: Vec<CoordinateContext> = (0..10)
        .flat_map(|y| (0..10).map(move |x| CoordinateContext::tile(x, -y).with_time(date)))
        .collect();
    group.throughput(Throughput::Elements(contexts.len() as u64));
    group.bench_function("resolve_batch_100", |b| {
        b.iter(|| {
            for ctx in &contexts {
                let _ = registry.resolve("wofs_albers", black_box(ctx));
            }
        })
    });

    group.finish();
}

// =============================================================================
// REVERSE LOOKUP BENCHMARKS
// =============================================================================

fn bench_match_key(c: &mut Criterion) {
    let registry = catalog::builtin().expect("builtin catalog");
    let mut group = c.benchmark_group("match_key");

    group.bench_function("match_wofs_albers", |b| {
        b.iter(|| {
            registry.match_key(black_box(
                "WOfS/WOFLs/v2.1.5/combined/x_15/y_-40/LS_WATER_3577_15_-40_2019-03-21",
            ))
        })
    });

    group.bench_function("match_fc_albers", |b| {
        b.iter(|| {
            registry.match_key(black_box(
                "fractional-cover/fc/v2.2.1/ls8/x_15/y_-40/2019/03/21/LS8_OLI_FC_3577_15_-40_20190321001510",
            ))
        })
    });

    group.bench_function("match_unknown", |b| {
        b.iter(|| registry.match_key(black_box("not/a/catalog/key.tif")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_catalog_loading,
    bench_resolution,
    bench_match_key,
);
criterion_main!(benches);
