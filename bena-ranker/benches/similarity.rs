//! Criterion benchmarks for building the TF-IDF similarity matrix and ranking
//! against it.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package bena-ranker
//! ```

#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]
#![expect(clippy::expect_used, reason = "benchmarks should fail fast when setup breaks")]

use std::hint::black_box;

use bena_core::{BookmarkSet, Place, PlaceId};
use bena_ranker::{FuzzyTextSearch, HybridRanker, SearchOptions, TextSimilarityIndex};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use geo::Coord;

/// Snapshot sizes to benchmark.
const SNAPSHOT_SIZES: &[usize] = &[100, 500, 1000];

const TAGS: &[&str] = &[
    "beach resort diving",
    "desert safari camping",
    "museum history pharaohs",
    "temple history",
    "market shopping food",
    "garden park family",
];

/// Deterministic places spread over a small grid.
#[expect(
    clippy::float_arithmetic,
    reason = "grid coordinates are derived from indices"
)]
fn generate_places(count: usize) -> Vec<Place> {
    (0..count)
        .zip(TAGS.iter().cycle())
        .map(|(index, tags)| {
            let step = f64::from(u32::try_from(index).unwrap_or(u32::MAX));
            Place::new(
                format!("P{index}"),
                format!("Place {index}"),
                Coord {
                    x: 29.0 + step * 0.004,
                    y: 25.0 + step * 0.006,
                },
            )
            .with_tags(*tags)
        })
        .collect()
}

fn bench_matrix_build(c: &mut Criterion) {
    let index = TextSimilarityIndex::default();
    let mut group = c.benchmark_group("similarity_matrix");
    for &size in SNAPSHOT_SIZES {
        let places = generate_places(size);
        group.throughput(Throughput::Elements(u64::try_from(size).unwrap_or(u64::MAX)));
        group.bench_with_input(BenchmarkId::from_parameter(size), &places, |b, places| {
            b.iter(|| index.build(black_box(places)).expect("unique ids"));
        });
    }
    group.finish();
}

fn bench_hybrid_rank(c: &mut Criterion) {
    let index = TextSimilarityIndex::default();
    let ranker = HybridRanker::default();
    let bookmarks: BookmarkSet = ["P0", "P7", "P42"].into_iter().map(PlaceId::from).collect();
    let mut group = c.benchmark_group("hybrid_rank");
    for &size in SNAPSHOT_SIZES {
        let places = generate_places(size);
        let matrix = index.build(&places).expect("unique ids");
        group.bench_with_input(BenchmarkId::from_parameter(size), &places, |b, places| {
            b.iter(|| ranker.rank(black_box(&bookmarks), places, &matrix, 10));
        });
    }
    group.finish();
}

fn bench_fuzzy_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_search");
    for &size in SNAPSHOT_SIZES {
        let places = generate_places(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &places, |b, places| {
            b.iter(|| FuzzyTextSearch.search(black_box("histroy"), places, SearchOptions::default()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_matrix_build,
    bench_hybrid_rank,
    bench_fuzzy_search
);
criterion_main!(benches);
