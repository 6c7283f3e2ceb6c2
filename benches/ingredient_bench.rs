// ABOUTME: Criterion benchmarks for ingredient parsing, name normalization and corpus building
// ABOUTME: Measures per-line parser cost and end-to-end ingestion throughput with rayon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the ingestion hot path.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

mod common;

use common::fixtures::ingredient_lines;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nutriplan_server::ingest::{CorpusBuilder, IngredientsField, RawMealRecord};
use nutriplan_server::intelligence::{
    IngredientParser, NameNormalizer, NutrientLookup, NutrientResolver,
};

/// Benchmark single-line parsing and normalization
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingredient_parsing");
    let parser = IngredientParser::default();
    let normalizer = NameNormalizer::default();
    let lines = ingredient_lines(120);

    group.bench_function("parse_single_line", |b| {
        b.iter(|| parser.parse_detailed(black_box("1 1/2 cups finely chopped onions")));
    });

    group.throughput(Throughput::Elements(lines.len() as u64));
    group.bench_function("parse_batch_120_lines", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(parser.parse(line));
            }
        });
    });
    group.bench_function("normalize_batch_120_lines", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(normalizer.normalize(line));
            }
        });
    });

    group.finish();
}

/// Benchmark nutrient resolution with a warm cache
fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("nutrient_resolution");
    let resolver = NutrientResolver::without_reference();
    let names = ["milk", "butter", "olive oil", "saffron", "ground beef"];
    for name in names {
        resolver.resolve(name);
    }

    group.throughput(Throughput::Elements(names.len() as u64));
    group.bench_function("resolve_cached", |b| {
        b.iter(|| {
            for name in names {
                black_box(resolver.resolve(name));
            }
        });
    });

    group.finish();
}

fn raw_records(count: usize) -> Vec<RawMealRecord> {
    let lines = ingredient_lines(8 * count);
    lines
        .chunks(8)
        .enumerate()
        .map(|(index, chunk)| RawMealRecord {
            id: Some(format!("raw-{index}")),
            name: format!("Raw Meal {index}"),
            category: "Benchmark".to_owned(),
            ingredients: IngredientsField::Line(chunk.join(", ")),
            ..RawMealRecord::default()
        })
        .collect()
}

/// Benchmark end-to-end corpus building
fn bench_corpus_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("corpus_build");
    group.sample_size(30);
    let parser = IngredientParser::default();

    for count in [100_usize, 1000] {
        let records = raw_records(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("build", count), &records, |b, records| {
            b.iter(|| {
                let resolver = NutrientResolver::without_reference();
                CorpusBuilder::new(&parser, &resolver).build(black_box(records.clone()))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_resolution, bench_corpus_build);
criterion_main!(benches);
