// ABOUTME: Criterion benchmarks for cluster training and recommendation ranking
// ABOUTME: Measures k-means fitting, clustered versus full-scan ranking and model persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the clustering and ranking pipeline.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fixtures::{generate_meals, MealBatchSize};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nutriplan_server::intelligence::config::{ClusteringConfig, RankingConfig};
use nutriplan_server::intelligence::{
    ClusterModel, ClusterTrainer, MatchStrategy, MealFilters, RecommendationRanker,
    RecommendationRequest, TrainedModel,
};
use nutriplan_server::models::MacroTarget;

fn clustering_config() -> ClusteringConfig {
    ClusteringConfig {
        k: 5,
        n_init: 4,
        ..ClusteringConfig::default()
    }
}

fn trained(size: MealBatchSize) -> TrainedModel {
    ClusterTrainer::new(clustering_config())
        .train(generate_meals(size))
        .expect("benchmark corpus trains")
}

fn request() -> RecommendationRequest {
    RecommendationRequest {
        target: MacroTarget::new(600.0, 45.0, 50.0, 25.0).unwrap(),
        count: Some(16),
        filters: MealFilters::default(),
    }
}

/// Benchmark k-means training across corpus sizes
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_training");
    group.sample_size(20);

    for size in [MealBatchSize::Small, MealBatchSize::Medium] {
        let meals = generate_meals(size);
        let trainer = ClusterTrainer::new(clustering_config());

        group.throughput(Throughput::Elements(meals.len() as u64));
        group.bench_with_input(BenchmarkId::new("train", size.label()), &meals, |b, meals| {
            b.iter(|| trainer.train(black_box(meals.clone())).unwrap());
        });
    }

    group.finish();
}

/// Benchmark ranking strategies against the same model
fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    let trained = trained(MealBatchSize::Medium);
    let request = request();

    for strategy in [MatchStrategy::Clustered, MatchStrategy::FullScan] {
        let ranker = RecommendationRanker::new(RankingConfig {
            strategy,
            ..RankingConfig::default()
        });
        group.bench_with_input(
            BenchmarkId::new("recommend", strategy.to_string()),
            &ranker,
            |b, ranker| {
                b.iter(|| ranker.recommend(black_box(&trained), black_box(&request)).unwrap());
            },
        );
    }

    let filtered = RecommendationRequest {
        filters: MealFilters {
            max_calories: Some(500.0),
            exclude_ingredients: vec!["sugar".to_owned()],
            ..MealFilters::default()
        },
        ..request
    };
    let ranker = RecommendationRanker::default();
    group.bench_function("recommend_filtered", |b| {
        b.iter(|| ranker.recommend(black_box(&trained), black_box(&filtered)).unwrap());
    });

    group.finish();
}

/// Benchmark model save and restore
fn bench_model_persistence(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_persistence");
    let trained = trained(MealBatchSize::Medium);
    let json = trained.model.to_json().unwrap();

    group.bench_function("to_json", |b| {
        b.iter(|| black_box(&trained.model).to_json().unwrap());
    });
    group.bench_function("from_json", |b| {
        b.iter(|| ClusterModel::from_json(black_box(&json)).unwrap());
    });
    group.bench_function("restore", |b| {
        b.iter(|| {
            TrainedModel::restore(
                black_box(trained.model.clone()),
                black_box(trained.meals.clone()),
            )
            .unwrap()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_training,
    bench_ranking,
    bench_model_persistence
);
criterion_main!(benches);
