// ABOUTME: Lloyd's k-means with k-means++ seeding and parallel restarts
// ABOUTME: Deterministic for a given seed; the lowest-inertia restart is kept
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::features::squared_distance;
use crate::config::ClusteringConfig;
use nutriplan_core::errors::{AppError, AppResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

/// K-means parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    /// Number of clusters
    pub k: usize,
    /// Independent restarts
    pub n_init: usize,
    /// Iteration cap per restart
    pub max_iterations: usize,
    /// Convergence threshold on summed squared centroid shift
    pub tolerance: f64,
    /// Base seed; restart `i` uses `seed + i`
    pub seed: u64,
}

/// Result of a k-means fit
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit<const D: usize> {
    /// Final centroids
    pub centroids: Vec<[f64; D]>,
    /// Cluster of each input point, consistent with `centroids`
    pub labels: Vec<usize>,
    /// Sum of squared distances to assigned centroids
    pub inertia: f64,
    /// Lloyd iterations run by the winning restart
    pub iterations: usize,
    /// Seed of the winning restart
    pub seed: u64,
}

/// Index and squared distance of the nearest centroid; ties go to the lower index
#[must_use]
pub fn nearest_centroid<const D: usize>(point: &[f64; D], centroids: &[[f64; D]]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = squared_distance(point, centroid);
        if distance < best.1 {
            best = (index, distance);
        }
    }
    best
}

fn assign<const D: usize>(points: &[[f64; D]], centroids: &[[f64; D]], labels: &mut [usize]) -> f64 {
    let mut inertia = 0.0;
    for (point, label) in points.iter().zip(labels.iter_mut()) {
        let (index, distance) = nearest_centroid(point, centroids);
        *label = index;
        inertia += distance;
    }
    inertia
}

#[allow(clippy::cast_precision_loss)]
fn recompute<const D: usize>(
    points: &[[f64; D]],
    labels: &[usize],
    previous: &[[f64; D]],
) -> Vec<[f64; D]> {
    let mut sums = vec![[0.0; D]; previous.len()];
    let mut counts = vec![0_usize; previous.len()];
    for (point, &label) in points.iter().zip(labels) {
        counts[label] += 1;
        for (acc, value) in sums[label].iter_mut().zip(point) {
            *acc += value;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((mut sum, count), old)| {
            if count == 0 {
                // Emptied cluster keeps its centroid
                return *old;
            }
            for value in &mut sum {
                *value /= count as f64;
            }
            sum
        })
        .collect()
}

impl KMeans {
    /// Parameters taken from the clustering configuration
    #[must_use]
    pub const fn from_config(config: &ClusteringConfig) -> Self {
        Self {
            k: config.k,
            n_init: config.n_init,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            seed: config.seed,
        }
    }

    /// Cluster `points`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `k` is zero, `points` is empty, or there
    /// are fewer points than clusters
    pub fn fit<const D: usize>(&self, points: &[[f64; D]]) -> AppResult<KMeansFit<D>> {
        if self.k == 0 {
            return Err(AppError::invalid_input("k must be at least 1"));
        }
        if points.is_empty() {
            return Err(AppError::invalid_input("cannot cluster an empty corpus"));
        }
        if points.len() < self.k {
            return Err(AppError::invalid_input(format!(
                "cannot form {} clusters from {} meals",
                self.k,
                points.len()
            )));
        }

        let runs: Vec<KMeansFit<D>> = (0..self.n_init.max(1))
            .into_par_iter()
            .map(|run| self.run_once(points, self.seed.wrapping_add(run as u64)))
            .collect();

        let mut best: Option<KMeansFit<D>> = None;
        for fit in runs {
            debug!(seed = fit.seed, inertia = fit.inertia, iterations = fit.iterations, "k-means restart finished");
            if best.as_ref().is_none_or(|current| fit.inertia < current.inertia) {
                best = Some(fit);
            }
        }
        best.ok_or_else(|| AppError::internal("k-means produced no restarts"))
    }

    fn run_once<const D: usize>(&self, points: &[[f64; D]], seed: u64) -> KMeansFit<D> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut centroids = self.seed_centroids(points, &mut rng);
        let mut labels = vec![0; points.len()];
        let mut iterations = 0;

        for iteration in 0..self.max_iterations {
            iterations = iteration + 1;
            assign(points, &centroids, &mut labels);
            let updated = recompute(points, &labels, &centroids);
            let shift: f64 = centroids
                .iter()
                .zip(&updated)
                .map(|(old, new)| squared_distance(old, new))
                .sum();
            centroids = updated;
            if shift <= self.tolerance {
                break;
            }
        }

        let inertia = assign(points, &centroids, &mut labels);
        KMeansFit {
            centroids,
            labels,
            inertia,
            iterations,
            seed,
        }
    }

    /// k-means++ seeding: each new centroid is drawn with probability
    /// proportional to its squared distance from the chosen ones
    fn seed_centroids<const D: usize>(&self, points: &[[f64; D]], rng: &mut ChaCha8Rng) -> Vec<[f64; D]> {
        let mut centroids = Vec::with_capacity(self.k);
        centroids.push(points[rng.gen_range(0..points.len())]);
        let mut closest: Vec<f64> = points
            .iter()
            .map(|point| squared_distance(point, &centroids[0]))
            .collect();

        while centroids.len() < self.k {
            let total: f64 = closest.iter().sum();
            let index = if total > 0.0 {
                let threshold = rng.gen::<f64>() * total;
                let mut cumulative = 0.0;
                closest
                    .iter()
                    .position(|&distance| {
                        cumulative += distance;
                        distance > 0.0 && cumulative >= threshold
                    })
                    .or_else(|| closest.iter().rposition(|&distance| distance > 0.0))
                    .unwrap_or(0)
            } else {
                // Every point coincides with a chosen centroid
                rng.gen_range(0..points.len())
            };

            let chosen = points[index];
            for (distance, point) in closest.iter_mut().zip(points) {
                *distance = distance.min(squared_distance(point, &chosen));
            }
            centroids.push(chosen);
        }
        centroids
    }
}
