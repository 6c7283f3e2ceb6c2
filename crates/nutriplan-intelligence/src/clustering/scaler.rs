// ABOUTME: Per-feature standardization to zero mean and unit variance
// ABOUTME: Statistics come from the training corpus and are persisted with the model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::features::{FeatureVector, FEATURE_COUNT};
use nutriplan_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Feature standardizer fitted on corpus statistics
///
/// Uses the population standard deviation. A constant feature gets scale 1 so
/// it maps to zero instead of dividing by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean
    pub mean: FeatureVector,
    /// Per-feature standard deviation (1 for constant features)
    pub scale: FeatureVector,
}

impl StandardScaler {
    /// Fit on a feature matrix
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `rows` is empty
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(rows: &[FeatureVector]) -> AppResult<Self> {
        if rows.is_empty() {
            return Err(AppError::invalid_input(
                "cannot fit feature scaling on an empty corpus",
            ));
        }
        let count = rows.len() as f64;

        let mut mean = [0.0; FEATURE_COUNT];
        for row in rows {
            for (acc, value) in mean.iter_mut().zip(row) {
                *acc += value;
            }
        }
        for value in &mut mean {
            *value /= count;
        }

        let mut scale = [0.0; FEATURE_COUNT];
        for row in rows {
            for ((acc, value), mu) in scale.iter_mut().zip(row).zip(&mean) {
                *acc += (value - mu) * (value - mu);
            }
        }
        for value in &mut scale {
            let std = (*value / count).sqrt();
            *value = if std > f64::EPSILON { std } else { 1.0 };
        }

        Ok(Self { mean, scale })
    }

    /// Standardize one vector
    #[must_use]
    pub fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (index, slot) in out.iter_mut().enumerate() {
            *slot = (features[index] - self.mean[index]) / self.scale[index];
        }
        out
    }

    /// Map a standardized vector back to raw feature units
    #[must_use]
    pub fn inverse_transform(&self, scaled: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (index, slot) in out.iter_mut().enumerate() {
            *slot = scaled[index].mul_add(self.scale[index], self.mean[index]);
        }
        out
    }
}
