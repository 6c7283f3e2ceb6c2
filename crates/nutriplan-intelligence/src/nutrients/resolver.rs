// ABOUTME: Tiered nutrient resolver: staples table, reference keyword match, zero default
// ABOUTME: Caches one resolution per canonical name and tallies which tier answered
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::fallback::fallback_profile;
use super::reference::NutrientReference;
use dashmap::DashMap;
use nutriplan_core::models::NutrientProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;
use tracing::debug;

/// Tier that produced a nutrient profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientSource {
    /// Built-in staples table
    Fallback,
    /// Keyword match in the external reference
    Reference,
    /// Nothing matched; the all-zero profile was substituted
    Unknown,
}

impl fmt::Display for NutrientSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fallback => f.write_str("fallback"),
            Self::Reference => f.write_str("reference"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Per-100 g profile and the tier it came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Nutrients per 100 g
    pub profile: NutrientProfile,
    /// Tier that answered
    pub source: NutrientSource,
}

impl Resolution {
    const UNKNOWN: Self = Self {
        profile: NutrientProfile::ZERO,
        source: NutrientSource::Unknown,
    };
}

/// Resolution counts per tier, for data-quality reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCounts {
    /// Answered by the staples table
    pub fallback: usize,
    /// Answered by the reference
    pub reference: usize,
    /// Unresolved
    pub unknown: usize,
}

impl SourceCounts {
    /// Count one resolution
    pub fn record(&mut self, source: NutrientSource) {
        match source {
            NutrientSource::Fallback => self.fallback += 1,
            NutrientSource::Reference => self.reference += 1,
            NutrientSource::Unknown => self.unknown += 1,
        }
    }

    /// Total resolutions counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.fallback + self.reference + self.unknown
    }

    /// Share of resolutions answered by `source`, in percent
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self, source: NutrientSource) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match source {
            NutrientSource::Fallback => self.fallback,
            NutrientSource::Reference => self.reference,
            NutrientSource::Unknown => self.unknown,
        };
        count as f64 * 100.0 / total as f64
    }
}

impl AddAssign for SourceCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.fallback += rhs.fallback;
        self.reference += rhs.reference;
        self.unknown += rhs.unknown;
    }
}

/// Contract for looking up per-100 g nutrients by canonical ingredient name
///
/// Implementations are total: an unresolvable name yields the zero profile.
pub trait NutrientLookup: Send + Sync {
    /// Resolve a canonical ingredient name
    fn resolve(&self, name: &str) -> Resolution;
}

/// Staples table, then reference keyword match, then zero default
///
/// Resolutions are cached per name for the lifetime of the resolver, so a
/// batch run consults the reference at most once per distinct ingredient.
#[derive(Debug, Default)]
pub struct NutrientResolver {
    reference: NutrientReference,
    cache: DashMap<String, Resolution>,
}

impl NutrientResolver {
    /// Resolver backed by `reference` for names outside the staples table
    #[must_use]
    pub fn new(reference: NutrientReference) -> Self {
        Self {
            reference,
            cache: DashMap::new(),
        }
    }

    /// Resolver with only the staples table
    #[must_use]
    pub fn without_reference() -> Self {
        Self::default()
    }

    /// Reference table in use
    #[must_use]
    pub const fn reference(&self) -> &NutrientReference {
        &self.reference
    }

    /// Distinct names resolved so far
    #[must_use]
    pub fn cached_names(&self) -> usize {
        self.cache.len()
    }

    fn resolve_uncached(&self, name: &str) -> Resolution {
        if name.is_empty() {
            return Resolution::UNKNOWN;
        }
        if let Some(profile) = fallback_profile(name) {
            return Resolution {
                profile,
                source: NutrientSource::Fallback,
            };
        }
        if let Some(entry) = self.reference.find(name) {
            debug!(ingredient = name, matched = %entry.description, "Reference match");
            return Resolution {
                profile: entry.profile,
                source: NutrientSource::Reference,
            };
        }
        debug!(ingredient = name, "No nutrient match, using zero profile");
        Resolution::UNKNOWN
    }
}

impl NutrientLookup for NutrientResolver {
    fn resolve(&self, name: &str) -> Resolution {
        if let Some(cached) = self.cache.get(name) {
            return *cached;
        }
        let resolution = self.resolve_uncached(name);
        self.cache.insert(name.to_owned(), resolution);
        resolution
    }
}
