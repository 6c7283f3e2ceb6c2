// ABOUTME: Human-readable cluster summaries regenerated after every training run
// ABOUTME: Mean nutrients, dominant categories and areas, sample meals and a short label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriplan_core::constants::nutrition::{
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
};
use nutriplan_core::models::{Meal, NutrientProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const TOP_GROUPS: usize = 3;
const SAMPLE_MEALS: usize = 5;
const LOW_CALORIE_LIMIT: f64 = 200.0;
const MEDIUM_CALORIE_LIMIT: f64 = 400.0;
const HIGH_PROTEIN_RATIO: f64 = 0.3;
const HIGH_FAT_RATIO: f64 = 0.35;
const HIGH_CARB_RATIO: f64 = 0.5;
const HIGH_FIBER_GRAMS: f64 = 10.0;

/// A category or area and how many meals of the cluster carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    /// Category or area name
    pub name: String,
    /// Meals in the cluster with this value
    pub count: usize,
}

/// Description of one cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Cluster id
    pub cluster: usize,
    /// Meals assigned
    pub size: usize,
    /// Mean meal nutrients
    pub mean_nutrition: NutrientProfile,
    /// Label such as "Medium-Calorie, High-Protein"
    pub description: String,
    /// Most frequent categories, most common first
    pub top_categories: Vec<GroupCount>,
    /// Most frequent areas, most common first
    pub top_areas: Vec<GroupCount>,
    /// Names of up to five meals in corpus order
    pub sample_meals: Vec<String>,
}

fn top_groups<'a>(values: impl Iterator<Item = &'a str>) -> Vec<GroupCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.filter(|value| !value.trim().is_empty()) {
        *counts.entry(value).or_default() += 1;
    }
    let mut groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(name, count)| GroupCount {
            name: name.to_owned(),
            count,
        })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    groups.truncate(TOP_GROUPS);
    groups
}

/// Label derived from mean nutrients
#[must_use]
pub fn describe(mean: &NutrientProfile) -> String {
    let band = if mean.calories < LOW_CALORIE_LIMIT {
        "Low-Calorie"
    } else if mean.calories < MEDIUM_CALORIE_LIMIT {
        "Medium-Calorie"
    } else {
        "High-Calorie"
    };

    let energy = mean.calories + 1.0;
    let focus = if mean.protein * KCAL_PER_GRAM_PROTEIN / energy > HIGH_PROTEIN_RATIO {
        "High-Protein"
    } else if mean.fat * KCAL_PER_GRAM_FAT / energy > HIGH_FAT_RATIO {
        "High-Fat"
    } else if mean.carbohydrates * KCAL_PER_GRAM_CARBS / energy > HIGH_CARB_RATIO {
        "High-Carb"
    } else {
        "Balanced"
    };

    let mut description = format!("{band}, {focus}");
    if mean.fiber > HIGH_FIBER_GRAMS {
        description.push_str(", High-Fiber");
    }
    description
}

/// Summaries for clusters `0..k` of already-assigned meals
///
/// Clusters that ended up empty are reported with size zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(meals: &[Meal], k: usize) -> Vec<ClusterSummary> {
    (0..k)
        .map(|cluster| {
            let members: Vec<&Meal> = meals
                .iter()
                .filter(|meal| meal.cluster == Some(cluster))
                .collect();
            let mean_nutrition = if members.is_empty() {
                NutrientProfile::ZERO
            } else {
                members
                    .iter()
                    .map(|meal| meal.nutrition)
                    .sum::<NutrientProfile>()
                    .scaled(1.0 / members.len() as f64)
                    .rounded(2)
            };

            ClusterSummary {
                cluster,
                size: members.len(),
                description: describe(&mean_nutrition),
                mean_nutrition,
                top_categories: top_groups(members.iter().map(|meal| meal.category.as_str())),
                top_areas: top_groups(members.iter().map(|meal| meal.area.as_str())),
                sample_meals: members
                    .iter()
                    .take(SAMPLE_MEALS)
                    .map(|meal| meal.name.clone())
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        let lean = NutrientProfile::new(150.0, 15.0, 2.0, 5.0, 1.0, 100.0);
        assert_eq!(describe(&lean), "Low-Calorie, High-Protein");

        let pastry = NutrientProfile::new(450.0, 5.0, 25.0, 40.0, 2.0, 200.0);
        assert_eq!(describe(&pastry), "High-Calorie, High-Fat");

        let porridge = NutrientProfile::new(350.0, 10.0, 5.0, 60.0, 12.0, 50.0);
        assert_eq!(describe(&porridge), "Medium-Calorie, High-Carb, High-Fiber");
    }

    #[test]
    fn test_top_groups_order() {
        let groups = top_groups(["Beef", "Dessert", "Beef", "", "Pasta", "Dessert", "Side"].into_iter());
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Beef", "Dessert", "Pasta"]);
    }
}
