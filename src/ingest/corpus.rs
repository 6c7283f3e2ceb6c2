// ABOUTME: Corpus builder running parse, normalize, resolve and aggregate over raw meal records
// ABOUTME: Quarantines malformed, incomplete and zero-energy records and reports data quality
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::completion::{parse_completion, CompletionRecord};
use super::jsonl::{decode_file, JsonlLine};
use super::records::{RawIngredient, RawMealRecord};
use nutriplan_core::errors::{AppError, AppResult, ErrorCode};
use nutriplan_core::models::{Meal, ParsedIngredient};
use nutriplan_intelligence::{
    IngredientParser, MealAggregator, MealDraft, NutrientLookup, NutrientSource, ParseOutcome,
    SourceCounts,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Layout of a raw input file; every layout holds one JSON object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawFormat {
    /// [`RawMealRecord`] objects
    Jsonl,
    /// `TheMealDB` lookup objects
    Mealdb,
    /// `{"prompt", "completion"}` pairs holding recipe text blocks
    Completion,
}

impl FromStr for RawFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jsonl" | "raw" => Ok(Self::Jsonl),
            "mealdb" | "themealdb" => Ok(Self::Mealdb),
            "completion" | "completions" => Ok(Self::Completion),
            other => Err(AppError::invalid_input(format!(
                "unknown input format '{other}' (expected jsonl, mealdb or completion)"
            ))),
        }
    }
}

impl fmt::Display for RawFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Jsonl => "jsonl",
            Self::Mealdb => "mealdb",
            Self::Completion => "completion",
        })
    }
}

/// Read a raw input file into records, keeping undecodable lines as errors
///
/// # Errors
///
/// Returns a storage error when the file cannot be read
pub fn read_raw_records(path: &Path, format: RawFormat) -> AppResult<Vec<JsonlLine<RawMealRecord>>> {
    let lines = match format {
        RawFormat::Jsonl => decode_file::<RawMealRecord>(path)?,
        RawFormat::Mealdb => decode_file::<Map<String, Value>>(path)?
            .into_iter()
            .map(|line| JsonlLine {
                line: line.line,
                value: line.value.map(|record| RawMealRecord::from_mealdb(&record)),
            })
            .collect(),
        RawFormat::Completion => decode_file::<CompletionRecord>(path)?
            .into_iter()
            .map(|line| JsonlLine {
                line: line.line,
                value: line
                    .value
                    .and_then(|record| parse_completion(&record.completion)),
            })
            .collect(),
    };
    debug!(path = %path.display(), %format, lines = lines.len(), "Read raw records");
    Ok(lines)
}

/// Share of ingredient resolutions per tier, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPercentages {
    /// Staples table
    pub fallback: f64,
    /// External reference
    pub reference: f64,
    /// Unresolved
    pub unknown: f64,
}

/// Data-quality tally for one ingestion batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Records seen
    pub total: usize,
    /// Meals produced
    pub accepted: usize,
    /// Lines that were not valid JSON for the format
    pub malformed: usize,
    /// Records without a meal name
    pub missing_fields: usize,
    /// Records with no usable ingredient
    pub no_ingredients: usize,
    /// Records whose ingredients resolved to no energy
    pub zero_calorie: usize,
    /// Records repeating an id already accepted
    pub duplicates: usize,
    /// Parse anomalies across accepted meals
    pub anomalies: usize,
    /// Ingredient resolutions across accepted meals
    pub sources: SourceCounts,
}

impl IngestReport {
    /// Records not turned into meals
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.total - self.accepted
    }

    /// Resolution tier shares
    #[must_use]
    pub fn percentages(&self) -> TierPercentages {
        TierPercentages {
            fallback: self.sources.percentage(NutrientSource::Fallback),
            reference: self.sources.percentage(NutrientSource::Reference),
            unknown: self.sources.percentage(NutrientSource::Unknown),
        }
    }
}

/// Meals built from one batch together with its report
#[derive(Debug, Clone)]
pub struct CorpusBuild {
    /// Accepted meals in input order
    pub meals: Vec<Meal>,
    /// What happened to every record
    pub report: IngestReport,
}

enum RecordOutcome {
    Accepted {
        meal: Meal,
        sources: SourceCounts,
        anomalies: usize,
    },
    Malformed,
    MissingFields,
    NoIngredients,
    ZeroCalorie,
}

/// Turns raw meal records into aggregated corpus meals
pub struct CorpusBuilder<'a> {
    parser: &'a IngredientParser,
    lookup: &'a dyn NutrientLookup,
}

impl<'a> CorpusBuilder<'a> {
    /// Builder parsing with `parser` and resolving nutrients through `lookup`
    #[must_use]
    pub fn new(parser: &'a IngredientParser, lookup: &'a dyn NutrientLookup) -> Self {
        Self { parser, lookup }
    }

    /// Build meals from decoded records
    #[must_use]
    pub fn build(&self, records: Vec<RawMealRecord>) -> CorpusBuild {
        self.build_lines(
            records
                .into_iter()
                .enumerate()
                .map(|(index, record)| JsonlLine {
                    line: index + 1,
                    value: Ok(record),
                })
                .collect(),
        )
    }

    /// Build meals from decoded lines, counting undecodable ones
    ///
    /// Records are processed in parallel; accepted meals keep input order
    /// and the first record with a given id wins.
    #[must_use]
    pub fn build_lines(&self, lines: Vec<JsonlLine<RawMealRecord>>) -> CorpusBuild {
        let started = Instant::now();
        let outcomes: Vec<RecordOutcome> = lines
            .into_par_iter()
            .map(|line| self.process_line(line))
            .collect();

        let mut report = IngestReport {
            total: outcomes.len(),
            ..IngestReport::default()
        };
        let mut seen = HashSet::new();
        let mut meals = Vec::new();
        for outcome in outcomes {
            match outcome {
                RecordOutcome::Accepted {
                    meal,
                    sources,
                    anomalies,
                } => {
                    if !seen.insert(meal.id.clone()) {
                        debug!(meal_id = %meal.id, "Skipping duplicate meal id");
                        report.duplicates += 1;
                        continue;
                    }
                    report.sources += sources;
                    report.anomalies += anomalies;
                    meals.push(meal);
                }
                RecordOutcome::Malformed => report.malformed += 1,
                RecordOutcome::MissingFields => report.missing_fields += 1,
                RecordOutcome::NoIngredients => report.no_ingredients += 1,
                RecordOutcome::ZeroCalorie => report.zero_calorie += 1,
            }
        }
        report.accepted = meals.len();

        if report.total > 0 && report.accepted == 0 {
            warn!(records = report.total, "No record in the batch produced a meal");
        }
        info!(
            total = report.total,
            accepted = report.accepted,
            rejected = report.rejected(),
            elapsed_ms = started.elapsed().as_millis(),
            "Built meal corpus"
        );

        CorpusBuild { meals, report }
    }

    fn process_line(&self, line: JsonlLine<RawMealRecord>) -> RecordOutcome {
        match line.value {
            Ok(record) => self.process(record, line.line),
            Err(e) if e.code == ErrorCode::MissingRequiredField => {
                debug!(line = line.line, error = %e, "Record missing required fields");
                RecordOutcome::MissingFields
            }
            Err(e) => {
                debug!(line = line.line, error = %e, "Malformed record");
                RecordOutcome::Malformed
            }
        }
    }

    fn parse_ingredient(&self, ingredient: &RawIngredient) -> ParseOutcome {
        match ingredient {
            RawIngredient::Line(line) => self.parser.parse_detailed(line),
            RawIngredient::Measured { measure, name } => self.parser.parse_measure(measure, name),
        }
    }

    fn process(&self, record: RawMealRecord, line: usize) -> RecordOutcome {
        let name = record.name.trim();
        if name.is_empty() {
            debug!(line, "Record has no meal name");
            return RecordOutcome::MissingFields;
        }

        let min_name_length = self.parser.config().min_name_length;
        let mut anomalies = 0;
        let ingredients: Vec<ParsedIngredient> = record
            .ingredients
            .items()
            .iter()
            .map(|raw| self.parse_ingredient(raw))
            .filter_map(|outcome| {
                if !outcome.anomalies.is_empty() {
                    debug!(
                        meal = %name,
                        ingredient = %outcome.ingredient.name,
                        anomalies = ?outcome.anomalies,
                        "Ingredient parse anomalies"
                    );
                    anomalies += outcome.anomalies.len();
                }
                (!outcome.ingredient.is_discardable(min_name_length)).then_some(outcome.ingredient)
            })
            .collect();
        if ingredients.is_empty() {
            debug!(line, meal = %name, "Record has no usable ingredients");
            return RecordOutcome::NoIngredients;
        }

        let draft = MealDraft {
            id: record.meal_id(),
            name: name.to_owned(),
            category: record.category.trim().to_owned(),
            area: record.area.trim().to_owned(),
            instructions: record.instructions.trim().to_owned(),
            ingredients,
            source: record.source_url,
            tags: record.tags,
        };
        let aggregator = MealAggregator::new(self.lookup, self.parser.config());
        match aggregator.build_meal(draft) {
            Ok((meal, sources)) => RecordOutcome::Accepted {
                meal,
                sources,
                anomalies,
            },
            Err(e) => {
                debug!(line, error = %e, "Quarantined meal without energy");
                RecordOutcome::ZeroCalorie
            }
        }
    }
}
