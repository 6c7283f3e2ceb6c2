// ABOUTME: NutriPlan CLI - offline corpus ingestion, model training and recommendation tool
// ABOUTME: Runs the same pipeline as the server against local files and prints JSON results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Build a corpus from TheMealDB dumps, resolving against Foundation Foods
//! nutriplan-cli ingest --input meals.jsonl --format mealdb \
//!     --reference foundation_foods.json --output corpus.jsonl
//!
//! # Train and persist a 20-cluster model
//! nutriplan-cli train --corpus corpus.jsonl --output model.json --k 20
//!
//! # Recommend meals for a 2200 kcal day split over three meals
//! nutriplan-cli recommend --corpus corpus.jsonl --model model.json \
//!     --calories 2200 --protein 165 --carbs 220 --fat 73
//!
//! # Daily targets for a profile
//! nutriplan-cli targets --age 30 --weight 70 --height 175 --gender male \
//!     --activity moderately_active --goal maintain
//!
//! # Inspect how ingredient lines parse and resolve
//! nutriplan-cli parse "2 cups milk" "1 tbsp butter"
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use nutriplan_server::errors::AppResult;
use nutriplan_server::ingest::RawFormat;
use nutriplan_server::intelligence::nutrition_calculator::{ActivityLevel, DietPlan, Gender, Goal};
use nutriplan_server::intelligence::recommendation::DietaryRestriction;
use nutriplan_server::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::debug;

use commands::corpus::{IngestArgs, TrainArgs};
use commands::recommend::{ProfileArgs, RecommendArgs};

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "nutriplan-cli",
    about = "NutriPlan offline tooling",
    long_about = "Build meal corpora, train cluster models and query recommendations from local files."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Build a nutrient-annotated corpus from raw recipe records
    Ingest {
        /// Raw records, one JSON object per line
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Record layout: jsonl, mealdb or completion
        #[arg(long, default_value = "jsonl")]
        format: RawFormat,

        /// Foundation Foods JSON used behind the staples table
        #[arg(long)]
        reference: Option<PathBuf>,

        /// Corpus output path
        #[arg(long, short = 'o')]
        output: PathBuf,
    },

    /// Train a cluster model on a corpus and save it
    Train {
        /// Corpus produced by `ingest`
        #[arg(long)]
        corpus: PathBuf,

        /// Model output path
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Number of clusters
        #[arg(long)]
        k: Option<usize>,

        /// Base random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Independent initialisations
        #[arg(long)]
        n_init: Option<usize>,
    },

    /// Recommend meals for a daily macro target
    Recommend {
        /// Corpus produced by `ingest`
        #[arg(long)]
        corpus: PathBuf,

        /// Saved model; trained on the fly when absent
        #[arg(long)]
        model: Option<PathBuf>,

        /// Daily calories (kcal)
        #[arg(long)]
        calories: f64,

        /// Daily protein (g)
        #[arg(long)]
        protein: f64,

        /// Daily carbohydrates (g)
        #[arg(long)]
        carbs: f64,

        /// Daily fat (g)
        #[arg(long)]
        fat: f64,

        /// Meals the daily target is split across
        #[arg(long, default_value = "3")]
        meals_per_day: u32,

        /// Number of meals to return
        #[arg(long, short = 'n')]
        count: Option<usize>,

        /// Ingredient keywords to exclude (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Dietary restriction: vegetarian or vegan (repeatable)
        #[arg(long)]
        diet: Vec<DietaryRestriction>,

        /// Upper bound on meal calories
        #[arg(long)]
        max_calories: Option<f64>,
    },

    /// Compute daily nutrition targets from body metrics
    Targets {
        /// Age in years
        #[arg(long)]
        age: u32,

        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Height in centimetres
        #[arg(long)]
        height: f64,

        /// male or female
        #[arg(long)]
        gender: Gender,

        /// sedentary, lightly_active, moderately_active, very_active or extra_active
        #[arg(long, default_value = "moderately_active")]
        activity: ActivityLevel,

        /// Weight goal, e.g. maintain or mild_weight_loss
        #[arg(long, default_value = "maintain")]
        goal: Goal,

        /// balanced, high_protein or low_carb
        #[arg(long, default_value = "balanced")]
        diet_plan: DietPlan,

        /// Meals the daily target is split across
        #[arg(long, default_value = "3")]
        meals_per_day: u32,
    },

    /// Parse ingredient lines and show how each resolves
    Parse {
        /// Ingredient lines such as "2 cups milk"
        #[arg(required = true)]
        lines: Vec<String>,

        /// Foundation Foods JSON used behind the staples table
        #[arg(long)]
        reference: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    LoggingConfig::for_cli(log_level).init()?;
    debug!("NutriPlan CLI");

    match cli.command {
        Command::Ingest {
            input,
            format,
            reference,
            output,
        } => {
            commands::corpus::ingest(&IngestArgs {
                input,
                format,
                reference,
                output,
            })?;
        }
        Command::Train {
            corpus,
            output,
            k,
            seed,
            n_init,
        } => {
            commands::corpus::train(&TrainArgs {
                corpus,
                output,
                k,
                seed,
                n_init,
            })
            .await?;
        }
        Command::Recommend {
            corpus,
            model,
            calories,
            protein,
            carbs,
            fat,
            meals_per_day,
            count,
            exclude,
            diet,
            max_calories,
        } => {
            commands::recommend::recommend(RecommendArgs {
                corpus,
                model,
                calories,
                protein,
                carbohydrates: carbs,
                fat,
                meals_per_day,
                count,
                exclude,
                diet,
                max_calories,
            })
            .await?;
        }
        Command::Targets {
            age,
            weight,
            height,
            gender,
            activity,
            goal,
            diet_plan,
            meals_per_day,
        } => {
            commands::recommend::targets(&ProfileArgs {
                age,
                weight_kg: weight,
                height_cm: height,
                gender,
                activity_level: activity,
                goal,
                diet_plan,
                meals_per_day,
            })?;
        }
        Command::Parse { lines, reference } => {
            commands::recommend::parse(&lines, reference.as_deref())?;
        }
    }

    Ok(())
}
