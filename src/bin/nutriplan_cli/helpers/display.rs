// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for nutriplan-cli
// ABOUTME: Pretty JSON on stdout and a short human summary of ingestion reports on stderr

use nutriplan_server::errors::AppResult;
use nutriplan_server::ingest::IngestReport;
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Short summary of an ingestion batch, kept off stdout so JSON stays pipeable
pub fn display_ingest_summary(report: &IngestReport) {
    let tiers = report.percentages();
    eprintln!("Ingested {} of {} records", report.accepted, report.total);
    eprintln!(
        "   Rejected: {} (malformed {}, missing fields {}, no ingredients {}, zero calorie {}, duplicates {})",
        report.rejected(),
        report.malformed,
        report.missing_fields,
        report.no_ingredients,
        report.zero_calorie,
        report.duplicates
    );
    eprintln!(
        "   Resolution: fallback {:.1}%, reference {:.1}%, unknown {:.1}%",
        tiers.fallback, tiers.reference, tiers.unknown
    );
}
