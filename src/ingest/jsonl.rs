// ABOUTME: Newline-delimited JSON reading and writing for raw records and the meal corpus
// ABOUTME: Blank lines are skipped and malformed lines are reported with their line number
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::records::slug;
use nutriplan_core::errors::{AppError, AppResult, ErrorCode};
use nutriplan_core::models::Meal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// One decoded line
#[derive(Debug)]
pub struct JsonlLine<T> {
    /// 1-based line number in the input
    pub line: usize,
    /// Decoded value or the reason it could not be decoded
    pub value: AppResult<T>,
}

/// Decode every non-blank line of `reader`
///
/// Malformed lines are returned as errors in place so callers can decide
/// whether to skip or abort.
///
/// # Errors
///
/// Returns a storage error when the reader itself fails
pub fn decode_lines<T, R>(reader: R) -> AppResult<Vec<JsonlLine<T>>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut decoded = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let text = line?;
        if text.trim().is_empty() {
            continue;
        }
        let value = serde_json::from_str(&text).map_err(|e| {
            AppError::new(
                ErrorCode::InvalidFormat,
                format!("line {line_number}: {e}"),
            )
            .with_source(e)
        });
        decoded.push(JsonlLine {
            line: line_number,
            value,
        });
    }
    Ok(decoded)
}

/// Decode every non-blank line, failing on the first malformed one
///
/// # Errors
///
/// Returns `InvalidFormat` naming the first malformed line, or a storage
/// error when the reader fails
pub fn read_jsonl<T, R>(reader: R) -> AppResult<Vec<T>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    decode_lines(reader)?
        .into_iter()
        .map(|line| line.value)
        .collect()
}

/// Write one compact JSON object per line
///
/// # Errors
///
/// Returns an error when serialization or the writer fails
pub fn write_jsonl<'a, T, W, I>(writer: W, items: I) -> AppResult<usize>
where
    T: Serialize + 'a,
    W: Write,
    I: IntoIterator<Item = &'a T>,
{
    let mut writer = BufWriter::new(writer);
    let mut written = 0;
    for item in items {
        serde_json::to_writer(&mut writer, item)?;
        writer.write_all(b"\n")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

fn open(path: &Path) -> AppResult<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| {
        AppError::storage(format!("failed to open {}: {e}", path.display())).with_source(e)
    })
}

/// Open a JSONL file and decode it line by line
///
/// # Errors
///
/// Returns a storage error when the file cannot be opened or read
pub fn decode_file<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<JsonlLine<T>>> {
    decode_lines(open(path)?)
}

/// Load a persisted meal corpus
///
/// Every record must decode and pass [`Meal::validate`]; the first bad line
/// fails the load. Every loaded meal has a distinct id: a record without one
/// gets a slug of its name, and a repeated id gets a `-2`, `-3`, ... suffix.
///
/// # Errors
///
/// Returns `InvalidFormat` or `InvalidMeal` naming the line, or a storage
/// error when the file cannot be read
pub fn load_corpus(path: &Path) -> AppResult<Vec<Meal>> {
    let mut meals = Vec::new();
    let mut ids = HashSet::new();
    for JsonlLine { line, value } in decode_file::<Meal>(path)? {
        let mut meal = value?;
        meal.validate().map_err(|e| {
            let message = format!("line {line}: {}", e.message);
            AppError::new(e.code, message)
        })?;
        let id = unique_id(&meal, &mut ids);
        if !meal.id.is_empty() && meal.id != id {
            warn!(line, original = %meal.id, id = %id, "Renamed repeated meal id");
        }
        meal.id = id;
        meals.push(meal);
    }
    info!(path = %path.display(), meals = meals.len(), "Loaded meal corpus");
    Ok(meals)
}

fn unique_id(meal: &Meal, taken: &mut HashSet<String>) -> String {
    let trimmed = meal.id.trim();
    let base = if trimmed.is_empty() {
        slug(&meal.name)
    } else {
        trimmed.to_owned()
    };
    let mut id = base.clone();
    let mut suffix = 2_usize;
    while taken.contains(&id) {
        id = format!("{base}-{suffix}");
        suffix += 1;
    }
    taken.insert(id.clone());
    id
}

/// Persist a meal corpus, one meal per line
///
/// # Errors
///
/// Returns a storage error when the file cannot be created or written
pub fn save_corpus(path: &Path, meals: &[Meal]) -> AppResult<usize> {
    let file = File::create(path).map_err(|e| {
        AppError::storage(format!("failed to create {}: {e}", path.display())).with_source(e)
    })?;
    let written = write_jsonl(file, meals)?;
    info!(path = %path.display(), meals = written, "Saved meal corpus");
    Ok(written)
}
