//! Pantry stock as a read-only input: consolidated requirements already
//! covered by what is on hand are dropped from a generated list.

use crate::consolidator::ConsolidatedEntry;
use crate::normalizer::{normalize_name, units_compatible};
use crate::quantity::parse_quantity;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

const NAME_COL: &str = "name";
const QUANTITY_COL: &str = "quantity";
const UNIT_COL: &str = "unit";
const CATEGORY_COL: &str = "category";
const EXPIRATION_COL: &str = "expiration_date";

/// One row of pantry inventory, owned by the pantry subsystem.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PantryEntry {
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub expiration_date: Option<NaiveDate>,
}

/// Result of filtering a consolidated list against pantry stock: the items
/// still needed, and the names skipped because they are already on hand.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PantryFilterOutcome {
    pub included: Vec<ConsolidatedEntry>,
    pub excluded: Vec<String>,
}

/// Drops every consolidated entry whose full required quantity is already
/// stocked under the same normalized name and a compatible unit.
///
/// Stock below the requirement keeps the item listed at its full amount;
/// no shortfall arithmetic is done. Entries without a quantity are always
/// kept, since sufficiency cannot be established for them.
pub fn filter_against_pantry(
    entries: &[ConsolidatedEntry],
    pantry: &[PantryEntry],
) -> PantryFilterOutcome {
    let mut included = Vec::new();
    let mut excluded = Vec::new();

    for entry in entries {
        if is_stocked(entry, pantry) {
            excluded.push(entry.name.clone());
        } else {
            included.push(entry.clone());
        }
    }

    PantryFilterOutcome { included, excluded }
}

fn is_stocked(entry: &ConsolidatedEntry, pantry: &[PantryEntry]) -> bool {
    let Some(required) = entry.quantity else {
        return false;
    };
    let key = normalize_name(&entry.name);
    if key.is_empty() {
        return false;
    }
    let stocked = pantry.iter().find(|stock| {
        normalize_name(&stock.name) == key
            && units_compatible(entry.unit.as_deref(), stock.unit.as_deref())
    });
    match stocked {
        Some(stock) => stock.quantity >= required,
        None => false,
    }
}

/// Loads pantry inventory from a CSV file with a header row. `name` and
/// `quantity` columns are required; `unit`, `category` and
/// `expiration_date` (ISO date) are optional. Rows with a blank name or an
/// unparseable quantity are skipped rather than failing the whole load.
pub fn load_pantry_csv(csv_path: &Path) -> Result<Vec<PantryEntry>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!(
            "Pantry CSV file not found at: {:?}",
            csv_path
        ));
    }

    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open pantry CSV file at {:?}", csv_path))?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader
        .headers()
        .with_context(|| "Failed to read CSV headers")?
        .clone();
    let name_idx = headers
        .iter()
        .position(|h| h == NAME_COL)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", NAME_COL))?;
    let quantity_idx = headers
        .iter()
        .position(|h| h == QUANTITY_COL)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", QUANTITY_COL))?;
    let unit_idx = headers.iter().position(|h| h == UNIT_COL);
    let category_idx = headers.iter().position(|h| h == CATEGORY_COL);
    let expiration_idx = headers.iter().position(|h| h == EXPIRATION_COL);

    let mut entries = Vec::new();
    for (row_index, result) in reader.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

        let name = record.get(name_idx).unwrap_or("").trim().to_string();
        if name.is_empty() {
            continue;
        }
        let Some(quantity) = record.get(quantity_idx).and_then(parse_quantity) else {
            continue;
        };

        entries.push(PantryEntry {
            name,
            quantity,
            unit: optional_field(&record, unit_idx),
            category: optional_field(&record, category_idx),
            expiration_date: optional_field(&record, expiration_idx)
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        });
    }

    Ok(entries)
}

fn optional_field(record: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|idx| record.get(idx))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}
