//! Insertion-ordered merging of parsed ingredients into one entry per
//! normalized name, with quantity arithmetic where units allow it.

use crate::ingredient_parser::{parse_line, ParsedIngredient};
use crate::normalizer::{normalize_name, normalize_unit, units_compatible};
use crate::quantity::{format_quantity, parse_quantity};
use crate::shopping_list::ShoppingListItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One merged line of the consolidated list.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConsolidatedEntry {
    pub name: String,
    pub text: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}

impl ConsolidatedEntry {
    /// Reduces the entry back to parsed form so a consolidated list can be
    /// fed through the consolidator again together with new items.
    pub fn to_parsed(&self) -> ParsedIngredient {
        ParsedIngredient {
            raw_text: self.text.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            unit: self.unit.clone(),
            notes: None,
            confidence: 1.0,
        }
    }
}

/// Merge statistics reported alongside the consolidated entries.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ConsolidationStats {
    pub original_count: usize,
    pub final_count: usize,
    pub combined_count: usize,
    pub combined_items: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConsolidatedList {
    pub entries: Vec<ConsolidatedEntry>,
    pub stats: ConsolidationStats,
}

struct Accumulator {
    name: String,
    primary_text: String,
    quantity: Option<f64>,
    unit: Option<String>,
    summed: bool,
    duplicate_count: u32,
    extras: Vec<String>,
    reported: bool,
}

impl Accumulator {
    fn seed(parsed: &ParsedIngredient) -> Self {
        Accumulator {
            name: display_name(parsed),
            primary_text: display_text(parsed),
            quantity: parsed.quantity,
            unit: parsed.unit.clone(),
            summed: false,
            duplicate_count: 1,
            extras: Vec::new(),
            reported: false,
        }
    }

    fn merge(&mut self, parsed: &ParsedIngredient) {
        match (self.quantity, parsed.quantity) {
            (Some(current), Some(incoming)) => {
                if units_compatible(self.unit.as_deref(), parsed.unit.as_deref()) {
                    self.quantity = Some(current + incoming);
                    if self.unit.is_none() {
                        self.unit = parsed.unit.clone();
                    }
                    self.summed = true;
                } else {
                    // Incompatible units: keep the new amount visible in the
                    // display text instead of dropping it.
                    self.extras.push(display_text(parsed));
                }
            }
            (None, Some(_)) => {
                // The quantified line supersedes the earlier bare mention.
                self.quantity = parsed.quantity;
                self.unit = parsed.unit.clone();
                self.primary_text = display_text(parsed);
                self.summed = false;
                self.duplicate_count = 1;
            }
            (Some(_), None) => {}
            (None, None) => {
                let incoming = display_text(parsed);
                if self.primary_text.eq_ignore_ascii_case(&incoming) {
                    self.duplicate_count += 1;
                } else {
                    self.extras.push(incoming);
                }
            }
        }
    }

    fn render_text(&self) -> String {
        let mut text = if self.summed {
            let mut pieces = Vec::new();
            if let Some(quantity) = self.quantity {
                pieces.push(format_quantity(quantity));
            }
            if let Some(unit) = &self.unit {
                pieces.push(unit.clone());
            }
            pieces.push(self.name.clone());
            pieces.join(" ")
        } else {
            self.primary_text.clone()
        };
        if self.duplicate_count > 1 {
            text.push_str(&format!(" (x{})", self.duplicate_count));
        }
        for extra in &self.extras {
            text.push_str(" + ");
            text.push_str(extra);
        }
        text
    }

    fn into_entry(self) -> ConsolidatedEntry {
        let text = self.render_text();
        ConsolidatedEntry {
            name: self.name,
            text,
            quantity: self.quantity,
            unit: self.unit,
        }
    }
}

fn display_name(parsed: &ParsedIngredient) -> String {
    if parsed.name.trim().is_empty() {
        parsed.raw_text.trim().to_string()
    } else {
        parsed.name.trim().to_string()
    }
}

fn display_text(parsed: &ParsedIngredient) -> String {
    let trimmed = parsed.raw_text.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    let mut pieces = Vec::new();
    if let Some(quantity) = parsed.quantity {
        pieces.push(format_quantity(quantity));
    }
    if let Some(unit) = &parsed.unit {
        pieces.push(unit.clone());
    }
    pieces.push(parsed.name.trim().to_string());
    pieces.join(" ").trim().to_string()
}

fn grouping_key(parsed: &ParsedIngredient) -> Option<String> {
    let key = normalize_name(&parsed.name);
    if !key.is_empty() {
        return Some(key);
    }
    let fallback = normalize_name(&parsed.raw_text);
    if !fallback.is_empty() {
        return Some(fallback);
    }
    None
}

/// Merges parsed ingredients into one entry per normalized name.
///
/// Entries keep their first-seen order. Compatible quantities are summed
/// and the display text regenerated; incompatible or unquantified repeats
/// are preserved in the text, so nothing an input line said is lost. Items
/// with no usable name or text at all are dropped.
pub fn consolidate(items: &[ParsedIngredient]) -> ConsolidatedList {
    let mut accumulators: Vec<Accumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut stats = ConsolidationStats {
        original_count: items.len(),
        ..Default::default()
    };

    for parsed in items {
        let Some(key) = grouping_key(parsed) else {
            continue;
        };
        match index.get(&key) {
            Some(&slot) => {
                let accumulator = &mut accumulators[slot];
                accumulator.merge(parsed);
                if !accumulator.reported {
                    accumulator.reported = true;
                    stats.combined_items.push(accumulator.name.clone());
                }
            }
            None => {
                index.insert(key, accumulators.len());
                accumulators.push(Accumulator::seed(parsed));
            }
        }
    }

    stats.combined_count = stats.combined_items.len();
    let entries: Vec<ConsolidatedEntry> = accumulators
        .into_iter()
        .map(Accumulator::into_entry)
        .collect();
    stats.final_count = entries.len();

    ConsolidatedList { entries, stats }
}

/// Reduces a stored shopping-list item back to parsed form. Structured
/// fields on the item win over whatever a re-parse of the display text
/// recovers; the text only fills the gaps.
pub fn reduce_item(item: &ShoppingListItem) -> ParsedIngredient {
    let mut parsed = parse_line(&item.text);
    if let Some(name) = item.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        parsed.name = name.to_string();
    }
    if let Some(amount) = item.quantity.as_deref().and_then(parse_quantity) {
        parsed.quantity = Some(amount);
    }
    if let Some(unit) = item.unit.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        parsed.unit = Some(normalize_unit(unit));
    }
    parsed
}

/// Consolidates an existing list in place of its duplicates: stored items
/// are reduced to parsed form and run through the same merge as fresh
/// recipe lines.
pub fn consolidate_items(items: &[ShoppingListItem]) -> ConsolidatedList {
    let parsed: Vec<ParsedIngredient> = items.iter().map(reduce_item).collect();
    consolidate(&parsed)
}
