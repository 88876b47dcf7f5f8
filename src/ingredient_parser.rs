use crate::normalizer::{canonical_unit, normalize_unit};
use crate::quantity::{format_quantity, parse_quantity};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// An ingredient as it arrives from a recipe. Imported recipes carry either
/// a plain text line or already-structured fields, so both shapes are
/// accepted and funneled through the same parse step.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum RawIngredient {
    Text(String),
    Structured {
        name: String,
        quantity: Option<QuantityValue>,
        unit: Option<String>,
        notes: Option<String>,
    },
}

/// Structured recipes are loose about the quantity field: sometimes a JSON
/// number, sometimes a string like "1/2". Both are accepted.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum QuantityValue {
    Amount(f64),
    Text(String),
}

impl QuantityValue {
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            QuantityValue::Amount(value) => {
                Some(*value).filter(|v| v.is_finite() && *v >= 0.0)
            }
            QuantityValue::Text(text) => parse_quantity(text),
        }
    }

    pub fn display(&self) -> String {
        match self {
            QuantityValue::Amount(value) => format_quantity(*value),
            QuantityValue::Text(text) => text.trim().to_string(),
        }
    }
}

/// The structured result of parsing one ingredient, plus a confidence score
/// in [0, 1] describing how much of the expected grammar was present.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ParsedIngredient {
    pub raw_text: String,
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub notes: Option<String>,
    pub confidence: f64,
}

/// Ingredient lines pulled out of a free-text recipe, with the mean parse
/// confidence over those lines. Confidence 0 means no ingredients section
/// was found and the text should be treated as unparsed.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractedIngredients {
    pub lines: Vec<String>,
    pub confidence: f64,
}

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").unwrap());

static INGREDIENTS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*ingredients?\s*(:|$)").unwrap());

static SECTION_TERMINATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(instructions?|directions?|method|steps?|preparation|notes?)\s*(:|$)")
        .unwrap()
});

static NUMBERED_STEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.").unwrap());

/// Parses one free-text ingredient line.
///
/// The grammar is a leading quantity token (including mixed numbers such as
/// "1 1/2"), an optional unit token, and the remainder as the ingredient
/// name. Parenthetical text anywhere in the line is pulled out into notes.
/// Lines that match none of this still come back as a low-confidence bare
/// name, never an error.
pub fn parse_line(line: &str) -> ParsedIngredient {
    let raw_text = line.trim().to_string();
    let without_bullet = raw_text.trim_start_matches(['-', '*', '•']).trim();

    let mut notes = Vec::new();
    for captures in PARENTHETICAL.captures_iter(without_bullet) {
        let note = captures[1].trim().to_string();
        if !note.is_empty() {
            notes.push(note);
        }
    }
    let stripped = PARENTHETICAL.replace_all(without_bullet, " ");

    let tokens: Vec<&str> = stripped.split_whitespace().collect();
    let mut consumed = 0;
    let mut quantity = None;

    // A mixed number spans two tokens, so try that reading before the
    // single-token one.
    if tokens.len() >= 2 && tokens[1].contains('/') {
        if let Some(amount) = parse_quantity(&format!("{} {}", tokens[0], tokens[1])) {
            quantity = Some(amount);
            consumed = 2;
        }
    }
    if quantity.is_none() {
        if let Some(first) = tokens.first() {
            if let Some(amount) = parse_quantity(first) {
                quantity = Some(amount);
                consumed = 1;
            }
        }
    }

    // A unit only counts directly after a quantity; without one the token
    // is part of the name ("cup measure" the utensil, not the unit).
    let mut unit = None;
    if quantity.is_some() {
        if let Some(token) = tokens.get(consumed) {
            if let Some(canonical) = canonical_unit(token) {
                unit = Some(canonical.to_string());
                consumed += 1;
            }
        }
    }

    // Skip connective "of" between unit and name ("2 cups of flour").
    if unit.is_some() {
        if let Some(token) = tokens.get(consumed) {
            if token.eq_ignore_ascii_case("of") {
                consumed += 1;
            }
        }
    }

    let name = tokens[consumed..]
        .join(" ")
        .trim_matches(|c: char| c == ',' || c == '.' || c == ';')
        .trim()
        .to_string();

    let confidence = score_confidence(&name, quantity.is_some(), unit.is_some());

    ParsedIngredient {
        raw_text,
        name,
        quantity,
        unit,
        notes: if notes.is_empty() {
            None
        } else {
            Some(notes.join(", "))
        },
        confidence,
    }
}

fn score_confidence(name: &str, has_quantity: bool, has_unit: bool) -> f64 {
    if name.is_empty() {
        0.0
    } else if has_quantity && has_unit {
        1.0
    } else if has_quantity {
        0.75
    } else {
        0.3
    }
}

/// Parses a raw ingredient of either shape. Structured input bypasses the
/// line grammar: the fields are taken as-is, with the quantity run through
/// the numeric parser and a display line rebuilt from the parts.
pub fn parse_raw(raw: &RawIngredient) -> ParsedIngredient {
    match raw {
        RawIngredient::Text(line) => parse_line(line),
        RawIngredient::Structured {
            name,
            quantity,
            unit,
            notes,
        } => {
            let mut pieces = Vec::new();
            if let Some(quantity) = quantity {
                pieces.push(quantity.display());
            }
            if let Some(unit) = unit {
                pieces.push(unit.trim().to_string());
            }
            pieces.push(name.trim().to_string());
            let raw_text = pieces.join(" ").trim().to_string();

            ParsedIngredient {
                raw_text,
                name: name.trim().to_string(),
                quantity: quantity.as_ref().and_then(QuantityValue::as_amount),
                unit: unit.as_deref().map(normalize_unit),
                notes: notes
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(String::from),
                confidence: 1.0,
            }
        }
    }
}

/// Pulls the ingredient lines out of a free-text recipe.
///
/// Lines after an "Ingredients" heading are collected, minus bullets and
/// blanks, until an instructions-style heading, a numbered step line, or
/// the end of the text. The aggregate confidence is the mean of per-line
/// parse confidences; zero when no heading exists, in which case callers
/// must treat the text as unparsed rather than invent items from prose.
pub fn extract_ingredient_lines(text: &str) -> ExtractedIngredients {
    let mut lines = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        if !in_section {
            if let Some(found) = INGREDIENTS_HEADING.find(line) {
                in_section = true;
                let rest = clean_line(&line[found.end()..]);
                if !rest.is_empty() {
                    lines.push(rest);
                }
            }
            continue;
        }
        if SECTION_TERMINATOR.is_match(line) || NUMBERED_STEP.is_match(line) {
            break;
        }
        let cleaned = clean_line(line);
        if !cleaned.is_empty() {
            lines.push(cleaned);
        }
    }

    let confidence = if lines.is_empty() {
        0.0
    } else {
        let total: f64 = lines.iter().map(|line| parse_line(line).confidence).sum();
        total / lines.len() as f64
    };

    ExtractedIngredients { lines, confidence }
}

fn clean_line(line: &str) -> String {
    line.trim()
        .trim_start_matches(['-', '*', '•'])
        .trim()
        .to_string()
}
