//! Grocery-list synthesis from a meal plan: aggregate every recipe's
//! ingredients, consolidate them, drop pantry staples, group by aisle and
//! persist the result as one replace.

use crate::aisle_classifier::{classify, AisleCategory};
use crate::consolidator::{consolidate, reduce_item, ConsolidatedEntry, ConsolidationStats};
use crate::ingredient_parser::{
    extract_ingredient_lines, parse_line, parse_raw, ParsedIngredient, RawIngredient,
};
use crate::pantry::{filter_against_pantry, PantryEntry};
use crate::shopping_list::{ShoppingListItem, ShoppingListRepository};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A recipe as planned for the week: structured ingredients when the
/// recipe subsystem has them, otherwise free-text instructions to mine.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlannedRecipe {
    pub title: String,
    pub ingredients: Vec<RawIngredient>,
    pub instructions: Option<String>,
}

impl PlannedRecipe {
    pub fn from_lines(title: &str, lines: &[impl AsRef<str>]) -> Self {
        PlannedRecipe {
            title: title.to_string(),
            ingredients: lines
                .iter()
                .map(|line| RawIngredient::Text(line.as_ref().to_string()))
                .collect(),
            instructions: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MealPlan {
    pub name: String,
    pub recipes: Vec<PlannedRecipe>,
}

/// Consolidated items for one store aisle, in list order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AisleSection {
    pub category: AisleCategory,
    pub items: Vec<String>,
}

/// Everything a generated grocery list run produces: the items to persist,
/// their aisle grouping, merge statistics and the pantry staples skipped.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroceryListBuild {
    pub items: Vec<ShoppingListItem>,
    pub sections: Vec<AisleSection>,
    pub stats: ConsolidationStats,
    pub excluded_staples: Vec<String>,
}

/// Parses one planned recipe down to ingredients. Structured ingredients
/// win; otherwise the instructions text is mined for an ingredients
/// section. A recipe with neither yields nothing rather than items
/// invented from prose.
pub fn recipe_ingredients(recipe: &PlannedRecipe) -> Vec<ParsedIngredient> {
    if !recipe.ingredients.is_empty() {
        return recipe.ingredients.iter().map(parse_raw).collect();
    }
    if let Some(instructions) = &recipe.instructions {
        let extracted = extract_ingredient_lines(instructions);
        return extracted.lines.iter().map(|line| parse_line(line)).collect();
    }
    Vec::new()
}

/// Groups consolidated entries under their aisles, in the fixed category
/// order with empty aisles omitted.
pub fn group_by_aisle(entries: &[ConsolidatedEntry]) -> Vec<AisleSection> {
    let mut sections = Vec::new();
    for category in AisleCategory::ALL {
        let items: Vec<String> = entries
            .iter()
            .filter(|entry| classify(&entry.name) == category)
            .map(|entry| entry.text.clone())
            .collect();
        if !items.is_empty() {
            sections.push(AisleSection { category, items });
        }
    }
    sections
}

/// Pure half of grocery-list generation: aggregates the plan's recipes,
/// consolidates, filters against the pantry and groups by aisle. No I/O.
pub fn build_grocery_list(plan: &MealPlan, pantry: &[PantryEntry]) -> GroceryListBuild {
    let required: Vec<ParsedIngredient> =
        plan.recipes.iter().flat_map(recipe_ingredients).collect();
    let consolidated = consolidate(&required);
    let outcome = filter_against_pantry(&consolidated.entries, pantry);

    let items: Vec<ShoppingListItem> = outcome
        .included
        .iter()
        .enumerate()
        .map(|(position, entry)| ShoppingListItem::from_entry(entry, position as i64))
        .collect();
    let sections = group_by_aisle(&outcome.included);

    GroceryListBuild {
        items,
        sections,
        stats: consolidated.stats,
        excluded_staples: outcome.excluded,
    }
}

/// Builds the grocery list for a plan and persists it as the new current
/// list in one replace, so a failed write leaves no half-written list.
pub fn generate_grocery_list(
    plan: &MealPlan,
    pantry: &[PantryEntry],
    repository: &mut dyn ShoppingListRepository,
) -> Result<GroceryListBuild> {
    let build = build_grocery_list(plan, pantry);
    repository
        .replace_all(build.items.clone())
        .with_context(|| format!("Failed to persist grocery list for plan '{}'", plan.name))?;
    Ok(build)
}

/// Adds one recipe's ingredients to the existing list, re-consolidating
/// the combined set so duplicates merge instead of piling up.
pub fn import_recipe(
    recipe: &PlannedRecipe,
    repository: &mut dyn ShoppingListRepository,
) -> Result<ConsolidationStats> {
    let mut combined: Vec<ParsedIngredient> =
        repository.fetch_all().iter().map(reduce_item).collect();
    combined.extend(recipe_ingredients(recipe));

    let consolidated = consolidate(&combined);
    let items: Vec<ShoppingListItem> = consolidated
        .entries
        .iter()
        .enumerate()
        .map(|(position, entry)| ShoppingListItem::from_entry(entry, position as i64))
        .collect();
    repository
        .replace_all(items)
        .with_context(|| format!("Failed to persist list after importing '{}'", recipe.title))?;
    Ok(consolidated.stats)
}
