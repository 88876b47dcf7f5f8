use anyhow::{Context, Result};
use grocery_engine::cli::parse_args;
use grocery_engine::grocery_planner::{generate_grocery_list, MealPlan, PlannedRecipe};
use grocery_engine::ingredient_parser::extract_ingredient_lines;
use grocery_engine::pantry::{load_pantry_csv, PantryEntry};
use grocery_engine::shopping_list::InMemoryShoppingList;
use std::path::Path;
use tokio::fs;

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = parse_args();
    println!("Attempting to read recipe file: {}", cli_args.recipe_file);

    let recipe_content = fs::read_to_string(&cli_args.recipe_file)
        .await
        .with_context(|| format!("Failed to read recipe file '{}'", cli_args.recipe_file))?;

    let recipe_title = Path::new(&cli_args.recipe_file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("recipe")
        .to_string();

    let extracted = extract_ingredient_lines(&recipe_content);
    let recipe = if extracted.lines.is_empty() {
        println!("No ingredients section found; treating every non-empty line as an ingredient.");
        let lines: Vec<String> = recipe_content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        PlannedRecipe::from_lines(&recipe_title, &lines)
    } else {
        println!(
            "Found {} ingredient line(s) (parse confidence {:.2}).",
            extracted.lines.len(),
            extracted.confidence
        );
        PlannedRecipe::from_lines(&recipe_title, &extracted.lines)
    };

    let pantry_entries: Vec<PantryEntry> = match &cli_args.pantry_file {
        Some(pantry_path) => {
            let entries = load_pantry_csv(Path::new(pantry_path))
                .with_context(|| format!("Failed to load pantry inventory from '{}'", pantry_path))?;
            println!("Loaded {} pantry entries from '{}'.", entries.len(), pantry_path);
            entries
        }
        None => Vec::new(),
    };

    let plan = MealPlan {
        name: recipe_title,
        recipes: vec![recipe],
    };
    let mut repository = InMemoryShoppingList::new();
    let build = generate_grocery_list(&plan, &pantry_entries, &mut repository)?;

    if cli_args.json {
        println!("{}", serde_json::to_string_pretty(&build)?);
        return Ok(());
    }

    println!(
        "\nConsolidated {} ingredient line(s) into {} item(s).",
        build.stats.original_count, build.stats.final_count
    );
    if !build.stats.combined_items.is_empty() {
        println!("Merged duplicates: {}", build.stats.combined_items.join(", "));
    }
    if !build.excluded_staples.is_empty() {
        println!("Already stocked in pantry: {}", build.excluded_staples.join(", "));
    }

    println!("\nGrocery list:");
    if build.sections.is_empty() {
        println!("  (nothing needed)");
    }
    for section in &build.sections {
        println!("\n[{}]", section.category.label());
        for text in &section.items {
            println!("  - {}", text);
        }
    }

    Ok(())
}
