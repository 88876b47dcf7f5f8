use grocery_engine::aisle_classifier::AisleCategory;
use grocery_engine::chat_commands::{execute_command, parse_command, ChatCommand};
use grocery_engine::grocery_planner::{
    build_grocery_list, generate_grocery_list, MealPlan, PlannedRecipe,
};
use grocery_engine::ingredient_parser::extract_ingredient_lines;
use grocery_engine::pantry::load_pantry_csv;
use grocery_engine::shopping_list::{InMemoryShoppingList, ShoppingListRepository, TemplateStore};
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

const BRUNCH_RECIPE: &str = "\
Sunday Brunch

Ingredients:
2 cups flour
1 cup flour
3 eggs
1 lb chicken breast
salt

Instructions:
1. Mix the dry ingredients.
2. Whisk in the eggs and rest the batter.
";

fn single_recipe_plan(name: &str, lines: &[&str]) -> MealPlan {
    MealPlan {
        name: name.to_string(),
        recipes: vec![PlannedRecipe::from_lines(name, lines)],
    }
}

#[test]
fn test_recipe_text_to_sectioned_list() {
    let extracted = extract_ingredient_lines(BRUNCH_RECIPE);
    assert_eq!(extracted.lines.len(), 5);
    assert!(
        extracted.confidence > 0.5,
        "expected a confident parse, got {}",
        extracted.confidence
    );

    let plan = MealPlan {
        name: "Sunday brunch".to_string(),
        recipes: vec![PlannedRecipe::from_lines("Sunday brunch", &extracted.lines)],
    };
    let mut repository = InMemoryShoppingList::new();
    let build = generate_grocery_list(&plan, &[], &mut repository).unwrap();

    assert_eq!(build.stats.original_count, 5);
    assert_eq!(build.stats.final_count, 4);
    assert_eq!(build.stats.combined_items, vec!["flour"]);

    let texts: Vec<&str> = build.items.iter().map(|item| item.text.as_str()).collect();
    assert!(texts.contains(&"3 cups flour"), "missing merged flour in {texts:?}");

    let order: Vec<AisleCategory> = build
        .sections
        .iter()
        .map(|section| section.category)
        .collect();
    assert_eq!(
        order,
        vec![AisleCategory::Dairy, AisleCategory::Meat, AisleCategory::DryGoods]
    );

    let stored = repository.fetch_all();
    assert_eq!(stored.len(), 4);
    assert!(stored.iter().all(|item| !item.is_checked));
}

#[test]
fn test_pantry_file_excludes_stocked_staples() -> Result<()> {
    let mut pantry_file = NamedTempFile::new()?;
    writeln!(pantry_file, "name,quantity,unit,category,expiration_date")?;
    writeln!(pantry_file, "flour,5,cups,dry goods,")?;
    writeln!(pantry_file, "milk,0.5,liters,dairy,2026-09-01")?;

    let pantry = load_pantry_csv(pantry_file.path())?;
    assert_eq!(pantry.len(), 2);

    let plan = single_recipe_plan("Bake day", &["3 cups flour", "2 liters milk", "1 jar honey"]);
    let mut repository = InMemoryShoppingList::new();
    let build = generate_grocery_list(&plan, &pantry, &mut repository)?;

    assert_eq!(build.excluded_staples, vec!["flour"]);
    let texts: Vec<&str> = build.items.iter().map(|item| item.text.as_str()).collect();
    assert!(texts.contains(&"2 liters milk"));
    assert!(texts.contains(&"1 jar honey"));
    Ok(())
}

#[test]
fn test_regenerating_replaces_previous_list() {
    let mut repository = InMemoryShoppingList::new();

    let week_one = single_recipe_plan("Week one", &["2 cups rice", "1 bunch cilantro"]);
    generate_grocery_list(&week_one, &[], &mut repository).unwrap();
    assert_eq!(repository.len(), 2);

    let week_two = single_recipe_plan("Week two", &["1 loaf bread"]);
    generate_grocery_list(&week_two, &[], &mut repository).unwrap();

    let items = repository.fetch_all();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].text, "1 loaf bread");
}

#[test]
fn test_fractional_quantities_sum_cleanly() {
    let plan = single_recipe_plan("Cookies", &["1 1/2 cups sugar", "1/2 cup sugar"]);
    let build = build_grocery_list(&plan, &[]);

    assert_eq!(build.items.len(), 1);
    assert_eq!(build.items[0].text, "2 cups sugar");
}

#[test]
fn test_template_save_apply_round_trip() {
    let mut store = TemplateStore::with_builtins();
    let mut repository = InMemoryShoppingList::new();

    execute_command(&parse_command("add 2 cups flour"), &mut repository).unwrap();
    execute_command(&parse_command("add 1 dozen eggs"), &mut repository).unwrap();

    let template_id =
        store.save_as_template("Brunch run", "Flour and eggs", &repository.fetch_all());

    execute_command(&ChatCommand::ClearList, &mut repository).unwrap();
    assert!(repository.is_empty());

    let revived = store.apply(template_id).unwrap();
    repository.replace_all(revived).unwrap();

    let items = repository.fetch_all();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].text, "2 cups flour");
    assert_eq!(items[1].text, "1 dozen eggs");
    assert!(items.iter().all(|item| !item.is_checked));
}

#[test]
fn test_chat_session_builds_and_cleans_list() {
    let mut repository = InMemoryShoppingList::new();

    let replies: Vec<String> = [
        "add 2 cups flour to my list",
        "add 1 cup flour",
        "add milk",
        "tidy up my list",
        "what's on my list?",
    ]
    .iter()
    .map(|message| execute_command(&parse_command(message), &mut repository).unwrap())
    .collect();

    assert!(replies[3].contains("Merged 1"), "unexpected reply: {}", replies[3]);
    assert!(replies[4].contains("3 cups flour"));
    assert!(replies[4].contains("milk"));

    let reply =
        execute_command(&parse_command("remove flour from my list"), &mut repository).unwrap();
    assert!(reply.starts_with("Removed"));
    assert_eq!(repository.len(), 1);
}

#[test]
fn test_grocery_list_serializes_with_snake_case_sections() {
    let plan = single_recipe_plan("Milk run", &["2 liters milk"]);
    let build = build_grocery_list(&plan, &[]);

    let value = serde_json::to_value(&build).unwrap();
    assert_eq!(value["sections"][0]["category"], "dairy");
    assert_eq!(value["stats"]["original_count"], 1);
    assert!(value["items"][0]["id"].is_string());
}
