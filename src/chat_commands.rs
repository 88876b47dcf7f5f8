//! Keyword dispatcher for the chat wrapper. Deliberately shallow: a few
//! verb patterns mapped onto engine calls, everything else is reported as
//! not understood instead of guessed at.

use crate::consolidator::consolidate_items;
use crate::ingredient_parser::{parse_line, ParsedIngredient};
use crate::normalizer::normalize_name;
use crate::quantity::format_quantity;
use crate::shopping_list::{ShoppingListItem, ShoppingListRepository};
use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone)]
pub enum ChatCommand {
    AddItem(ParsedIngredient),
    RemoveItem { name: String },
    ShowList,
    ClearList,
    ConsolidateList,
    Unrecognized(String),
}

static ADD_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:add|put|include)\s+(.+?)(?:\s+(?:to|on)\s+(?:my\s+)?(?:shopping\s+|grocery\s+)?list)?$")
        .unwrap()
});

static REMOVE_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:remove|delete|take)\s+(?:the\s+)?(.+?)(?:\s+(?:from|off)\s+(?:my\s+)?(?:shopping\s+|grocery\s+)?list)?$")
        .unwrap()
});

static SHOW_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^(?:show|display|view)\b.*\blist\b|^what'?s\s+on\b)").unwrap()
});

static CLEAR_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:clear|empty|reset)\b").unwrap());

static CONSOLIDATE_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:consolidate|merge|tidy|dedupe)\b").unwrap());

/// Maps one chat message onto a command. First matching verb pattern wins.
pub fn parse_command(input: &str) -> ChatCommand {
    let trimmed = input.trim();

    if SHOW_COMMAND.is_match(trimmed) {
        return ChatCommand::ShowList;
    }
    if CLEAR_COMMAND.is_match(trimmed) {
        return ChatCommand::ClearList;
    }
    if CONSOLIDATE_COMMAND.is_match(trimmed) {
        return ChatCommand::ConsolidateList;
    }
    if let Some(captures) = ADD_COMMAND.captures(trimmed) {
        return ChatCommand::AddItem(parse_line(&captures[1]));
    }
    if let Some(captures) = REMOVE_COMMAND.captures(trimmed) {
        return ChatCommand::RemoveItem {
            name: captures[1].to_string(),
        };
    }
    ChatCommand::Unrecognized(trimmed.to_string())
}

/// Runs a command against the list and returns the reply to show the user.
pub fn execute_command(
    command: &ChatCommand,
    repository: &mut dyn ShoppingListRepository,
) -> Result<String> {
    match command {
        ChatCommand::AddItem(parsed) => {
            let position = repository.fetch_all().len() as i64;
            let mut item = ShoppingListItem::new(parsed.raw_text.clone(), position);
            item.name = Some(parsed.name.clone()).filter(|name| !name.is_empty());
            item.quantity = parsed.quantity.map(format_quantity);
            item.unit = parsed.unit.clone();
            repository.insert_all(vec![item])?;
            Ok(format!("Added \"{}\" to your list.", parsed.raw_text))
        }
        ChatCommand::RemoveItem { name } => {
            let key = normalize_name(name);
            let items = repository.fetch_all();
            let before = items.len();
            let remaining: Vec<ShoppingListItem> = items
                .into_iter()
                .filter(|item| item_key(item) != key)
                .collect();
            let removed = before - remaining.len();
            if removed == 0 {
                return Ok(format!("Could not find \"{}\" on your list.", name));
            }
            repository.replace_all(remaining)?;
            Ok(format!("Removed \"{}\" from your list.", name))
        }
        ChatCommand::ShowList => {
            let items = repository.fetch_all();
            if items.is_empty() {
                return Ok("Your shopping list is empty.".to_string());
            }
            let lines: Vec<String> = items
                .iter()
                .map(|item| format!("- {}", item.text))
                .collect();
            Ok(lines.join("\n"))
        }
        ChatCommand::ClearList => {
            repository.replace_all(Vec::new())?;
            Ok("Cleared your shopping list.".to_string())
        }
        ChatCommand::ConsolidateList => {
            let consolidated = consolidate_items(&repository.fetch_all());
            let items: Vec<ShoppingListItem> = consolidated
                .entries
                .iter()
                .enumerate()
                .map(|(position, entry)| ShoppingListItem::from_entry(entry, position as i64))
                .collect();
            repository.replace_all(items)?;
            Ok(format!(
                "Merged {} duplicate item(s); {} item(s) on the list.",
                consolidated.stats.combined_count, consolidated.stats.final_count
            ))
        }
        ChatCommand::Unrecognized(text) => {
            Ok(format!("Sorry, I did not understand \"{}\".", text))
        }
    }
}

fn item_key(item: &ShoppingListItem) -> String {
    match item.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => normalize_name(name),
        None => normalize_name(&parse_line(&item.text).name),
    }
}
