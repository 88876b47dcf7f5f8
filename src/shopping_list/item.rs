use crate::consolidator::ConsolidatedEntry;
use crate::quantity::format_quantity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted shopping-list row. Identity is the generated id; two items
/// with identical text are both legal until a consolidation pass merges
/// them, so inserts never enforce content uniqueness.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShoppingListItem {
    pub id: Uuid,
    pub text: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub name: Option<String>,
    pub is_checked: bool,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingListItem {
    pub fn new(text: impl Into<String>, position: i64) -> Self {
        let now = Utc::now();
        ShoppingListItem {
            id: Uuid::new_v4(),
            text: text.into(),
            quantity: None,
            unit: None,
            name: None,
            is_checked: false,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Materializes a consolidated entry as a fresh unchecked item.
    pub fn from_entry(entry: &ConsolidatedEntry, position: i64) -> Self {
        let mut item = ShoppingListItem::new(entry.text.clone(), position);
        item.quantity = entry.quantity.map(format_quantity);
        item.unit = entry.unit.clone();
        item.name = Some(entry.name.clone());
        item
    }
}
