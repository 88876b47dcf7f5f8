pub mod item;
pub mod template_store;

pub use item::ShoppingListItem;
pub use template_store::{Template, TemplateError, TemplateSeed, TemplateStore};

use anyhow::Result;
use std::collections::HashSet;

/// Persistence seam for the current shopping list. The engine never talks
/// to storage on its own; callers hand it a repository and every write goes
/// through `replace_all` or `insert_all` as one all-or-nothing step.
pub trait ShoppingListRepository {
    fn fetch_all(&self) -> Vec<ShoppingListItem>;

    /// Replaces the whole list. Either every item is stored or, on a
    /// validation failure, the previous contents survive untouched.
    fn replace_all(&mut self, items: Vec<ShoppingListItem>) -> Result<()>;

    /// Appends items after the current ones, with the same all-or-nothing
    /// behavior as `replace_all`.
    fn insert_all(&mut self, items: Vec<ShoppingListItem>) -> Result<()>;
}

/// The in-process list used by the demo binary and tests. Positions are
/// reassigned contiguously on every write.
#[derive(Debug, Default)]
pub struct InMemoryShoppingList {
    items: Vec<ShoppingListItem>,
}

impl InMemoryShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<ShoppingListItem>) -> Self {
        InMemoryShoppingList { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ShoppingListRepository for InMemoryShoppingList {
    fn fetch_all(&self) -> Vec<ShoppingListItem> {
        self.items.clone()
    }

    fn replace_all(&mut self, mut items: Vec<ShoppingListItem>) -> Result<()> {
        ensure_unique_ids(&items)?;
        renumber(&mut items);
        self.items = items;
        Ok(())
    }

    fn insert_all(&mut self, items: Vec<ShoppingListItem>) -> Result<()> {
        let mut combined = self.items.clone();
        combined.extend(items);
        ensure_unique_ids(&combined)?;
        renumber(&mut combined);
        self.items = combined;
        Ok(())
    }
}

fn ensure_unique_ids(items: &[ShoppingListItem]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id) {
            return Err(anyhow::anyhow!(
                "Duplicate shopping list item id: {}",
                item.id
            ));
        }
    }
    Ok(())
}

fn renumber(items: &mut [ShoppingListItem]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.position = position as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_all_swaps_contents_and_renumbers() {
        let mut repo = InMemoryShoppingList::with_items(vec![
            ShoppingListItem::new("old milk", 0),
        ]);
        repo.replace_all(vec![
            ShoppingListItem::new("flour", 7),
            ShoppingListItem::new("eggs", 9),
        ])
        .unwrap();

        let items = repo.fetch_all();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "flour");
        assert_eq!(items[0].position, 0);
        assert_eq!(items[1].position, 1);
    }

    #[test]
    fn test_insert_all_appends_after_existing() {
        let mut repo = InMemoryShoppingList::new();
        repo.replace_all(vec![ShoppingListItem::new("flour", 0)])
            .unwrap();
        repo.insert_all(vec![ShoppingListItem::new("eggs", 0)])
            .unwrap();

        let items = repo.fetch_all();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text, "eggs");
        assert_eq!(items[1].position, 1);
    }

    #[test]
    fn test_duplicate_content_is_allowed_on_insert() {
        // Content uniqueness is a consolidation concern, not an insert one.
        let mut repo = InMemoryShoppingList::new();
        repo.insert_all(vec![
            ShoppingListItem::new("2 cups flour", 0),
            ShoppingListItem::new("2 cups flour", 1),
        ])
        .unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_leave_previous_state_untouched() {
        let mut repo = InMemoryShoppingList::new();
        repo.replace_all(vec![ShoppingListItem::new("flour", 0)])
            .unwrap();

        let colliding = ShoppingListItem::new("eggs", 0);
        let result = repo.insert_all(vec![colliding.clone(), colliding]);
        assert!(result.is_err());
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.fetch_all()[0].text, "flour");
    }

    #[test]
    fn test_fetch_all_on_empty_repo() {
        let repo = InMemoryShoppingList::new();
        assert!(repo.is_empty());
        assert!(repo.fetch_all().is_empty());
    }
}
