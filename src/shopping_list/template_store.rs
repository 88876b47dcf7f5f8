use crate::shopping_list::ShoppingListItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One seed line of a template: just enough to rebuild a fresh item.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TemplateSeed {
    pub text: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

/// A named, reusable seed list. Built-in templates are seeded at startup
/// and cannot be deleted; user templates come from snapshotting a list.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub items: Vec<TemplateSeed>,
    pub is_default: bool,
}

#[derive(Debug, PartialEq)]
pub enum TemplateError {
    NotFound(Uuid),
    BuiltinImmutable(String),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::NotFound(id) => {
                write!(f, "No template found with id {id}")
            }
            TemplateError::BuiltinImmutable(name) => {
                write!(f, "Built-in template '{name}' cannot be deleted")
            }
        }
    }
}

impl std::error::Error for TemplateError {}

struct BuiltinSeed {
    text: &'static str,
    quantity: Option<&'static str>,
    unit: Option<&'static str>,
}

struct BuiltinTemplate {
    name: &'static str,
    description: &'static str,
    items: &'static [BuiltinSeed],
}

static BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
    BuiltinTemplate {
        name: "Weekly staples",
        description: "Everyday basics most households restock each week",
        items: &[
            BuiltinSeed {
                text: "2 liters milk",
                quantity: Some("2"),
                unit: Some("liters"),
            },
            BuiltinSeed {
                text: "12 eggs",
                quantity: Some("12"),
                unit: None,
            },
            BuiltinSeed {
                text: "bread",
                quantity: None,
                unit: None,
            },
            BuiltinSeed {
                text: "butter",
                quantity: None,
                unit: None,
            },
            BuiltinSeed {
                text: "bananas",
                quantity: None,
                unit: None,
            },
        ],
    },
    BuiltinTemplate {
        name: "Taco night",
        description: "Everything for a round of tacos",
        items: &[
            BuiltinSeed {
                text: "1 lb ground beef",
                quantity: Some("1"),
                unit: Some("pounds"),
            },
            BuiltinSeed {
                text: "tortillas",
                quantity: None,
                unit: None,
            },
            BuiltinSeed {
                text: "1 cup shredded cheese",
                quantity: Some("1"),
                unit: Some("cups"),
            },
            BuiltinSeed {
                text: "salsa",
                quantity: None,
                unit: None,
            },
            BuiltinSeed {
                text: "lettuce",
                quantity: None,
                unit: None,
            },
            BuiltinSeed {
                text: "2 tomatoes",
                quantity: Some("2"),
                unit: None,
            },
        ],
    },
    BuiltinTemplate {
        name: "Baking basics",
        description: "Dry pantry refill for regular bakers",
        items: &[
            BuiltinSeed {
                text: "4 cups flour",
                quantity: Some("4"),
                unit: Some("cups"),
            },
            BuiltinSeed {
                text: "2 cups sugar",
                quantity: Some("2"),
                unit: Some("cups"),
            },
            BuiltinSeed {
                text: "1 tsp baking soda",
                quantity: Some("1"),
                unit: Some("teaspoons"),
            },
            BuiltinSeed {
                text: "500 grams butter",
                quantity: Some("500"),
                unit: Some("grams"),
            },
        ],
    },
];

/// In-memory collection of templates. Applying one never mutates the store;
/// it only materializes fresh items for the caller to persist.
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with the built-in templates.
    pub fn with_builtins() -> Self {
        let templates = BUILTIN_TEMPLATES
            .iter()
            .map(|builtin| Template {
                id: Uuid::new_v4(),
                name: builtin.name.to_string(),
                description: builtin.description.to_string(),
                items: builtin
                    .items
                    .iter()
                    .map(|seed| TemplateSeed {
                        text: seed.text.to_string(),
                        quantity: seed.quantity.map(String::from),
                        unit: seed.unit.map(String::from),
                    })
                    .collect(),
                is_default: true,
            })
            .collect();
        TemplateStore { templates }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: Uuid) -> Option<&Template> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Materializes the template's seeds as fresh unchecked items with new
    /// ids and sequential positions. The caller replaces the current list
    /// with the result; an unknown id leaves everything untouched.
    pub fn apply(&self, id: Uuid) -> Result<Vec<ShoppingListItem>, TemplateError> {
        let template = self.get(id).ok_or(TemplateError::NotFound(id))?;
        Ok(template
            .items
            .iter()
            .enumerate()
            .map(|(position, seed)| {
                let mut item = ShoppingListItem::new(seed.text.clone(), position as i64);
                item.quantity = seed.quantity.clone();
                item.unit = seed.unit.clone();
                item
            })
            .collect())
    }

    /// Snapshots the given items as a new user template and returns its id.
    pub fn save_as_template(
        &mut self,
        name: &str,
        description: &str,
        items: &[ShoppingListItem],
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.templates.push(Template {
            id,
            name: name.to_string(),
            description: description.to_string(),
            items: items
                .iter()
                .map(|item| TemplateSeed {
                    text: item.text.clone(),
                    quantity: item.quantity.clone(),
                    unit: item.unit.clone(),
                })
                .collect(),
            is_default: false,
        });
        id
    }

    /// Deletes a user template. Built-in templates are immutable.
    pub fn delete(&mut self, id: Uuid) -> Result<(), TemplateError> {
        let position = self
            .templates
            .iter()
            .position(|template| template.id == id)
            .ok_or(TemplateError::NotFound(id))?;
        if self.templates[position].is_default {
            return Err(TemplateError::BuiltinImmutable(
                self.templates[position].name.clone(),
            ));
        }
        self.templates.remove(position);
        Ok(())
    }
}
