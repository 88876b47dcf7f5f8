use crate::normalizer::normalize_name;
use serde::{Deserialize, Serialize};

/// Store aisle a shopping-list item is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AisleCategory {
    Produce,
    Dairy,
    Meat,
    Bakery,
    Frozen,
    Canned,
    DryGoods,
    Beverages,
    Snacks,
    Household,
    Other,
}

impl AisleCategory {
    /// Every category in its fixed display order, `Other` last.
    pub const ALL: [AisleCategory; 11] = [
        AisleCategory::Produce,
        AisleCategory::Dairy,
        AisleCategory::Meat,
        AisleCategory::Bakery,
        AisleCategory::Frozen,
        AisleCategory::Canned,
        AisleCategory::DryGoods,
        AisleCategory::Beverages,
        AisleCategory::Snacks,
        AisleCategory::Household,
        AisleCategory::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            AisleCategory::Produce => "produce",
            AisleCategory::Dairy => "dairy",
            AisleCategory::Meat => "meat",
            AisleCategory::Bakery => "bakery",
            AisleCategory::Frozen => "frozen",
            AisleCategory::Canned => "canned",
            AisleCategory::DryGoods => "dry goods",
            AisleCategory::Beverages => "beverages",
            AisleCategory::Snacks => "snacks",
            AisleCategory::Household => "household",
            AisleCategory::Other => "other",
        }
    }
}

/// Keyword table scanned top to bottom; the first row containing a keyword
/// that appears as a substring of the normalized name decides the category.
/// Row order is part of the contract ("chicken soup" is meat, not canned),
/// so entries must not be reordered casually.
const AISLE_KEYWORDS: &[(AisleCategory, &[&str])] = &[
    (
        AisleCategory::Produce,
        &[
            "apple", "banana", "orange", "lemon", "lime", "berr", "grape", "melon", "peach",
            "pear", "mango", "pineapple", "avocado", "lettuce", "spinach", "kale", "tomato",
            "potato", "onion", "garlic", "carrot", "celery", "cucumber", "pepper", "broccoli",
            "cauliflower", "mushroom", "zucchini", "squash", "eggplant", "cabbage", "pea",
            "green bean", "herb", "cilantro", "parsley", "basil", "mint", "ginger", "cress",
            "scallion", "leek", "fruit", "vegetable", "salad",
        ],
    ),
    (
        AisleCategory::Dairy,
        &[
            "milk", "cheese", "yogurt", "yoghurt", "butter", "cream", "egg", "margarine",
            "kefir", "ghee",
        ],
    ),
    (
        AisleCategory::Meat,
        &[
            "chicken", "beef", "pork", "turkey", "lamb", "veal", "goat", "bacon", "sausage",
            "ham", "steak", "salmon", "tuna", "shrimp", "prawn", "cod", "fish", "crab",
            "lobster", "anchov", "meat",
        ],
    ),
    (
        AisleCategory::Bakery,
        &[
            "bread", "bagel", "bun", "muffin", "croissant", "tortilla", "pita", "baguette",
            "naan", "brioche", "cake", "pastry", "donut", "doughnut", "crust",
        ],
    ),
    (
        AisleCategory::Frozen,
        &["frozen", "popsicle", "sorbet", "gelato"],
    ),
    (
        AisleCategory::Canned,
        &[
            "canned", "soup", "broth", "stock", "bean", "chickpea", "pickle", "caper", "salsa",
            "marinara", "pasta sauce", "jam", "jelly",
        ],
    ),
    (
        AisleCategory::DryGoods,
        &[
            "flour", "sugar", "rice", "pasta", "spaghetti", "macaroni", "noodle", "cereal",
            "oat", "quinoa", "lentil", "barley", "couscous", "baking powder", "baking soda",
            "yeast", "cornstarch", "vanilla", "cinnamon", "nutmeg", "cumin", "paprika",
            "turmeric", "oregano", "chili powder", "spice", "seasoning", "salt", "oil",
            "vinegar", "honey", "syrup", "seed", "nut",
        ],
    ),
    (
        AisleCategory::Beverages,
        &[
            "juice", "soda", "coffee", "tea", "water", "wine", "beer", "cola", "lemonade",
            "smoothie", "sparkling", "drink",
        ],
    ),
    (
        AisleCategory::Snacks,
        &[
            "chip", "cracker", "cookie", "candy", "chocolate", "popcorn", "pretzel",
            "granola bar", "trail mix",
        ],
    ),
    (
        AisleCategory::Household,
        &[
            "paper towel", "toilet paper", "detergent", "soap", "shampoo", "sponge", "foil",
            "plastic wrap", "trash bag", "napkin", "bleach", "cleaner", "battery",
        ],
    ),
];

/// Classifies an ingredient name into a store aisle. Unmatched names land
/// in `Other` rather than failing.
pub fn classify(name: &str) -> AisleCategory {
    let key = normalize_name(name);
    if key.is_empty() {
        return AisleCategory::Other;
    }
    for (category, keywords) in AISLE_KEYWORDS {
        if keywords.iter().any(|keyword| key.contains(keyword)) {
            return *category;
        }
    }
    AisleCategory::Other
}
