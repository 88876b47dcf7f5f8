//! Canonical forms for ingredient names and units.
//!
//! Every consolidation and pantry decision compares normalized strings, so
//! the rules here define what counts as "the same ingredient" and "the same
//! unit" everywhere else in the engine.

/// Canonical unit spellings and the synonyms that map onto them. First
/// column is the canonical plural form, second is every accepted alias.
const UNIT_SYNONYMS: &[(&str, &[&str])] = &[
    ("pieces", &["piece", "pc", "pcs", "each", "ea", "count"]),
    ("cups", &["cup", "c"]),
    ("tablespoons", &["tablespoon", "tbsp", "tbsps", "tbs", "tb"]),
    ("teaspoons", &["teaspoon", "tsp", "tsps", "ts"]),
    ("grams", &["gram", "g", "gr"]),
    ("kilograms", &["kilogram", "kg", "kgs", "kilo", "kilos"]),
    ("ounces", &["ounce", "oz"]),
    ("pounds", &["pound", "lb", "lbs"]),
    ("milliliters", &["milliliter", "millilitre", "millilitres", "ml"]),
    ("liters", &["liter", "litre", "litres", "l"]),
];

/// Reduces an ingredient name to its canonical grouping key: lowercased,
/// stripped of anything outside ASCII letters, digits and spaces, whitespace
/// runs collapsed, and the head noun de-pluralized so "egg" and "eggs" land
/// on the same key. Two raw names are the same ingredient exactly when their
/// keys are equal. Keys are for grouping only, never for display.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    let mut words: Vec<&str> = stripped.split_whitespace().collect();
    if let Some(last) = words.last_mut() {
        *last = singularize(last);
    }
    words.join(" ")
}

/// Strips a plural suffix from a single word. Deliberately naive: short
/// words and "-ss"/"-us" endings are left alone so "hummus" and "swiss"
/// survive, and "-oes"/"-ches"-style plurals drop the trailing "es".
fn singularize(word: &str) -> &str {
    if word.len() <= 3 || word.ends_with("ss") || word.ends_with("us") {
        return word;
    }
    for suffix in ["sses", "oes", "xes", "ches", "shes", "zes"] {
        if word.ends_with(suffix) {
            return &word[..word.len() - 2];
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        return stem;
    }
    word
}

/// Looks a token up in the unit table. Returns the canonical spelling when
/// the token is a recognized unit, `None` otherwise. The line parser uses
/// this to decide whether the word after a quantity is a unit or already
/// part of the ingredient name.
pub fn canonical_unit(token: &str) -> Option<&'static str> {
    let lowered = token.trim().trim_end_matches('.').to_lowercase();
    for (canonical, aliases) in UNIT_SYNONYMS {
        if lowered == *canonical || aliases.contains(&lowered.as_str()) {
            return Some(canonical);
        }
    }
    None
}

/// Maps a unit string onto its canonical spelling. Unrecognized units pass
/// through lowercased and trimmed rather than erroring, so uncommon units
/// still compare equal to themselves.
pub fn normalize_unit(unit: &str) -> String {
    let lowered = unit.trim().trim_end_matches('.').to_lowercase();
    match canonical_unit(&lowered) {
        Some(canonical) => canonical.to_string(),
        None => lowered,
    }
}

/// Whether two unit annotations may be treated as the same measure. An
/// absent unit is a wildcard: "2 eggs" and "2 pieces eggs" should merge,
/// and a pantry row without a unit matches any requirement for that name.
pub fn units_compatible(left: Option<&str>, right: Option<&str>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => normalize_unit(left) == normalize_unit(right),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_lowercases_and_trims() {
        assert_eq!(normalize_name("  Flour  "), "flour");
        assert_eq!(normalize_name("Chicken Breast"), "chicken breast");
    }

    #[test]
    fn test_normalize_name_strips_punctuation() {
        assert_eq!(normalize_name("flour, sifted!"), "flour sifted");
        assert_eq!(normalize_name("st-germain's  syrup"), "stgermains syrup");
    }

    #[test]
    fn test_normalize_name_collapses_whitespace() {
        assert_eq!(normalize_name("olive   oil"), "olive oil");
        assert_eq!(normalize_name("olive\toil"), "olive oil");
    }

    #[test]
    fn test_singular_and_plural_share_a_key() {
        assert_eq!(normalize_name("egg"), normalize_name("eggs"));
        assert_eq!(normalize_name("chicken breasts"), "chicken breast");
        assert_eq!(normalize_name("tomatoes"), "tomato");
        assert_eq!(normalize_name("peaches"), "peach");
        assert_eq!(normalize_name("cookies"), "cookie");
    }

    #[test]
    fn test_singularize_leaves_awkward_words_alone() {
        assert_eq!(normalize_name("hummus"), "hummus");
        assert_eq!(normalize_name("swiss"), "swiss");
        assert_eq!(normalize_name("couscous"), "couscous");
    }

    #[test]
    fn test_only_the_head_noun_is_singularized() {
        assert_eq!(normalize_name("eggs benedict"), "eggs benedict");
        assert_eq!(normalize_name("green beans"), "green bean");
    }

    #[test]
    fn test_canonical_unit_recognizes_aliases() {
        assert_eq!(canonical_unit("cup"), Some("cups"));
        assert_eq!(canonical_unit("Tbsp"), Some("tablespoons"));
        assert_eq!(canonical_unit("tsp."), Some("teaspoons"));
        assert_eq!(canonical_unit("lbs"), Some("pounds"));
        assert_eq!(canonical_unit("ml"), Some("milliliters"));
    }

    #[test]
    fn test_canonical_unit_rejects_ordinary_words() {
        assert_eq!(canonical_unit("flour"), None);
        assert_eq!(canonical_unit("large"), None);
        assert_eq!(canonical_unit(""), None);
    }

    #[test]
    fn test_normalize_unit_passes_unknown_units_through() {
        assert_eq!(normalize_unit("cups"), "cups");
        assert_eq!(normalize_unit("LB"), "pounds");
        assert_eq!(normalize_unit("Pinch"), "pinch");
    }

    #[test]
    fn test_units_compatible_with_wildcards_and_synonyms() {
        assert!(units_compatible(Some("cups"), Some("cup")));
        assert!(units_compatible(None, Some("cups")));
        assert!(units_compatible(Some("cups"), None));
        assert!(units_compatible(None, None));
        assert!(!units_compatible(Some("cups"), Some("pounds")));
    }
}
