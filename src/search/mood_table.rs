//! Static keyword tables for mood and quick-meal searches.
//!
//! Declaration order matters: partial-match lookups scan top to bottom and the
//! first hit wins.

pub const MOOD_KEYWORDS: &[(&str, &[&str])] = &[
    // spicy
    ("spicy", &["pepper", "chili", "spicy", "hot", "jalapeño", "cayenne", "curry"]),
    ("hot", &["pepper", "chili", "hot"]),
    ("spice", &["pepper", "chili", "spicy"]),
    // comfort
    ("comfort", &["bread", "rice", "pasta", "potato", "cheese"]),
    ("comfort food", &["bread", "rice", "pasta", "potato", "cheese"]),
    // healthy
    ("healthy", &["salad", "vegetable", "fruit", "quinoa", "green"]),
    ("light", &["salad", "vegetable", "fruit"]),
    ("fresh", &["salad", "vegetable", "fruit", "cucumber"]),
    // sweet
    ("sweet", &["sugar", "honey", "chocolate", "cake", "dessert"]),
    ("dessert", &["sugar", "chocolate", "cake", "dessert", "cookie"]),
    // cuisines
    ("italian", &["pasta", "tomato", "basil", "mozzarella", "olive"]),
    ("asian", &["soy", "rice", "ginger", "sesame"]),
    ("chinese", &["soy", "rice", "ginger"]),
    ("japanese", &["soy", "rice", "fish"]),
    ("mexican", &["bean", "tomato", "pepper", "corn"]),
    // hearty / protein
    ("hearty", &["beef", "lamb", "potato", "meat"]),
    ("protein", &["chicken", "beef", "fish", "egg", "tofu"]),
    // diet types
    ("vegetarian", &["vegetable", "bean", "tofu", "grain"]),
    ("veggie", &["vegetable", "bean"]),
    // seafood
    ("seafood", &["fish", "shrimp", "crab", "salmon"]),
    ("fish", &["fish", "salmon", "tuna"]),
    // dish types
    ("breakfast", &["egg", "bacon", "toast", "pancake"]),
    ("morning", &["egg", "bacon", "toast"]),
    // quick / easy
    ("quick", &["quick", "simple", "easy"]),
    ("fast", &["quick", "simple"]),
    ("easy", &["simple", "basic"]),
];

/// Name searches used for time ceilings of 30 minutes or less.
pub const QUICK_MEAL_SEARCHES: &[&str] = &["pasta", "salad", "sandwich", "quick", "easy", "simple"];

pub fn mood_terms(key: &str) -> Option<&'static [&'static str]> {
    MOOD_KEYWORDS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, terms)| *terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for (key, terms) in MOOD_KEYWORDS {
            assert_eq!(*key, key.to_lowercase());
            assert!(seen.insert(*key), "duplicate mood key {key}");
            assert!(!terms.is_empty());
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(mood_terms("veggie"), Some(&["vegetable", "bean"][..]));
        assert_eq!(mood_terms("nope"), None);
    }
}
