//! Autocomplete suggestions for the search box.

use super::normalizer::normalize;
use super::query_parser::FilterMode;

pub const MAX_SUGGESTIONS: usize = 8;
/// Share of the input's characters that must appear, in order, in a candidate.
const FUZZY_THRESHOLD: f64 = 0.7;

pub const COMMON_INGREDIENTS: &[&str] = &[
    // vegetables
    "tomato", "onion", "garlic", "pepper", "bell pepper", "carrot", "celery",
    "potato", "sweet potato", "spinach", "lettuce", "cabbage", "broccoli",
    "cauliflower", "zucchini", "eggplant", "cucumber", "mushroom", "okra",
    // meats
    "chicken", "beef", "pork", "lamb", "turkey", "sausage",
    // seafood
    "fish", "salmon", "tuna", "shrimp", "crab", "lobster",
    // dairy
    "cheese", "milk", "butter", "cream", "yogurt", "cream cheese",
    // grains
    "rice", "pasta", "bread", "flour", "quinoa", "oatmeal",
    // legumes
    "bean", "black bean", "chickpea", "lentil", "kidney bean",
    // fruit
    "apple", "banana", "orange", "lemon", "lime", "berry",
    // nuts and seeds
    "almond", "walnut", "peanut", "sesame seed",
    // herbs and spices
    "basil", "oregano", "thyme", "rosemary", "parsley", "cilantro",
    "ginger", "curry", "cumin", "paprika", "cinnamon", "chili",
    // other
    "egg", "oil", "olive oil", "vinegar", "soy sauce", "honey",
    "chocolate", "sugar", "salt", "pepper", "black pepper", "green onion",
];

pub const MOOD_SUGGESTIONS: &[&str] = &[
    "spicy", "sweet", "savory", "hot", "cold", "fresh", "light", "hearty",
    "comfort food", "comforting", "delicious", "healthy", "nutritious",
    "quick", "easy", "simple", "fast", "gourmet", "fancy", "classic",
    "traditional", "modern", "exotic", "homemade", "rustic",
    "italian", "mexican", "asian", "chinese", "japanese", "indian",
    "thai", "greek", "french", "american", "mediterranean",
    "vegetarian", "vegan", "protein", "low carb", "keto", "gluten-free",
    "breakfast", "lunch", "dinner", "dessert", "appetizer", "main course",
    "side dish", "snack", "drink",
    "crispy", "creamy", "cheesy", "smooth", "crunchy", "tender",
    "tart", "sour", "bitter", "tangy",
    "seafood", "meat", "chicken", "beef", "pork", "fish",
];

pub const TIME_SUGGESTIONS: &[&str] = &[
    "quick", "fast", "speedy", "in a hurry", "rush", "express",
    "15 minutes", "20 minutes", "30 minutes", "45 minutes",
    "1 hour", "under 1 hour", "under 2 hours", "2 hours",
    "simple", "easy", "basic", "no-fuss", "straightforward",
    "instant", "immediate", "just now", "anytime",
];

fn table(mode: FilterMode) -> &'static [&'static str] {
    match mode {
        FilterMode::Ingredients => COMMON_INGREDIENTS,
        FilterMode::Mood => MOOD_SUGGESTIONS,
        FilterMode::Time => TIME_SUGGESTIONS,
    }
}

/// True when most of `needle`'s characters occur in `haystack` in order.
fn fuzzy_match(haystack: &str, needle: &str) -> bool {
    let needle: Vec<char> = needle.chars().collect();
    let mut matched = 0;
    for c in haystack.chars() {
        if matched == needle.len() {
            break;
        }
        if c == needle[matched] {
            matched += 1;
        }
    }
    matched as f64 >= needle.len() as f64 * FUZZY_THRESHOLD
}

/// Up to [`MAX_SUGGESTIONS`] completions for `input`, best first.
///
/// In ingredient mode only the text after the last comma is completed, after
/// alias normalisation, so "brinjal" offers "eggplant".
pub fn suggest(input: &str, mode: FilterMode) -> Vec<&'static str> {
    let needle = match mode {
        FilterMode::Ingredients => normalize(input.rsplit(',').next().unwrap_or("")),
        FilterMode::Mood | FilterMode::Time => input.trim().to_lowercase(),
    };
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<&'static str> = Vec::new();
    for &candidate in table(mode) {
        let first_word = candidate.split(' ').next().unwrap_or(candidate);
        let qualifies = candidate.contains(needle.as_str())
            || needle.contains(first_word)
            || fuzzy_match(candidate, &needle);
        if qualifies && !matches.contains(&candidate) {
            matches.push(candidate);
        }
    }

    matches.sort_by_key(|candidate| {
        let rank = if *candidate == needle {
            0
        } else if candidate.starts_with(needle.as_str()) {
            1
        } else if candidate.contains(needle.as_str()) {
            2
        } else {
            3
        };
        let position = candidate.find(needle.as_str()).unwrap_or(usize::MAX);
        (rank, position, *candidate)
    });
    matches.truncate(MAX_SUGGESTIONS);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_has_no_suggestions() {
        assert!(suggest("   ", FilterMode::Mood).is_empty());
        assert!(suggest("egg, ", FilterMode::Ingredients).is_empty());
    }

    #[test]
    fn test_exact_then_prefix_first() {
        let suggestions = suggest("cream", FilterMode::Ingredients);
        assert_eq!(suggestions[0], "cream");
        assert_eq!(suggestions[1], "cream cheese");
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
    }

    #[test]
    fn test_ingredient_mode_completes_last_token() {
        let suggestions = suggest("egg, brinj", FilterMode::Ingredients);
        assert!(!suggestions.contains(&"egg"));
        let suggestions = suggest("egg, brinjal", FilterMode::Ingredients);
        assert_eq!(suggestions[0], "eggplant");
    }

    #[test]
    fn test_no_duplicates() {
        let suggestions = suggest("pepper", FilterMode::Ingredients);
        let count = suggestions.iter().filter(|s| **s == "pepper").count();
        assert_eq!(count, 1);
        assert_eq!(suggestions[0], "pepper");
    }

    #[test]
    fn test_time_suggestions() {
        let suggestions = suggest("under", FilterMode::Time);
        assert_eq!(suggestions, vec!["under 1 hour", "under 2 hours"]);
    }

    #[test]
    fn test_fuzzy_match_threshold() {
        assert!(fuzzy_match("chocolate", "choclate"));
        assert!(!fuzzy_match("rice", "zzzz"));
    }
}
