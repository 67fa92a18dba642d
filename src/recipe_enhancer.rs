use crate::recipe::{CostTier, Difficulty, Enrichment, IngredientLine, NutritionEstimate};

const MAX_ESTIMATED_MINUTES: f64 = 120.0;

const EXPENSIVE_INGREDIENTS: &[&str] = &["beef", "lamb", "duck", "salmon", "truffle", "lobster", "crab"];
const MEDIUM_INGREDIENTS: &[&str] = &["chicken", "pork", "fish", "cheese", "wine", "butter", "cream"];

const PROTEIN_SOURCES: &[&str] = &["chicken", "beef", "pork", "fish", "egg", "cheese", "beans"];
const CARB_SOURCES: &[&str] = &["rice", "pasta", "bread", "flour", "potato", "sugar"];
const FAT_SOURCES: &[&str] = &["butter", "oil", "cream", "cheese", "nuts", "avocado"];

enum TipTrigger {
    Instructions(&'static [&'static str]),
    Ingredients(&'static [&'static str]),
}

const COOKING_TIPS: &[(TipTrigger, &str)] = &[
    (
        TipTrigger::Instructions(&["marinate", "season"]),
        "Allow time for marinating - it enhances flavor significantly",
    ),
    (
        TipTrigger::Instructions(&["bake", "oven"]),
        "Preheat the oven before cooking for best results",
    ),
    (
        TipTrigger::Instructions(&["stir-fry", "wok"]),
        "Keep your pan or wok hot for perfect stir-frying",
    ),
    (
        TipTrigger::Ingredients(&["onion", "garlic"]),
        "Don't rush sautéing onions and garlic - caramelization adds depth",
    ),
    (
        TipTrigger::Ingredients(&["salt", "pepper"]),
        "Season throughout the cooking process, not just at the end",
    ),
    (
        TipTrigger::Instructions(&["boil", "simmer"]),
        "Bring to a boil then reduce to a simmer for gentle cooking",
    ),
];

const GENERIC_TIPS: &[&str] = &[
    "Read through the full recipe before starting to cook",
    "Prepare all ingredients before you begin (mise en place)",
];

/// Derives time, servings, difficulty, cost, tips and nutrition from the raw
/// ingredient list and instruction text. Deterministic for a given input.
pub fn enrich_recipe(ingredients: &[IngredientLine], instructions: &str) -> Enrichment {
    let lowered: Vec<String> = ingredients
        .iter()
        .map(|line| line.ingredient.to_lowercase())
        .collect();
    let ingredient_count = ingredients.len() as f64;
    // Instruction "steps" are approximated by hundreds of characters.
    let instruction_steps = instructions.chars().count() as f64 / 100.0;

    Enrichment {
        estimated_minutes: estimate_minutes(ingredient_count, instruction_steps),
        serving_size: estimate_serving_size(ingredients.len()),
        difficulty: estimate_difficulty(ingredient_count, instruction_steps),
        estimated_cost: estimate_cost(&lowered),
        cooking_tips: cooking_tips(&lowered, &instructions.to_lowercase()),
        nutrition: estimate_nutrition(&lowered),
    }
}

fn estimate_minutes(ingredient_count: f64, instruction_steps: f64) -> f64 {
    let minutes = 15.0 + ingredient_count * 2.0 + instruction_steps * 5.0;
    minutes.min(MAX_ESTIMATED_MINUTES)
}

fn estimate_serving_size(ingredient_count: usize) -> u32 {
    if ingredient_count > 8 {
        6
    } else if ingredient_count > 5 {
        4
    } else {
        2
    }
}

fn estimate_difficulty(ingredient_count: f64, instruction_steps: f64) -> Difficulty {
    let complexity = ingredient_count * 2.0 + instruction_steps;
    if complexity < 15.0 {
        Difficulty::Easy
    } else if complexity < 30.0 {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

fn any_contains(ingredients: &[String], needle: &str) -> bool {
    ingredients.iter().any(|i| i.contains(needle))
}

fn estimate_cost(ingredients: &[String]) -> CostTier {
    let expensive = EXPENSIVE_INGREDIENTS
        .iter()
        .filter(|needle| any_contains(ingredients, needle))
        .count() as u32;
    let medium = MEDIUM_INGREDIENTS
        .iter()
        .filter(|needle| any_contains(ingredients, needle))
        .count() as u32;

    let score = 5 + expensive * 8 + medium * 3;
    if score < 10 {
        CostTier::Low
    } else if score < 20 {
        CostTier::Medium
    } else {
        CostTier::High
    }
}

fn cooking_tips(ingredients: &[String], instructions: &str) -> Vec<String> {
    let mut tips: Vec<String> = COOKING_TIPS
        .iter()
        .filter(|(trigger, _)| match trigger {
            TipTrigger::Instructions(words) => words.iter().any(|w| instructions.contains(w)),
            TipTrigger::Ingredients(words) => words.iter().any(|w| any_contains(ingredients, w)),
        })
        .map(|(_, tip)| tip.to_string())
        .collect();

    if tips.is_empty() {
        tips.extend(GENERIC_TIPS.iter().map(|t| t.to_string()));
    }
    tips
}

fn count_matching(ingredients: &[String], sources: &[&str]) -> u32 {
    ingredients
        .iter()
        .filter(|i| sources.iter().any(|s| i.contains(s)))
        .count() as u32
}

fn estimate_nutrition(ingredients: &[String]) -> NutritionEstimate {
    let protein = count_matching(ingredients, PROTEIN_SOURCES);
    let carbs = count_matching(ingredients, CARB_SOURCES);
    let fat = count_matching(ingredients, FAT_SOURCES);

    NutritionEstimate {
        calories: 300 + protein * 80 + carbs * 60 + fat * 120,
        protein: format!("{}g", 10 + protein * 8),
        carbs: format!("{}g", 30 + carbs * 20),
        fat: format!("{}g", 12 + fat * 8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(names: &[&str]) -> Vec<IngredientLine> {
        names.iter().map(|n| IngredientLine::new(*n, "1")).collect()
    }

    #[test]
    fn test_estimated_minutes_formula() {
        // 3 ingredients, 200 chars of instructions: 15 + 6 + 10
        let instructions = "a".repeat(200);
        let enrichment = enrich_recipe(&lines(&["egg", "milk", "flour"]), &instructions);
        assert!((enrichment.estimated_minutes - 31.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimated_minutes_is_capped() {
        let instructions = "a".repeat(10_000);
        let enrichment = enrich_recipe(&lines(&["egg"]), &instructions);
        assert_eq!(enrichment.estimated_minutes, 120.0);
    }

    #[test]
    fn test_serving_size_thresholds() {
        assert_eq!(estimate_serving_size(5), 2);
        assert_eq!(estimate_serving_size(6), 4);
        assert_eq!(estimate_serving_size(8), 4);
        assert_eq!(estimate_serving_size(9), 6);
    }

    #[test]
    fn test_difficulty_thresholds() {
        assert_eq!(estimate_difficulty(7.0, 0.5), Difficulty::Easy);
        assert_eq!(estimate_difficulty(7.0, 1.0), Difficulty::Medium);
        assert_eq!(estimate_difficulty(15.0, 0.0), Difficulty::Hard);
    }

    #[test]
    fn test_cost_tiers() {
        let cheap: Vec<String> = vec!["rice".into(), "onion".into()];
        assert_eq!(estimate_cost(&cheap), CostTier::Low);

        // 5 + 8 (beef) = 13
        let beef: Vec<String> = vec!["beef brisket".into()];
        assert_eq!(estimate_cost(&beef), CostTier::Medium);

        // 5 + 8 + 8 = 21
        let lavish: Vec<String> = vec!["lobster".into(), "lamb".into()];
        assert_eq!(estimate_cost(&lavish), CostTier::High);
    }

    #[test]
    fn test_generic_tips_when_nothing_triggers() {
        let enrichment = enrich_recipe(&lines(&["rice"]), "Mix well.");
        assert_eq!(enrichment.cooking_tips.len(), 2);
        assert!(enrichment.cooking_tips[0].starts_with("Read through"));
    }

    #[test]
    fn test_tips_follow_declaration_order() {
        let enrichment = enrich_recipe(&lines(&["garlic"]), "Simmer, then bake in the oven.");
        assert_eq!(
            enrichment.cooking_tips,
            vec![
                "Preheat the oven before cooking for best results".to_string(),
                "Don't rush sautéing onions and garlic - caramelization adds depth".to_string(),
                "Bring to a boil then reduce to a simmer for gentle cooking".to_string(),
            ]
        );
    }

    #[test]
    fn test_nutrition_counts_ingredients_per_category() {
        let enrichment = enrich_recipe(&lines(&["Chicken", "Cheese", "Rice"]), "");
        // chicken + cheese are protein; cheese is fat; rice is carb
        assert_eq!(enrichment.nutrition.calories, 300 + 2 * 80 + 60 + 120);
        assert_eq!(enrichment.nutrition.protein, "26g");
        assert_eq!(enrichment.nutrition.carbs, "50g");
        assert_eq!(enrichment.nutrition.fat, "20g");
    }
}
