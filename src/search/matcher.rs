use super::normalizer::normalize;
use crate::recipe::IngredientLine;

/// Decides whether a recipe ingredient and a user-supplied ingredient refer to
/// the same thing.
pub trait IngredientMatcher: Send + Sync {
    fn matches(&self, recipe_ingredient: &str, user_ingredient: &str) -> bool;
}

/// Normalises both names, then accepts when either contains the other, so
/// "tomato" matches "tomatoes" and "Chopped Tomatoes" alike.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContainmentMatcher;

impl IngredientMatcher for ContainmentMatcher {
    fn matches(&self, recipe_ingredient: &str, user_ingredient: &str) -> bool {
        let a = normalize(recipe_ingredient);
        let b = normalize(user_ingredient);
        if a.is_empty() || b.is_empty() {
            return false;
        }
        a.contains(&b) || b.contains(&a)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchClass {
    /// Every recipe ingredient is covered by the user's list.
    pub strict: bool,
    /// Every user ingredient appears somewhere in the recipe.
    pub relaxed: bool,
}

pub fn classify(
    matcher: &dyn IngredientMatcher,
    recipe_ingredients: &[IngredientLine],
    user_ingredients: &[String],
) -> MatchClass {
    let covered_by_user = |recipe: &IngredientLine| {
        user_ingredients
            .iter()
            .any(|user| matcher.matches(&recipe.ingredient, user))
    };
    let found_in_recipe = |user: &String| {
        recipe_ingredients
            .iter()
            .any(|recipe| matcher.matches(&recipe.ingredient, user))
    };

    MatchClass {
        // An empty ingredient list says nothing about what the recipe needs.
        strict: !recipe_ingredients.is_empty() && recipe_ingredients.iter().all(covered_by_user),
        relaxed: user_ingredients.iter().all(found_in_recipe),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(names: &[&str]) -> Vec<IngredientLine> {
        names.iter().map(|n| IngredientLine::new(*n, "")).collect()
    }

    fn user(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_containment_either_direction() {
        let m = ContainmentMatcher;
        assert!(m.matches("Tomatoes", "tomato"));
        assert!(m.matches("egg", "Eggs"));
        assert!(!m.matches("milk", "bread"));
        assert!(!m.matches("", "bread"));
    }

    #[test]
    fn test_containment_normalizes_aliases() {
        let m = ContainmentMatcher;
        assert!(m.matches("Aubergine", "brinjal"));
        assert!(m.matches("Spring Onions", "scallion"));
    }

    #[test]
    fn test_strict_subset() {
        let class = classify(
            &ContainmentMatcher,
            &recipe(&["Egg", "Bread"]),
            &user(&["egg", "bread", "butter"]),
        );
        assert!(class.strict);
        assert!(!class.relaxed);
    }

    #[test]
    fn test_relaxed_superset() {
        let class = classify(
            &ContainmentMatcher,
            &recipe(&["egg", "bread", "milk"]),
            &user(&["egg", "bread", "butter"]),
        );
        assert!(!class.strict);
        assert!(!class.relaxed);

        let class = classify(
            &ContainmentMatcher,
            &recipe(&["egg", "bread", "milk"]),
            &user(&["egg", "bread"]),
        );
        assert!(!class.strict);
        assert!(class.relaxed);
    }

    #[test]
    fn test_empty_recipe_is_never_strict() {
        let class = classify(&ContainmentMatcher, &[], &user(&["egg"]));
        assert_eq!(class, MatchClass::default());
    }
}
