use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::recipe::{IngredientLine, Recipe, RecipeDetail};

pub const DEFAULT_MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// TheMealDB stores at most this many ingredient/measure column pairs per meal.
pub const MAX_INGREDIENT_SLOTS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    FilterByIngredient,
    SearchByName,
    LookupById,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::FilterByIngredient => "filter.php",
            Endpoint::SearchByName => "search.php",
            Endpoint::LookupById => "lookup.php",
        }
    }

    pub fn query_key(&self) -> &'static str {
        match self {
            Endpoint::FilterByIngredient | Endpoint::LookupById => "i",
            Endpoint::SearchByName => "s",
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MealDbResponse {
    #[serde(default, deserialize_with = "meals_or_empty")]
    pub meals: Vec<MealDbMeal>,
}

// `meals` comes back as `null` for no match, and some endpoints answer with a
// bare string instead of an array.
fn meals_or_empty<'de, D>(deserializer: D) -> Result<Vec<MealDbMeal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Array(items)) => {
            serde_json::from_value(serde_json::Value::Array(items)).map_err(serde::de::Error::custom)
        }
        _ => Ok(Vec::new()),
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MealDbMeal {
    #[serde(rename = "idMeal")]
    pub id_meal: String,
    #[serde(rename = "strMeal")]
    pub str_meal: String,
    #[serde(rename = "strMealThumb", default)]
    pub str_meal_thumb: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub str_category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub str_area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub str_instructions: Option<String>,
    #[serde(rename = "strTags", default)]
    pub str_tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub str_youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    pub str_source: Option<String>,
    /// `strIngredientN` / `strMeasureN` columns and anything else the API adds.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl MealDbMeal {
    fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }

    pub fn to_recipe(&self) -> Recipe {
        Recipe {
            id: self.id_meal.clone(),
            name: self.str_meal.clone(),
            thumbnail: self.str_meal_thumb.clone().unwrap_or_default(),
            category: non_blank(&self.str_category),
            area: non_blank(&self.str_area),
        }
    }

    /// Ingredient/measure pairs in column order, skipping blank ingredient slots.
    pub fn ingredient_lines(&self) -> Vec<IngredientLine> {
        (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|slot| {
                let ingredient = self.extra_str(&format!("strIngredient{slot}"))?;
                if ingredient.trim().is_empty() {
                    return None;
                }
                let measure = self.extra_str(&format!("strMeasure{slot}")).unwrap_or("");
                Some(IngredientLine::new(ingredient, measure))
            })
            .collect()
    }

    pub fn to_detail(&self) -> RecipeDetail {
        RecipeDetail::new(
            self.to_recipe(),
            self.str_instructions.clone().unwrap_or_default(),
            self.ingredient_lines(),
        )
        .with_links(
            non_blank(&self.str_tags),
            non_blank(&self.str_youtube),
            non_blank(&self.str_source),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_meals_is_empty() {
        let response: MealDbResponse = serde_json::from_str(r#"{"meals": null}"#).unwrap();
        assert!(response.meals.is_empty());
    }

    #[test]
    fn test_string_meals_is_empty() {
        let response: MealDbResponse =
            serde_json::from_str(r#"{"meals": "no data found"}"#).unwrap();
        assert!(response.meals.is_empty());
    }

    #[test]
    fn test_filter_response_parses_summary_fields() {
        let json = r#"{"meals":[{"strMeal":"Chick-Fil-A Sandwich","strMealThumb":"https://x.test/a.jpg","idMeal":"53016"}]}"#;
        let response: MealDbResponse = serde_json::from_str(json).unwrap();
        let recipe = response.meals[0].to_recipe();
        assert_eq!(recipe.id, "53016");
        assert_eq!(recipe.name, "Chick-Fil-A Sandwich");
        assert_eq!(recipe.category, None);
    }

    #[test]
    fn test_ingredient_lines_skip_blank_slots() {
        let json = r#"{
            "idMeal": "1", "strMeal": "Toast", "strInstructions": "Toast the bread.",
            "strIngredient1": "Bread", "strMeasure1": "2 slices",
            "strIngredient2": "", "strMeasure2": "",
            "strIngredient3": "Butter", "strMeasure3": null,
            "strIngredient4": null
        }"#;
        let meal: MealDbMeal = serde_json::from_str(json).unwrap();
        let lines = meal.ingredient_lines();
        assert_eq!(
            lines,
            vec![
                IngredientLine::new("Bread", "2 slices"),
                IngredientLine::new("Butter", ""),
            ]
        );
        let detail = meal.to_detail();
        assert_eq!(detail.instructions, "Toast the bread.");
        assert_eq!(detail.ingredients.len(), 2);
    }
}
