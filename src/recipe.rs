use serde::{Deserialize, Serialize};
use std::fmt;

use crate::recipe_enhancer::enrich_recipe;

/// Catalog entry as returned by search endpoints.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub area: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngredientLine {
    pub ingredient: String,
    pub measure: String,
}

impl IngredientLine {
    pub fn new(ingredient: impl Into<String>, measure: impl Into<String>) -> Self {
        Self {
            ingredient: ingredient.into(),
            measure: measure.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CostTier {
    #[serde(rename = "$")]
    Low,
    #[serde(rename = "$$")]
    Medium,
    #[serde(rename = "$$$")]
    High,
}

impl fmt::Display for CostTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CostTier::Low => "$",
            CostTier::Medium => "$$",
            CostTier::High => "$$$",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NutritionEstimate {
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

/// Fields derived from a recipe's raw text when the detail is fetched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Enrichment {
    pub estimated_minutes: f64,
    pub serving_size: u32,
    pub difficulty: Difficulty,
    pub estimated_cost: CostTier,
    pub cooking_tips: Vec<String>,
    pub nutrition: NutritionEstimate,
}

/// Full recipe record. Never mutated once built; downstream code copies the
/// summary out instead of editing the ingredient list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: Recipe,
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<String>,
    pub ingredients: Vec<IngredientLine>,
    pub enrichment: Enrichment,
}

impl RecipeDetail {
    /// Builds a detail record and derives its enrichment fields.
    pub fn new(
        summary: Recipe,
        instructions: impl Into<String>,
        ingredients: Vec<IngredientLine>,
    ) -> Self {
        let instructions = instructions.into();
        let enrichment = enrich_recipe(&ingredients, &instructions);
        Self {
            summary,
            instructions,
            tags: None,
            youtube: None,
            source: None,
            ingredients,
            enrichment,
        }
    }

    pub fn with_links(
        mut self,
        tags: Option<String>,
        youtube: Option<String>,
        source: Option<String>,
    ) -> Self {
        self.tags = tags;
        self.youtube = youtube;
        self.source = source;
        self
    }

    pub fn id(&self) -> &str {
        &self.summary.id
    }

    pub fn to_summary(&self) -> Recipe {
        self.summary.clone()
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
