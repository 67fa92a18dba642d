use chrono::Utc;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::data_source::RecipeDataSource;
use crate::planner::{
    KeyValueStore, MealPlanWeek, PlannedMeal, PlannerError, PlannerStore, ShoppingList, ShoppingListItem,
};
use crate::recipe::{IngredientLine, RecipeDetail};
use crate::search::normalize;
use crate::unit_converter::{convert_to_store_units, format_store_amount};

pub const QUANTITY_SEPARATOR: &str = " + ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    /// Convert measures to g/kg/ml/l instead of copying the recipe text.
    pub store_units: bool,
    /// Merge on the normalised ingredient name ("scallion" and "spring onion"
    /// become one line) rather than the trimmed, lowercased name.
    pub normalize_names: bool,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            store_units: true,
            normalize_names: false,
        }
    }
}

impl AggregationOptions {
    fn merge_key(&self, ingredient: &str) -> String {
        if self.normalize_names {
            normalize(ingredient)
        } else {
            ingredient.trim().to_lowercase()
        }
    }

    fn quantity_text(&self, line: &IngredientLine) -> String {
        if self.store_units {
            format_store_amount(convert_to_store_units(&line.ingredient, &line.measure))
        } else {
            line.measure.trim().to_string()
        }
    }
}

/// Builds a week's shopping list from the recipes behind its planned meals.
pub struct ShoppingAggregator<S> {
    source: S,
    options: AggregationOptions,
}

impl<S: RecipeDataSource> ShoppingAggregator<S> {
    pub fn new(source: S, options: AggregationOptions) -> Self {
        Self { source, options }
    }

    /// Looks the recipe up by id, then by name if the id no longer resolves.
    pub async fn resolve_meal(&self, meal: &PlannedMeal) -> Option<Arc<RecipeDetail>> {
        match self.source.get_recipe_by_id(&meal.recipe_id).await {
            Ok(Some(detail)) => return Some(detail),
            Ok(None) => debug!(meal = %meal.id, recipe = %meal.recipe_id, "recipe id not found, trying name"),
            Err(e) => warn!(meal = %meal.id, error = %e, "recipe lookup failed, trying name"),
        }

        let by_name = match self.source.search_by_name(&meal.recipe_name).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(meal = %meal.id, error = %e, "name search failed, skipping meal");
                return None;
            }
        };
        let first = by_name.first()?;
        match self.source.get_recipe_by_id(&first.id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!(meal = %meal.id, error = %e, "recipe lookup failed, skipping meal");
                None
            }
        }
    }

    /// Resolves every meal concurrently and merges their ingredient lines.
    /// Meals that cannot be resolved are left out.
    pub async fn aggregate(&self, meals: &[PlannedMeal]) -> Vec<ShoppingListItem> {
        let resolved = join_all(meals.iter().map(|meal| self.resolve_meal(meal))).await;
        let pairs: Vec<(&PlannedMeal, Arc<RecipeDetail>)> = meals
            .iter()
            .zip(resolved)
            .filter_map(|(meal, detail)| detail.map(|d| (meal, d)))
            .collect();

        info!(meals = meals.len(), resolved = pairs.len(), "aggregating shopping list");
        merge_ingredients(&pairs, self.options)
    }

    /// One item per named ingredient line of the meal's recipe, each with the
    /// meal as its only provenance. Nothing is merged.
    pub async fn meal_items(&self, meal: &PlannedMeal) -> Vec<ShoppingListItem> {
        let Some(detail) = self.resolve_meal(meal).await else {
            return Vec::new();
        };
        detail
            .ingredients
            .iter()
            .filter(|line| !line.ingredient.trim().is_empty())
            .map(|line| ShoppingListItem {
                id: Uuid::new_v4().to_string(),
                ingredient: line.ingredient.trim().to_string(),
                quantity: Some(self.options.quantity_text(line)).filter(|q| !q.is_empty()),
                checked: false,
                source_meal_ids: vec![meal.id.clone()],
            })
            .collect()
    }

    /// Appends the meal's ingredient lines to its week's list, creating the
    /// list if needed. Returns how many items were added.
    pub async fn add_meal_to_list<K: KeyValueStore>(
        &self,
        planner: &PlannerStore<K>,
        meal: &PlannedMeal,
    ) -> Result<usize, PlannerError> {
        let list_id = meal.week_id();
        let items = self.meal_items(meal).await;
        let added = items.len();
        for item in items {
            planner.add_shopping_item(&list_id, item)?;
        }
        debug!(meal = %meal.id, list = %list_id, added, "added meal ingredients to list");
        Ok(added)
    }

    /// Replaces the items of `existing` (or a fresh list for the week) with
    /// the aggregated ones.
    pub async fn generate_list(&self, week: &MealPlanWeek, existing: Option<ShoppingList>) -> ShoppingList {
        let mut list = existing.unwrap_or_else(|| ShoppingList::for_week(&week.id));
        list.items = self.aggregate(&week.meals).await;
        list.updated_at = Utc::now();
        list
    }
}

/// Merges ingredient lines across meals, keeping first-seen order.
///
/// Repeated ingredients gain the new meal as provenance and append its
/// quantity text after `" + "` unless one of the joined amounts is exactly
/// that text.
/// Amounts are concatenated, never summed.
pub fn merge_ingredients(
    meals: &[(&PlannedMeal, Arc<RecipeDetail>)],
    options: AggregationOptions,
) -> Vec<ShoppingListItem> {
    let mut items: Vec<ShoppingListItem> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for (meal, detail) in meals {
        for line in &detail.ingredients {
            let key = options.merge_key(&line.ingredient);
            if key.is_empty() {
                continue;
            }
            let quantity = options.quantity_text(line);

            match index_by_key.get(&key) {
                None => {
                    index_by_key.insert(key, items.len());
                    items.push(ShoppingListItem {
                        id: Uuid::new_v4().to_string(),
                        ingredient: line.ingredient.trim().to_string(),
                        quantity: Some(quantity).filter(|q| !q.is_empty()),
                        checked: false,
                        source_meal_ids: vec![meal.id.clone()],
                    });
                }
                Some(&index) => {
                    let existing = &mut items[index];
                    if !quantity.is_empty() {
                        match existing.quantity.as_mut() {
                            Some(current)
                                if current.split(QUANTITY_SEPARATOR).any(|part| part == quantity) => {}
                            Some(current) => {
                                current.push_str(QUANTITY_SEPARATOR);
                                current.push_str(&quantity);
                            }
                            None => existing.quantity = Some(quantity),
                        }
                    }
                    existing.source_meal_ids.push(meal.id.clone());
                }
            }
        }
    }
    items
}
