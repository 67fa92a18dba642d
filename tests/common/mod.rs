#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use recipe_finder::api_connection::DataSourceError;
use recipe_finder::data_source::RecipeDataSource;
use recipe_finder::recipe::{IngredientLine, Recipe, RecipeDetail};

pub fn recipe(id: &str, name: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        thumbnail: format!("https://img.example/{id}.jpg"),
        category: None,
        area: None,
    }
}

pub fn detail(id: &str, name: &str, ingredients: &[&str]) -> Arc<RecipeDetail> {
    Arc::new(RecipeDetail::new(
        recipe(id, name),
        "",
        ingredients.iter().map(|i| IngredientLine::new(*i, "1")).collect(),
    ))
}

pub fn detail_with_measures(id: &str, name: &str, lines: &[(&str, &str)]) -> Arc<RecipeDetail> {
    Arc::new(RecipeDetail::new(
        recipe(id, name),
        "",
        lines.iter().map(|(i, m)| IngredientLine::new(*i, *m)).collect(),
    ))
}

pub fn ids(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.id.as_str()).collect()
}

/// In-memory catalog. Lookups are keyed by lowercased text; anything listed
/// in a `failing_*` set answers with an error instead.
#[derive(Default)]
pub struct FakeSource {
    by_ingredient: HashMap<String, Vec<Recipe>>,
    by_name: HashMap<String, Vec<Recipe>>,
    details: HashMap<String, Arc<RecipeDetail>>,
    failing_ingredients: HashSet<String>,
    failing_names: HashSet<String>,
    failing_details: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingredient(mut self, ingredient: &str, recipes: Vec<Recipe>) -> Self {
        self.by_ingredient.insert(ingredient.to_lowercase(), recipes);
        self
    }

    pub fn name(mut self, text: &str, recipes: Vec<Recipe>) -> Self {
        self.by_name.insert(text.to_lowercase(), recipes);
        self
    }

    pub fn detail(mut self, detail: Arc<RecipeDetail>) -> Self {
        self.details.insert(detail.id().to_string(), detail);
        self
    }

    pub fn failing_ingredient(mut self, ingredient: &str) -> Self {
        self.failing_ingredients.insert(ingredient.to_lowercase());
        self
    }

    pub fn failing_name(mut self, text: &str) -> Self {
        self.failing_names.insert(text.to_lowercase());
        self
    }

    pub fn failing_detail(mut self, id: &str) -> Self {
        self.failing_details.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn unavailable(what: &str) -> DataSourceError {
        DataSourceError::Unavailable(format!("{what} is down"))
    }
}

#[async_trait]
impl RecipeDataSource for FakeSource {
    async fn search_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, DataSourceError> {
        let key = ingredient.to_lowercase();
        self.record(format!("ingredient:{key}"));
        if self.failing_ingredients.contains(&key) {
            return Err(Self::unavailable("ingredient search"));
        }
        Ok(self.by_ingredient.get(&key).cloned().unwrap_or_default())
    }

    async fn search_by_name(&self, text: &str) -> Result<Vec<Recipe>, DataSourceError> {
        let key = text.to_lowercase();
        self.record(format!("name:{key}"));
        if self.failing_names.contains(&key) {
            return Err(Self::unavailable("name search"));
        }
        Ok(self.by_name.get(&key).cloned().unwrap_or_default())
    }

    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<Arc<RecipeDetail>>, DataSourceError> {
        self.record(format!("lookup:{id}"));
        if self.failing_details.contains(id) {
            return Err(Self::unavailable("lookup"));
        }
        Ok(self.details.get(id).cloned())
    }
}
