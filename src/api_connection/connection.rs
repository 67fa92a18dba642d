use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::endpoints::{Endpoint, MealDbResponse, DEFAULT_MEALDB_BASE_URL};
use crate::data_source::RecipeDataSource;
use crate::recipe::{Recipe, RecipeDetail};

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    Api {
        status: reqwest::StatusCode,
        error_body: String,
    },
    #[error("Recipe source unavailable: {0}")]
    Unavailable(String),
}

/// HTTP client for TheMealDB's public JSON API.
#[derive(Clone, Debug)]
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl Default for MealDbClient {
    fn default() -> Self {
        Self::new(DEFAULT_MEALDB_BASE_URL)
    }
}

impl MealDbClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    async fn call(&self, endpoint: Endpoint, value: &str) -> Result<MealDbResponse, DataSourceError> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, value, "calling recipe API");

        let response = self
            .client
            .get(&url)
            .query(&[(endpoint.query_key(), value)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(DataSourceError::Api { status, error_body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str::<MealDbResponse>(&body)?)
    }
}

#[async_trait]
impl RecipeDataSource for MealDbClient {
    async fn search_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, DataSourceError> {
        let response = self.call(Endpoint::FilterByIngredient, ingredient).await?;
        Ok(response.meals.iter().map(|m| m.to_recipe()).collect())
    }

    async fn search_by_name(&self, text: &str) -> Result<Vec<Recipe>, DataSourceError> {
        let response = self.call(Endpoint::SearchByName, text).await?;
        Ok(response.meals.iter().map(|m| m.to_recipe()).collect())
    }

    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<Arc<RecipeDetail>>, DataSourceError> {
        let response = self.call(Endpoint::LookupById, id).await?;
        Ok(response.meals.first().map(|meal| Arc::new(meal.to_detail())))
    }
}
