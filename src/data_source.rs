use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::api_connection::DataSourceError;
use crate::recipe::{Recipe, RecipeDetail};

/// Remote recipe catalog. Searches return summaries; lookups return enriched details.
#[async_trait]
pub trait RecipeDataSource: Send + Sync {
    async fn search_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, DataSourceError>;

    async fn search_by_name(&self, text: &str) -> Result<Vec<Recipe>, DataSourceError>;

    /// `Ok(None)` when the catalog has no entry for `id`.
    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<Arc<RecipeDetail>>, DataSourceError>;
}

#[async_trait]
impl<S: RecipeDataSource + ?Sized> RecipeDataSource for Arc<S> {
    async fn search_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, DataSourceError> {
        (**self).search_by_ingredient(ingredient).await
    }

    async fn search_by_name(&self, text: &str) -> Result<Vec<Recipe>, DataSourceError> {
        (**self).search_by_name(text).await
    }

    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<Arc<RecipeDetail>>, DataSourceError> {
        (**self).get_recipe_by_id(id).await
    }
}

/// Shared detail-by-id cache. Cloning hands out another handle to the same map.
///
/// Entries live as long as the owner keeps a handle; nothing is evicted
/// implicitly. The first detail stored for an id is the one every later
/// reader sees.
#[derive(Clone, Default, Debug)]
pub struct DetailCache {
    entries: Arc<DashMap<String, Arc<RecipeDetail>>>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Arc<RecipeDetail>> {
        self.entries.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Stores `detail` unless an entry already exists; returns the cached value.
    pub fn insert(&self, detail: Arc<RecipeDetail>) -> Arc<RecipeDetail> {
        let entry = self
            .entries
            .entry(detail.id().to_string())
            .or_insert(detail);
        Arc::clone(entry.value())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

/// Wraps a data source so detail lookups are fetched at most once per id.
pub struct CachedCatalog<S> {
    inner: S,
    cache: DetailCache,
}

impl<S: RecipeDataSource> CachedCatalog<S> {
    pub fn new(inner: S, cache: DetailCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &DetailCache {
        &self.cache
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: RecipeDataSource> RecipeDataSource for CachedCatalog<S> {
    async fn search_by_ingredient(&self, ingredient: &str) -> Result<Vec<Recipe>, DataSourceError> {
        self.inner.search_by_ingredient(ingredient).await
    }

    async fn search_by_name(&self, text: &str) -> Result<Vec<Recipe>, DataSourceError> {
        self.inner.search_by_name(text).await
    }

    async fn get_recipe_by_id(&self, id: &str) -> Result<Option<Arc<RecipeDetail>>, DataSourceError> {
        if let Some(hit) = self.cache.get(id) {
            return Ok(Some(hit));
        }
        debug!(id, "detail cache miss");
        // Misses are not remembered, so a stale id is retried next time.
        let fetched = self.inner.get_recipe_by_id(id).await?;
        Ok(fetched.map(|detail| self.cache.insert(detail)))
    }
}
