use futures::future::join_all;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::matcher::{classify, ContainmentMatcher, IngredientMatcher};
use super::mood_table::QUICK_MEAL_SEARCHES;
use super::query_parser::{mood_search_terms, parse_ingredients, time_target, FilterMode};
use super::time_buckets::build_buckets;
use crate::api_connection::DataSourceError;
use crate::data_source::RecipeDataSource;
use crate::recipe::{Recipe, RecipeDetail};

/// Detail lookups issued when filtering a multi-ingredient search.
pub const INGREDIENT_DETAIL_LIMIT: usize = 50;
/// Detail lookups issued per time bucket.
pub const TIME_DETAIL_LIMIT: usize = 30;
/// Mood terms actually searched; ranking still uses every term.
pub const MOOD_TERM_LIMIT: usize = 3;
/// Time buckets at or under this ceiling use the quick-meal searches.
pub const QUICK_BUCKET_CEILING: u32 = 30;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Please enter a search term")]
    EmptyQuery,
    #[error("Failed to search recipes: {0}")]
    SearchFailed(#[from] DataSourceError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub mode: FilterMode,
    /// Multi-ingredient searches return strict matches only, even when empty.
    pub strict_only: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, mode: FilterMode) -> Self {
        Self {
            query: query.into(),
            mode,
            strict_only: false,
        }
    }

    pub fn strict_only(mut self, strict_only: bool) -> Self {
        self.strict_only = strict_only;
        self
    }
}

/// Turns a query plus filter mode into a ranked, de-duplicated recipe list.
///
/// Holds no state between calls; the only shared resource is whatever cache
/// the data source carries.
pub struct SearchResolver<S> {
    source: S,
    matcher: Arc<dyn IngredientMatcher>,
}

impl<S: RecipeDataSource> SearchResolver<S> {
    pub fn new(source: S) -> Self {
        Self::with_matcher(source, Arc::new(ContainmentMatcher))
    }

    pub fn with_matcher(source: S, matcher: Arc<dyn IngredientMatcher>) -> Self {
        Self { source, matcher }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn resolve(&self, request: &SearchRequest) -> Result<Vec<Recipe>, SearchError> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let results = match request.mode {
            FilterMode::Ingredients => self.by_ingredients(query, request.strict_only).await?,
            FilterMode::Mood => self.by_mood(query).await?,
            FilterMode::Time => self.by_time(query).await?,
        };
        info!(mode = %request.mode, query, found = results.len(), "search resolved");
        Ok(results)
    }

    async fn by_ingredients(&self, query: &str, strict_only: bool) -> Result<Vec<Recipe>, SearchError> {
        let ingredients = parse_ingredients(query);
        match ingredients.as_slice() {
            [] => Ok(Vec::new()),
            [single] => {
                debug!(ingredient = %single, "searching by single ingredient");
                let results = self.source.search_by_ingredient(single).await?;
                if !results.is_empty() {
                    return Ok(results);
                }
                debug!(ingredient = %single, "no ingredient hits, falling back to name search");
                Ok(self.source.search_by_name(single).await?)
            }
            [primary, ..] => {
                debug!(?ingredients, "searching by multiple ingredients");
                let candidates = dedup_by_id(self.source.search_by_ingredient(primary).await?);
                let details = self.fetch_details(&candidates, INGREDIENT_DETAIL_LIMIT).await;

                let mut strict = Vec::new();
                let mut relaxed = Vec::new();
                for detail in &details {
                    let class = classify(self.matcher.as_ref(), &detail.ingredients, &ingredients);
                    if class.strict {
                        strict.push(detail.to_summary());
                    }
                    if class.relaxed {
                        relaxed.push(detail.to_summary());
                    }
                }
                debug!(
                    candidates = details.len(),
                    strict = strict.len(),
                    relaxed = relaxed.len(),
                    "classified multi-ingredient candidates"
                );

                if strict_only || !strict.is_empty() {
                    Ok(strict)
                } else {
                    Ok(relaxed)
                }
            }
        }
    }

    async fn by_mood(&self, query: &str) -> Result<Vec<Recipe>, SearchError> {
        let terms = mood_search_terms(query);
        debug!(?terms, "mood search terms");

        let searched: Vec<String> = terms.iter().take(MOOD_TERM_LIMIT).cloned().collect();
        let mut results = dedup_by_id(self.search_names(&searched).await?);

        let lowered_terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
        // sort_by_key is stable: equal scores keep their search order
        results.sort_by_key(|recipe| std::cmp::Reverse(mood_score(&recipe.name, &lowered_terms)));
        Ok(results)
    }

    async fn by_time(&self, query: &str) -> Result<Vec<Recipe>, SearchError> {
        let target = time_target(query);
        let buckets = build_buckets(target);
        debug!(target, ?buckets, "time search buckets");

        let mut quick_candidates: Option<Vec<Recipe>> = None;
        let mut query_candidates: Option<Vec<Recipe>> = None;

        for ceiling in buckets {
            let candidates = if ceiling <= QUICK_BUCKET_CEILING {
                if quick_candidates.is_none() {
                    let names: Vec<String> = QUICK_MEAL_SEARCHES.iter().map(|s| s.to_string()).collect();
                    quick_candidates = Some(dedup_by_id(self.search_names(&names).await?));
                }
                quick_candidates.as_deref().unwrap_or_default()
            } else {
                if query_candidates.is_none() {
                    query_candidates = Some(dedup_by_id(self.source.search_by_name(query).await?));
                }
                query_candidates.as_deref().unwrap_or_default()
            };

            let details = self.fetch_details(candidates, TIME_DETAIL_LIMIT).await;
            let within: Vec<Recipe> = details
                .iter()
                .filter(|detail| {
                    let minutes = detail.enrichment.estimated_minutes;
                    minutes > 0.0 && minutes <= f64::from(ceiling)
                })
                .map(|detail| detail.to_summary())
                .collect();

            debug!(ceiling, found = within.len(), "time bucket evaluated");
            if !within.is_empty() {
                return Ok(within);
            }
        }
        Ok(Vec::new())
    }

    /// Runs one name search per term concurrently and concatenates the hits in
    /// term order. Fails only when every search failed.
    async fn search_names(&self, terms: &[String]) -> Result<Vec<Recipe>, DataSourceError> {
        let outcomes = join_all(terms.iter().map(|term| self.source.search_by_name(term))).await;

        let mut combined = Vec::new();
        let mut last_error = None;
        let mut succeeded = 0usize;
        for (term, outcome) in terms.iter().zip(outcomes) {
            match outcome {
                Ok(hits) => {
                    succeeded += 1;
                    combined.extend(hits);
                }
                Err(e) => {
                    warn!(term = %term, error = %e, "name search failed, skipping term");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(combined),
        }
    }

    /// Fetches details for the first `limit` candidates concurrently. Lookups
    /// that fail or find nothing are dropped; order follows the candidates.
    async fn fetch_details(&self, candidates: &[Recipe], limit: usize) -> Vec<Arc<RecipeDetail>> {
        let lookups = candidates
            .iter()
            .take(limit)
            .map(|recipe| self.source.get_recipe_by_id(&recipe.id));

        join_all(lookups)
            .await
            .into_iter()
            .zip(candidates)
            .filter_map(|(outcome, recipe)| match outcome {
                Ok(detail) => detail,
                Err(e) => {
                    warn!(id = %recipe.id, error = %e, "detail lookup failed, excluding candidate");
                    None
                }
            })
            .collect()
    }
}

/// Keeps the first occurrence of every id.
pub fn dedup_by_id(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    recipes
        .into_iter()
        .filter(|recipe| seen.insert(recipe.id.clone()))
        .collect()
}

/// Number of (lowercased) mood terms found in the recipe name.
pub fn mood_score(name: &str, lowered_terms: &[String]) -> usize {
    let name = name.to_lowercase();
    lowered_terms
        .iter()
        .filter(|term| name.contains(term.as_str()))
        .count()
}

/// Monotonic counter used to drop results of superseded searches.
#[derive(Debug, Default)]
pub struct SearchGeneration {
    current: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

impl SearchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new search, superseding every earlier ticket.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}

/// Caller-owned view of the latest search. Outcomes from superseded tickets
/// are discarded instead of overwriting fresher results.
#[derive(Debug, Default)]
pub struct SearchSession {
    generation: SearchGeneration,
    results: Vec<Recipe>,
    error: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> SearchTicket {
        self.generation.begin()
    }

    /// Returns `false` when the outcome was stale and ignored.
    pub fn commit(&mut self, ticket: SearchTicket, outcome: Result<Vec<Recipe>, SearchError>) -> bool {
        if !self.generation.is_current(ticket) {
            debug!(?ticket, "discarding stale search outcome");
            return false;
        }
        match outcome {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(e) => {
                self.results.clear();
                self.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn results(&self) -> &[Recipe] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
