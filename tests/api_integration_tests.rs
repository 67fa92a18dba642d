use dotenv::dotenv;
use recipe_finder::api_connection::{
    endpoints::{Endpoint, DEFAULT_MEALDB_BASE_URL},
    DataSourceError, MealDbClient,
};
use recipe_finder::data_source::{CachedCatalog, DetailCache, RecipeDataSource};
use serde_json::json;
use std::env;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE_URL_ENV_VAR: &str = "MEALDB_BASE_URL";

const TERIYAKI_LOOKUP: &str = r#"{"meals":[{
    "idMeal":"52772","strMeal":"Teriyaki Chicken Casserole","strCategory":"Chicken",
    "strArea":"Japanese","strInstructions":"Preheat oven to 350. Combine soy sauce and sugar.",
    "strMealThumb":"https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
    "strTags":"Meat,Casserole","strYoutube":"https://www.youtube.com/watch?v=4aZr5hZXP_s",
    "strSource":null,
    "strIngredient1":"soy sauce","strMeasure1":"3/4 cup",
    "strIngredient2":"water","strMeasure2":"1/2 cup",
    "strIngredient3":"brown sugar","strMeasure3":"1/4 cup",
    "strIngredient4":"","strMeasure4":"",
    "strIngredient5":null,"strMeasure5":null
}]}"#;

fn setup_test_environment() {
    dotenv().ok();
}

fn live_base_url() -> String {
    env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_MEALDB_BASE_URL.to_string())
}

const API_PATH: &str = "/api/json/v1/1";

fn base_url(server: &MockServer) -> String {
    format!("{}{API_PATH}/", server.uri())
}

fn json_body(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/json")
}

#[test]
fn test_endpoint_urls() {
    let client = MealDbClient::new("http://localhost:9999/api/");
    assert_eq!(client.base_url(), "http://localhost:9999/api");
    assert_eq!(
        client.endpoint_url(Endpoint::FilterByIngredient),
        "http://localhost:9999/api/filter.php"
    );
    assert_eq!(Endpoint::SearchByName.query_key(), "s");
    assert_eq!(Endpoint::LookupById.query_key(), "i");
}

#[tokio::test]
async fn test_lookup_parses_ingredient_columns() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/lookup.php")))
        .and(query_param("i", "52772"))
        .respond_with(json_body(TERIYAKI_LOOKUP))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = MealDbClient::new(base_url(&mock_server));

    let detail = client.get_recipe_by_id("52772").await.unwrap().unwrap();
    assert_eq!(detail.summary.name, "Teriyaki Chicken Casserole");
    assert_eq!(detail.summary.area.as_deref(), Some("Japanese"));
    assert_eq!(detail.ingredients.len(), 3);
    assert_eq!(detail.ingredients[0].ingredient, "soy sauce");
    assert_eq!(detail.ingredients[0].measure, "3/4 cup");
    assert_eq!(detail.tag_list(), vec!["Meat", "Casserole"]);
    assert_eq!(detail.source, None);
    assert!(detail.enrichment.estimated_minutes > 0.0);
}

#[tokio::test]
async fn test_filter_and_search_send_their_query_keys() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/filter.php")))
        .and(query_param("i", "chicken breast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meals": [
                {"idMeal": "52940", "strMeal": "Brown Stew Chicken", "strMealThumb": "https://img.example/52940.jpg"},
                {"idMeal": "52846", "strMeal": "Chicken & mushroom Hotpot", "strMealThumb": "https://img.example/52846.jpg"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/search.php")))
        .and(query_param("s", "arrabiata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meals": [{
                "idMeal": "52771", "strMeal": "Spicy Arrabiata Penne",
                "strCategory": "Vegetarian", "strArea": "Italian",
                "strMealThumb": "https://img.example/52771.jpg"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    let client = MealDbClient::new(base_url(&mock_server));

    let by_ingredient = client.search_by_ingredient("chicken breast").await.unwrap();
    let ids: Vec<&str> = by_ingredient.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["52940", "52846"]);
    assert_eq!(by_ingredient[0].category, None);

    let by_name = client.search_by_name("arrabiata").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Spicy Arrabiata Penne");
    assert_eq!(by_name[0].area.as_deref(), Some("Italian"));
}

#[tokio::test]
async fn test_null_meals_means_no_results() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/filter.php")))
        .respond_with(json_body(r#"{"meals":null}"#))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/search.php")))
        .respond_with(json_body(r#"{"meals":"Invalid ID"}"#))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/lookup.php")))
        .respond_with(json_body(r#"{"meals":null}"#))
        .mount(&mock_server)
        .await;
    let client = MealDbClient::new(base_url(&mock_server));

    assert!(client.search_by_ingredient("unobtainium").await.unwrap().is_empty());
    assert!(client.search_by_name("unobtainium").await.unwrap().is_empty());
    assert!(client.get_recipe_by_id("0").await.unwrap().is_none());
}

#[tokio::test]
async fn test_http_error_status_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/filter.php")))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;
    let client = MealDbClient::new(base_url(&mock_server));

    let result = client.search_by_ingredient("egg").await;
    match result {
        Err(DataSourceError::Api { status, error_body }) => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(error_body, "maintenance");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_serialization_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/search.php")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;
    let client = MealDbClient::new(base_url(&mock_server));

    let result = client.search_by_name("egg").await;
    assert!(matches!(result, Err(DataSourceError::Serialization(_))));
}

#[tokio::test]
async fn test_unreachable_host_is_a_network_error() {
    let mock_server = MockServer::start().await;
    let base = base_url(&mock_server);
    drop(mock_server);

    let client = MealDbClient::new(base);
    let result = client.search_by_name("egg").await;
    assert!(matches!(result, Err(DataSourceError::Network(_))));
}

#[tokio::test]
async fn test_cached_catalog_skips_repeat_lookups() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API_PATH}/lookup.php")))
        .and(query_param("i", "52772"))
        .respond_with(json_body(TERIYAKI_LOOKUP))
        .expect(1)
        .mount(&mock_server)
        .await;
    let cache = DetailCache::new();
    let catalog = CachedCatalog::new(MealDbClient::new(base_url(&mock_server)), cache.clone());

    let first = catalog.get_recipe_by_id("52772").await.unwrap().unwrap();
    let second = catalog.get_recipe_by_id("52772").await.unwrap().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_live_ingredient_search() {
    setup_test_environment();
    let client = MealDbClient::new(live_base_url());

    let result = client.search_by_ingredient("chicken").await;
    assert!(result.is_ok(), "API call failed: {:?}", result.err());
    let recipes = result.unwrap();
    assert!(!recipes.is_empty());
    assert!(recipes.iter().all(|r| !r.id.is_empty()));
}

#[tokio::test]
#[ignore]
async fn test_live_lookup_is_enriched() {
    setup_test_environment();
    let client = MealDbClient::new(live_base_url());

    let result = client.get_recipe_by_id("52772").await;
    assert!(result.is_ok(), "API call failed: {:?}", result.err());
    let detail = result.unwrap().expect("52772 should exist");
    assert!(!detail.ingredients.is_empty());
    assert!(!detail.enrichment.cooking_tips.is_empty());
}
