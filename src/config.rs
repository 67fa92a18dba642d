use std::env;
use std::path::PathBuf;

use crate::api_connection::endpoints::DEFAULT_MEALDB_BASE_URL;

pub const BASE_URL_ENV_VAR: &str = "MEALDB_BASE_URL";
pub const STORE_PATH_ENV_VAR: &str = "RECIPE_FINDER_STORE";
pub const STRICT_ONLY_ENV_VAR: &str = "RECIPE_FINDER_STRICT_ONLY";
pub const STORE_UNITS_ENV_VAR: &str = "RECIPE_FINDER_STORE_UNITS";

pub const DEFAULT_STORE_PATH: &str = "recipe_finder_store.json";

/// Settings read from the environment (and `.env`). CLI flags take precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub store_path: PathBuf,
    pub strict_only: bool,
    pub store_units: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MEALDB_BASE_URL.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            strict_only: false,
            store_units: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or blank values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            base_url: value(BASE_URL_ENV_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            store_path: value(STORE_PATH_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            strict_only: value(STRICT_ONLY_ENV_VAR)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.strict_only),
            store_units: value(STORE_UNITS_ENV_VAR)
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.store_units),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
