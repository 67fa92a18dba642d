pub mod api_connection;
pub mod cli;
pub mod config;
pub mod data_source;
pub mod planner;
pub mod recipe;
pub mod recipe_enhancer;
pub mod search;
pub mod shopping_aggregator;
pub mod unit_converter;
