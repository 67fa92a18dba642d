pub mod connection;
pub mod endpoints;

pub use connection::{DataSourceError, MealDbClient};
