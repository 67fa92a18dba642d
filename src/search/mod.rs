pub mod matcher;
pub mod mood_table;
pub mod normalizer;
pub mod query_parser;
pub mod resolver;
pub mod suggestions;
pub mod time_buckets;

pub use matcher::{ContainmentMatcher, IngredientMatcher, MatchClass};
pub use normalizer::normalize;
pub use query_parser::{mood_search_terms, parse_ingredients, parse_time_input, FilterMode};
pub use resolver::{SearchError, SearchGeneration, SearchRequest, SearchResolver, SearchSession, SearchTicket};
pub use suggestions::suggest;
pub use time_buckets::build_buckets;
