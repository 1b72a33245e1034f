// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;

pub use distance::{distance_between, haversine_distance, round_km};
pub use filters::{matches_catalog_filters, matches_search};
pub use matcher::{MatchEngine, MatchOutcome};
