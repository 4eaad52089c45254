pub mod alerts;
pub mod catalog;
pub mod error;
pub mod geo;
pub mod intent;
pub mod itinerary;
pub mod models;
pub mod planner;
pub mod profile;
pub mod scoring;
pub mod segment;
pub mod template;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use alerts::{destination_alerts, summarize_alerts};
pub use catalog::{normalize_destination_key, CatalogSnapshot, DestinationCatalog};
pub use error::PlanError;
pub use geo::haversine_km;
pub use intent::{classify_chat, normalize_text, ChatIntent};
pub use itinerary::{destination_snapshot, generate_itinerary, total_cost_estimate};
pub use models::*;
pub use profile::{resolve_profile, CategoryProfile};
pub use scoring::{normalize_interests, rank_spots, score_spot};
pub use validation::validate_request;
